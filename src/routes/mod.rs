pub(crate) mod feed;
pub(crate) mod follows;
pub(crate) mod health;
pub(crate) mod journals;
pub(crate) mod stocks;
pub(crate) mod trades;
pub(crate) mod users;

use serde::Deserialize;

/// Shared `?page=&size=` query parameters. Bounds are validated in the
/// service layer before any query runs.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

pub(crate) fn default_size() -> i64 {
    20
}

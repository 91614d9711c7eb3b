use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::AppError;

/// Authenticated user id for the current request.
///
/// Credential validation happens upstream (the gateway terminates the token
/// exchange and injects the resolved id as `X-User-Id`); this extractor only
/// turns that opaque header into a typed id and rejects requests without one.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthUser(id))
    }
}

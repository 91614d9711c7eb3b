pub mod follow_queries;
pub mod image_queries;
pub mod journal_queries;
pub mod stock_queries;
pub mod trade_queries;
pub mod user_queries;

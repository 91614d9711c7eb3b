mod feed;
mod follow;
mod image;
mod journal;
mod page;
mod stock;
mod trade;
mod user;

pub use feed::FeedItem;
pub use follow::{Follow, FollowStatus, FollowUser};
pub use image::{ImageMeta, ImageMetaRow};
pub use journal::{CreateJournal, Journal, JournalResponse};
pub use page::Page;
pub use stock::{Stock, StockSearchResult};
pub use trade::{CreateTrade, Position, Trade, TradeResponse, TradeStats, UpdateRetrospective};
pub use user::{AuthorSummary, UpdateProfile, User, UserProfile, UserSearchResult};

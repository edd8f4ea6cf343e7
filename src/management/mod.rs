mod aggregate;
mod auth;
mod library;

pub use aggregate::Aggregator;
pub use aggregate::merge_playlist;
pub use auth::TokenManager;
pub use library::LibraryManager;

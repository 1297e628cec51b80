//! # Explore - like/pass decision engine
//!
//! Records directional like/pass decisions between actors and answers
//! "who liked me" queries.
//!
//! Explore provides:
//! - SQLite-backed decision storage with mutual-like detection at write time
//! - Paginated liker queries, with an anti-join variant that hides mutual likes
//! - A service facade, an HTTP/JSON transport and a CLI on top of both

pub mod decision;
pub mod storage;
pub mod query;
pub mod service;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use decision::{Decision, Liker, LikerPage, Timestamp};
pub use query::{LikeQueryEngine, PageToken, TokenPolicy};
pub use service::{ExploreService, DEFAULT_PAGE_SIZE};
pub use storage::{Database, DecisionStore};

/// Result type alias for Explore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Explore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool poisoned")]
    PoolPoisoned,
}

impl Error {
    /// Whether the caller supplied a bad request, as opposed to a storage failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

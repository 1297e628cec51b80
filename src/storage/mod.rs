//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - decisions(actor_user_id, recipient_user_id, liked_recipient, updated_at)

pub mod schema;
pub mod pool;
pub mod decisions;

pub use pool::{Database, DEFAULT_POOL_SIZE};
pub use decisions::DecisionStore;

//! Explore service facade
//!
//! The surface transports call into. It owns the deployment-wide page size
//! and token policy, decodes pagination tokens and rejects empty
//! identifiers before anything reaches storage.

use std::sync::Arc;

use crate::decision::LikerPage;
use crate::query::{LikeQueryEngine, PageToken, TokenPolicy};
use crate::storage::{Database, DecisionStore};
use crate::{Error, Result};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 50;

pub struct ExploreService {
    db: Arc<Database>,
    page_size: usize,
    token_policy: TokenPolicy,
}

impl ExploreService {
    /// Create a service over `db`. A zero page size falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn new(db: Arc<Database>, page_size: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self {
            db,
            page_size,
            token_policy: TokenPolicy::default(),
        }
    }

    pub fn with_token_policy(mut self, policy: TokenPolicy) -> Self {
        self.token_policy = policy;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Record a decision and report whether the like is now mutual
    pub fn put_decision(&self, actor: &str, recipient: &str, liked: bool) -> Result<bool> {
        require_id("actor_user_id", actor)?;
        require_id("recipient_user_id", recipient)?;
        DecisionStore::new(&self.db).record_decision(actor, recipient, liked)
    }

    /// Everyone who likes `recipient`, resuming from `token`
    pub fn list_liked_you(&self, recipient: &str, token: Option<&str>) -> Result<LikerPage> {
        let offset = PageToken::decode(token, self.token_policy)?;
        LikeQueryEngine::new(&self.db).list_liked_you(recipient, offset, self.page_size)
    }

    /// Likers of `recipient` who have not been liked back, resuming from `token`
    pub fn list_new_liked_you(&self, recipient: &str, token: Option<&str>) -> Result<LikerPage> {
        let offset = PageToken::decode(token, self.token_policy)?;
        LikeQueryEngine::new(&self.db).list_new_liked_you(recipient, offset, self.page_size)
    }

    pub fn count_liked_you(&self, recipient: &str) -> Result<u64> {
        LikeQueryEngine::new(&self.db).count_liked_you(recipient)
    }
}

fn require_id(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{} must not be empty", field)));
    }
    Ok(())
}

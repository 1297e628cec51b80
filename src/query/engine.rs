//! Query engine implementation
//!
//! Provides the read side of the decisions table:
//! - Everyone who currently likes a recipient
//! - The same list minus actors the recipient already liked back
//! - The total like count
//!
//! Listings are ordered newest first, ties broken by actor id, and paged with
//! offset tokens. Reads run outside a transaction, so a traversal across
//! pages sees whatever is committed when each page is fetched.

use rusqlite::params;

use super::PageToken;
use crate::decision::{Liker, LikerPage, Timestamp};
use crate::storage::Database;
use crate::{Error, Result};

const LIST_LIKED_YOU: &str = r#"
SELECT actor_user_id, updated_at
FROM decisions
WHERE recipient_user_id = ?1 AND liked_recipient = 1
ORDER BY updated_at DESC, actor_user_id ASC
LIMIT ?3 OFFSET ?2
"#;

/// Anti-join: drop likers the recipient has liked back
const LIST_NEW_LIKED_YOU: &str = r#"
SELECT d.actor_user_id, d.updated_at
FROM decisions d
WHERE d.recipient_user_id = ?1
  AND d.liked_recipient = 1
  AND NOT EXISTS (
      SELECT 1
      FROM decisions r
      WHERE r.actor_user_id = d.recipient_user_id
        AND r.recipient_user_id = d.actor_user_id
        AND r.liked_recipient = 1
  )
ORDER BY d.updated_at DESC, d.actor_user_id ASC
LIMIT ?3 OFFSET ?2
"#;

const COUNT_LIKED_YOU: &str =
    "SELECT COUNT(*) FROM decisions WHERE recipient_user_id = ?1 AND liked_recipient = 1";

/// Read-only query engine over recorded decisions
pub struct LikeQueryEngine<'a> {
    db: &'a Database,
}

impl<'a> LikeQueryEngine<'a> {
    /// Create a new query engine
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Everyone who currently likes `recipient`, one page at a time
    pub fn list_liked_you(&self, recipient: &str, offset: PageToken, limit: usize) -> Result<LikerPage> {
        self.fetch_page(LIST_LIKED_YOU, recipient, offset, limit)
    }

    /// Likers of `recipient` whose like has not been returned
    pub fn list_new_liked_you(&self, recipient: &str, offset: PageToken, limit: usize) -> Result<LikerPage> {
        self.fetch_page(LIST_NEW_LIKED_YOU, recipient, offset, limit)
    }

    /// Number of actors who currently like `recipient`
    pub fn count_liked_you(&self, recipient: &str) -> Result<u64> {
        let conn = self.db.checkout()?;
        let count: i64 = conn.query_row(COUNT_LIKED_YOU, [recipient], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Run a paged liker query.
    ///
    /// A full page yields a token for the next offset; a short page ends the
    /// listing. When the last page is exactly `limit` long the caller gets one
    /// extra, empty page.
    fn fetch_page(&self, sql: &str, recipient: &str, offset: PageToken, limit: usize) -> Result<LikerPage> {
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be positive".to_string()));
        }
        let sql_limit = i64::try_from(limit)
            .map_err(|_| Error::InvalidArgument(format!("limit too large: {}", limit)))?;
        let sql_offset = i64::try_from(offset.offset())
            .map_err(|_| Error::InvalidArgument(format!("offset too large: {}", offset)))?;

        let conn = self.db.checkout()?;
        let mut stmt = conn.prepare_cached(sql)?;

        let likers = stmt
            .query_map(params![recipient, sql_offset, sql_limit], |row| {
                let actor_id: String = row.get(0)?;
                let updated_at: i64 = row.get(1)?;
                Ok(Liker::new(actor_id, Timestamp::from_micros(updated_at)))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let next_token = if likers.len() == limit {
            offset.advance(limit as u64)
        } else {
            None
        };

        tracing::debug!(recipient, offset = offset.offset(), returned = likers.len(), "Fetched liker page");

        Ok(LikerPage { likers, offset, next_token })
    }
}

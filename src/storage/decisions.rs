//! Decision writes
//!
//! `DecisionStore` is the only writer of the `decisions` table. Every write
//! is an upsert on the ordered `(actor, recipient)` pair followed, for likes,
//! by a read of the reverse pair to report whether the like is now mutual.

use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::Database;
use crate::decision::{Decision, Timestamp};
use crate::Result;

const UPSERT_DECISION: &str = r#"
INSERT INTO decisions (actor_user_id, recipient_user_id, liked_recipient, updated_at)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (actor_user_id, recipient_user_id)
DO UPDATE SET liked_recipient = excluded.liked_recipient, updated_at = excluded.updated_at
"#;

const SELECT_LIKED: &str =
    "SELECT liked_recipient FROM decisions WHERE actor_user_id = ?1 AND recipient_user_id = ?2";

/// Writer for like/pass decisions
pub struct DecisionStore<'a> {
    db: &'a Database,
}

impl<'a> DecisionStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record that `actor` liked (or passed on) `recipient`, stamped with the
    /// current time. Returns whether the like is now mutual.
    ///
    /// Self-decisions are stored like any other; a self-like reads back its
    /// own row and so reports mutual.
    pub fn record_decision(&self, actor: &str, recipient: &str, liked: bool) -> Result<bool> {
        self.record_decision_at(actor, recipient, liked, Timestamp::now())
    }

    /// Record a decision with an explicit update time.
    ///
    /// The upsert and the reverse-pair read share one `IMMEDIATE`
    /// transaction. The write lock is held from the start, so a reverse like
    /// committed by a concurrent writer is always visible to the check and
    /// of two racing reciprocal likes exactly one reports mutual.
    pub fn record_decision_at(
        &self,
        actor: &str,
        recipient: &str,
        liked: bool,
        at: Timestamp,
    ) -> Result<bool> {
        let mut conn = self.db.checkout()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(UPSERT_DECISION, params![actor, recipient, liked, at.as_micros()])?;

        let mutual = if liked {
            tx.query_row(SELECT_LIKED, params![recipient, actor], |row| row.get::<_, bool>(0))
                .optional()?
                .unwrap_or(false)
        } else {
            false
        };

        tx.commit()?;

        tracing::debug!(actor, recipient, liked, mutual, "Recorded decision");
        Ok(mutual)
    }

    /// Get the current decision for an ordered pair
    pub fn get_decision(&self, actor: &str, recipient: &str) -> Result<Option<Decision>> {
        let conn = self.db.checkout()?;
        conn.query_row(
            "SELECT actor_user_id, recipient_user_id, liked_recipient, updated_at FROM decisions WHERE actor_user_id = ?1 AND recipient_user_id = ?2",
            params![actor, recipient],
            |row| {
                Ok(Decision {
                    actor_id: row.get(0)?,
                    recipient_id: row.get(1)?,
                    liked: row.get(2)?,
                    updated_at: Timestamp::from_micros(row.get(3)?),
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    /// Count stored decisions, likes and passes alike
    pub fn count_decisions(&self) -> Result<u64> {
        let conn = self.db.checkout()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM decisions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use tempfile::TempDir;

    #[test]
    fn test_first_like_is_not_mutual() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        assert!(!store.record_decision("a", "b", true).unwrap());
    }

    #[test]
    fn test_reciprocal_like_is_mutual() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision("a", "b", true).unwrap();
        assert!(store.record_decision("b", "a", true).unwrap());
    }

    #[test]
    fn test_pass_is_never_mutual() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision("a", "b", true).unwrap();
        assert!(!store.record_decision("b", "a", false).unwrap());
    }

    #[test]
    fn test_pass_resets_mutuality() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision("a", "b", true).unwrap();
        store.record_decision("a", "b", false).unwrap();
        assert!(!store.record_decision("b", "a", true).unwrap());
    }

    #[test]
    fn test_like_after_reverse_pass_is_not_mutual() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision("b", "a", false).unwrap();
        assert!(!store.record_decision("a", "b", true).unwrap());
    }

    #[test]
    fn test_upsert_keeps_one_row_per_pair() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision_at("a", "b", true, Timestamp::from_unix_seconds(10)).unwrap();
        store.record_decision_at("a", "b", false, Timestamp::from_unix_seconds(20)).unwrap();
        store.record_decision_at("a", "b", true, Timestamp::from_unix_seconds(30)).unwrap();

        assert_eq!(store.count_decisions().unwrap(), 1);
        let decision = store.get_decision("a", "b").unwrap().unwrap();
        assert!(decision.liked);
        assert_eq!(decision.updated_at.unix_seconds(), 30);
    }

    #[test]
    fn test_latest_write_wins_even_with_older_timestamp() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision_at("a", "b", true, Timestamp::from_unix_seconds(50)).unwrap();
        store.record_decision_at("a", "b", false, Timestamp::from_unix_seconds(40)).unwrap();

        let decision = store.get_decision("a", "b").unwrap().unwrap();
        assert!(!decision.liked);
        assert_eq!(decision.updated_at.unix_seconds(), 40);
    }

    #[test]
    fn test_reverse_pair_is_a_distinct_row() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        store.record_decision("a", "b", true).unwrap();
        assert!(store.get_decision("b", "a").unwrap().is_none());

        store.record_decision("b", "a", false).unwrap();
        assert_eq!(store.count_decisions().unwrap(), 2);
        assert!(store.get_decision("a", "b").unwrap().unwrap().liked);
    }

    #[test]
    fn test_self_like_is_stored_and_reads_back_as_mutual() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);

        assert!(store.record_decision("a", "a", true).unwrap());
        assert!(!store.record_decision("a", "a", false).unwrap());
        assert_eq!(store.count_decisions().unwrap(), 1);
    }

    #[test]
    fn test_failed_write_leaves_no_row() {
        let db = Database::open_in_memory().unwrap();
        {
            let conn = db.checkout().unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_insert AFTER INSERT ON decisions
                 BEGIN SELECT RAISE(ABORT, 'insert rejected'); END;",
            )
            .unwrap();
        }

        let store = DecisionStore::new(&db);
        assert!(store.record_decision("a", "b", true).is_err());
        assert_eq!(store.count_decisions().unwrap(), 0);
        assert!(store.get_decision("a", "b").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_keeps_previous_decision() {
        let db = Database::open_in_memory().unwrap();
        let store = DecisionStore::new(&db);
        store
            .record_decision_at("a", "b", true, Timestamp::from_unix_seconds(10))
            .unwrap();
        {
            let conn = db.checkout().unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_update AFTER UPDATE ON decisions
                 BEGIN SELECT RAISE(ABORT, 'update rejected'); END;",
            )
            .unwrap();
        }

        assert!(store
            .record_decision_at("a", "b", false, Timestamp::from_unix_seconds(20))
            .is_err());
        let kept = store.get_decision("a", "b").unwrap().unwrap();
        assert!(kept.liked);
        assert_eq!(kept.updated_at, Timestamp::from_unix_seconds(10));
        assert_eq!(store.count_decisions().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_reciprocal_likes_report_mutual_once() {
        let dir = TempDir::new().unwrap();
        let db = Arc::new(Database::open_with_pool_size(&dir.path().join("explore.db"), 2).unwrap());

        for round in 0..20 {
            let a = format!("a{}", round);
            let b = format!("b{}", round);
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = [(a.clone(), b.clone()), (b, a)]
                .into_iter()
                .map(|(actor, recipient)| {
                    let db = Arc::clone(&db);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        DecisionStore::new(&db).record_decision(&actor, &recipient, true).unwrap()
                    })
                })
                .collect();

            let mutuals = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|mutual| *mutual)
                .count();
            assert_eq!(mutuals, 1, "round {}", round);
        }
    }
}

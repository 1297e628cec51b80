//! Decision types
//!
//! A decision is the stored outcome of one actor looking at one recipient:
//! - `Decision`: the persisted row for an ordered `(actor, recipient)` pair
//! - `Liker`: the read model returned by liker queries
//! - `LikerPage`: one page of likers plus the resumption token

use crate::query::PageToken;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Point in time stored as microseconds since the Unix epoch.
///
/// Microsecond resolution keeps successive writes ordered; the public
/// read model only exposes whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Current wall-clock time. Clocks set before 1970 collapse to the epoch.
    pub fn now() -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self(micros)
    }

    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds.saturating_mul(MICROS_PER_SECOND))
    }

    pub fn as_micros(&self) -> i64 {
        self.0
    }

    /// Whole seconds since the epoch, clamped at zero
    pub fn unix_seconds(&self) -> u64 {
        (self.0.max(0) / MICROS_PER_SECOND) as u64
    }
}

/// A stored like/pass decision for an ordered pair.
///
/// `(actor_id, recipient_id)` and `(recipient_id, actor_id)` are distinct rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub actor_id: String,
    pub recipient_id: String,
    pub liked: bool,
    pub updated_at: Timestamp,
}

/// An actor who currently likes the queried recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liker {
    pub actor_id: String,
    pub unix_timestamp: u64,
}

impl Liker {
    pub fn new(actor_id: impl Into<String>, updated_at: Timestamp) -> Self {
        Self {
            actor_id: actor_id.into(),
            unix_timestamp: updated_at.unix_seconds(),
        }
    }
}

/// One page of a liker listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikerPage {
    pub likers: Vec<Liker>,
    /// Position of the first liker in the full listing
    pub offset: PageToken,
    /// Present only when the page came back full
    pub next_token: Option<PageToken>,
}

impl LikerPage {
    pub fn is_empty(&self) -> bool {
        self.likers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.likers.len()
    }

    pub fn actor_ids(&self) -> Vec<&str> {
        self.likers.iter().map(|l| l.actor_id.as_str()).collect()
    }
}

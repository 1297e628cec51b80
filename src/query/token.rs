//! Pagination tokens
//!
//! A token is the base-10 text of the row offset the next page starts at.
//! Clients treat it as opaque and hand it back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// How malformed tokens are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPolicy {
    /// Malformed or negative tokens restart from the first page
    #[default]
    Lenient,
    /// Malformed or negative tokens are rejected as invalid arguments
    Strict,
}

/// Resumption offset for a liker listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageToken(u64);

impl PageToken {
    /// The first page
    pub const START: PageToken = PageToken(0);

    pub fn from_offset(offset: u64) -> Self {
        Self(offset)
    }

    pub fn offset(&self) -> u64 {
        self.0
    }

    /// Decode a client-supplied token under `policy`.
    ///
    /// Absent and empty tokens always mean the first page.
    pub fn decode(token: Option<&str>, policy: TokenPolicy) -> Result<Self> {
        match (token, policy) {
            (None, _) => Ok(Self::START),
            (Some(""), _) => Ok(Self::START),
            (Some(raw), TokenPolicy::Lenient) => Ok(Self::decode_lenient(raw)),
            (Some(raw), TokenPolicy::Strict) => raw.parse(),
        }
    }

    /// Anything that is not a non-negative integer decodes to the first page
    pub fn decode_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::START)
    }

    /// Token for the page after one that started at `self` and held `limit` rows.
    ///
    /// `None` when the next offset would no longer fit the storage integer.
    pub fn advance(&self, limit: u64) -> Option<Self> {
        let next = self.0.checked_add(limit)?;
        i64::try_from(next).ok()?;
        Some(Self(next))
    }
}

impl FromStr for PageToken {
    type Err = Error;

    /// Strict parse: a decimal integer in `0..=i64::MAX`
    fn from_str(s: &str) -> Result<Self> {
        let offset: i64 = s
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("malformed pagination token: {:?}", s)))?;
        if offset < 0 {
            return Err(Error::InvalidArgument(format!("negative pagination token: {}", offset)));
        }
        Ok(Self(offset as u64))
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PageToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

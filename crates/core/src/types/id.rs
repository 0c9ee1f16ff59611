//! Quote identifiers.
//!
//! Quote IDs are integers taken from the creation timestamp in milliseconds,
//! bumped past the newest existing ID when the clock has not advanced.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a single quote.
///
/// Serializes as a bare integer so snapshots stay compatible with the
/// millisecond timestamps used as IDs.
///
/// ```
/// use quotedesk_core::QuoteId;
///
/// let id = QuoteId::new(1_700_000_123_456);
/// assert_eq!(id.short_number(), "123456");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(i64);

impl QuoteId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// ID for a quote created at `now`.
    #[must_use]
    pub fn from_timestamp(now: DateTime<Utc>) -> Self {
        Self(now.timestamp_millis())
    }

    /// The next ID strictly greater than `self`.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The last six digits, used as the human-facing quote number.
    #[must_use]
    pub fn short_number(&self) -> String {
        let digits = self.0.to_string();
        let start = digits.len().saturating_sub(6);
        digits.get(start..).unwrap_or(&digits).to_owned()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<QuoteId> for i64 {
    fn from(id: QuoteId) -> Self {
        id.0
    }
}

impl std::str::FromStr for QuoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

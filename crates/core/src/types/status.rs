//! Payment status of a quote.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown status string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid quote status: {0} (expected `unpaid` or `paid`)")]
pub struct ParseStatusError(pub String);

/// Payment state of a quote.
///
/// Quotes are created `Unpaid` and may only ever move to `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Unpaid,
    Paid,
}

/// Result of applying a status to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// The status moved from one value to another.
    Changed {
        /// Status before the change.
        from: QuoteStatus,
        /// Status after the change.
        to: QuoteStatus,
    },
    /// The quote already had the requested status.
    Unchanged(QuoteStatus),
}

impl QuoteStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }

    /// Title-case label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Paid => "Paid",
        }
    }

    /// Check whether `self -> to` is allowed.
    ///
    /// Returns `None` for the forbidden `Paid -> Unpaid` move.
    #[must_use]
    pub const fn transition(self, to: Self) -> Option<StatusChange> {
        match (self, to) {
            (Self::Paid, Self::Unpaid) => None,
            (Self::Unpaid, Self::Unpaid) | (Self::Paid, Self::Paid) => {
                Some(StatusChange::Unchanged(self))
            }
            (Self::Unpaid, Self::Paid) => Some(StatusChange::Changed { from: self, to }),
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            _ => Err(ParseStatusError(s.to_owned())),
        }
    }
}

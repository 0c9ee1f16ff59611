//! Dashboard filtering, search and aggregate figures.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quote::Quote;
use crate::types::{ParseStatusError, QuoteStatus};

/// Status selector for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(QuoteStatus),
}

impl StatusFilter {
    /// True when `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: QuoteStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Quotes whose customer or product contains `search` (case-insensitive)
/// and whose status passes `status`. Store order is preserved.
#[must_use]
pub fn filter<'a>(quotes: &'a [Quote], search: &str, status: StatusFilter) -> Vec<&'a Quote> {
    let needle = search.to_lowercase();
    quotes
        .iter()
        .filter(|q| {
            let matches_search = q.customer_name.to_lowercase().contains(&needle)
                || q.product_name.to_lowercase().contains(&needle);
            matches_search && status.matches(q.status)
        })
        .collect()
}

/// Aggregate figures shown above the quote list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of `total` over paid quotes.
    pub revenue: Decimal,
    /// Sum of `total` over unpaid quotes.
    pub pending: Decimal,
    /// Number of quotes.
    pub count: usize,
}

impl Summary {
    #[must_use]
    pub fn of(quotes: &[Quote]) -> Self {
        quotes.iter().fold(Self::default(), |mut acc, q| {
            match q.status {
                QuoteStatus::Paid => acc.revenue = acc.revenue.saturating_add(q.total),
                QuoteStatus::Unpaid => acc.pending = acc.pending.saturating_add(q.total),
            }
            acc.count += 1;
            acc
        })
    }
}

/// A filtered dashboard listing.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    /// Matching quotes in store order.
    pub quotes: Vec<&'a Quote>,
    /// Size of the unfiltered collection.
    pub total: usize,
    /// Aggregates over the unfiltered collection.
    pub summary: Summary,
}

impl<'a> FilteredView<'a> {
    /// Filter `quotes` and compute the dashboard figures.
    #[must_use]
    pub fn new(quotes: &'a [Quote], search: &str, status: StatusFilter) -> Self {
        Self {
            quotes: filter(quotes, search, status),
            total: quotes.len(),
            summary: Summary::of(quotes),
        }
    }

    /// Number of quotes shown.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.quotes.len()
    }

    /// `"Showing N of M quotes"`, or `None` when nothing is shown.
    #[must_use]
    pub fn results_line(&self) -> Option<String> {
        (!self.quotes.is_empty()).then(|| format!("Showing {} of {} quotes", self.shown(), self.total))
    }

    /// Message for an empty listing, or `None` when quotes are shown.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.quotes.is_empty() {
            None
        } else if self.total == 0 {
            Some("No quotes yet. Create your first quote to get started!")
        } else {
            Some("No quotes match. Try adjusting your search or filter criteria.")
        }
    }
}

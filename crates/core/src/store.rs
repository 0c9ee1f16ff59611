//! The ordered quote collection and its snapshot persistence.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::quote::Quote;
use crate::seed;
use crate::storage::{CORRUPT_QUOTES_KEY, QUOTES_KEY, Storage, StorageError};
use crate::types::{QuoteId, QuoteStatus, StatusChange};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No quote has this ID.
    #[error("quote {0} not found")]
    NotFound(QuoteId),

    /// The requested status change is not allowed.
    #[error("quote {id} is {from}; it cannot become {to}")]
    InvalidTransition {
        /// Quote being updated.
        id: QuoteId,
        /// Current status.
        from: QuoteStatus,
        /// Requested status.
        to: QuoteStatus,
    },

    /// A quote with this ID is already stored.
    #[error("quote {0} already exists")]
    DuplicateId(QuoteId),

    /// Seeding would replace existing quotes without confirmation.
    #[error("store holds {0} quotes; refusing to overwrite them without confirmation")]
    WouldOverwrite(usize),
}

/// What [`QuoteStore::load`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was read with this many quotes.
    Restored(usize),
    /// No snapshot exists yet.
    Missing,
    /// The snapshot could not be decoded; the store started empty.
    Corrupt {
        /// Decoder error message.
        reason: String,
        /// Whether the raw snapshot was copied to [`CORRUPT_QUOTES_KEY`].
        backed_up: bool,
    },
}

/// Quotes ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    #[must_use]
    pub const fn new() -> Self {
        Self { quotes: Vec::new() }
    }

    /// Wrap quotes that are already in newest-first order.
    #[must_use]
    pub const fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// Read the snapshot from `storage`.
    ///
    /// An undecodable snapshot is copied to [`CORRUPT_QUOTES_KEY`] and the
    /// store starts empty. Failing to write that copy is logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the snapshot cannot be read.
    pub fn load<S: Storage + ?Sized>(storage: &mut S) -> Result<(Self, LoadOutcome), StorageError> {
        let Some(raw) = storage.get(QUOTES_KEY)? else {
            debug!("no quote snapshot found");
            return Ok((Self::new(), LoadOutcome::Missing));
        };

        match serde_json::from_str::<Vec<Quote>>(&raw) {
            Ok(quotes) => {
                debug!(count = quotes.len(), "quote snapshot restored");
                let count = quotes.len();
                Ok((Self { quotes }, LoadOutcome::Restored(count)))
            }
            Err(e) => {
                warn!(error = %e, "quote snapshot is corrupt, starting empty");
                let backed_up = match storage.set(CORRUPT_QUOTES_KEY, &raw) {
                    Ok(()) => true,
                    Err(backup_error) => {
                        warn!(error = %backup_error, "could not keep a copy of the corrupt snapshot");
                        false
                    }
                };
                let outcome = LoadOutcome::Corrupt {
                    reason: e.to_string(),
                    backed_up,
                };
                Ok((Self::new(), outcome))
            }
        }
    }

    /// Write the whole collection as one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn persist_all<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.quotes)?;
        storage.set(QUOTES_KEY, &snapshot)?;
        debug!(count = self.quotes.len(), bytes = snapshot.len(), "quote snapshot written");
        Ok(())
    }

    /// Insert `quote` at the front.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if the ID is already present.
    pub fn append(&mut self, quote: Quote) -> Result<(), StoreError> {
        if self.get(quote.id).is_some() {
            return Err(StoreError::DuplicateId(quote.id));
        }
        self.quotes.insert(0, quote);
        Ok(())
    }

    /// Set the status of quote `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown ID and
    /// [`StoreError::InvalidTransition`] for `paid -> unpaid`.
    pub fn set_status(&mut self, id: QuoteId, status: QuoteStatus) -> Result<StatusChange, StoreError> {
        let quote = self
            .quotes
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let change = quote
            .status
            .transition(status)
            .ok_or(StoreError::InvalidTransition {
                id,
                from: quote.status,
                to: status,
            })?;
        quote.status = status;
        Ok(change)
    }

    /// Remove quote `id`, returning it if it was present.
    pub fn remove(&mut self, id: QuoteId) -> Option<Quote> {
        let index = self.quotes.iter().position(|q| q.id == id)?;
        Some(self.quotes.remove(index))
    }

    /// Remove every quote, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.quotes.len();
        self.quotes.clear();
        count
    }

    /// Replace the contents with demo quotes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WouldOverwrite`] when the store is not empty and
    /// `force` is false.
    pub fn seed_demo(&mut self, now: DateTime<Utc>, force: bool) -> Result<usize, StoreError> {
        if !self.quotes.is_empty() && !force {
            return Err(StoreError::WouldOverwrite(self.quotes.len()));
        }
        self.quotes = seed::demo_quotes(now);
        Ok(self.quotes.len())
    }

    /// ID for a quote created at `now`: the timestamp, or one past the
    /// newest stored ID if the clock has not moved beyond it.
    #[must_use]
    pub fn next_id(&self, now: DateTime<Utc>) -> QuoteId {
        let candidate = QuoteId::from_timestamp(now);
        match self.quotes.iter().map(|q| q.id).max() {
            Some(max) if candidate <= max => max.successor(),
            _ => candidate,
        }
    }

    #[must_use]
    pub fn get(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl<'a> IntoIterator for &'a QuoteStore {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::validation::QuoteForm;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn quote(id: i64, customer: &str) -> Quote {
        let form = QuoteForm {
            customer_name: customer.to_owned(),
            product_name: "Widget".to_owned(),
            quantity: "1".to_owned(),
            price_per_unit: "5".to_owned(),
            tax_rate: "0".to_owned(),
        };
        Quote::from_valid(QuoteId::new(id), form.validate().unwrap(), at(id))
    }

    #[test]
    fn test_append_prepends() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "first")).unwrap();
        store.append(quote(2, "second")).unwrap();
        let names: Vec<_> = store.iter().map(|q| q.customer_name.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        assert!(matches!(
            store.append(quote(1, "b")),
            Err(StoreError::DuplicateId(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_status_targets_one_record() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        store.append(quote(2, "b")).unwrap();
        let before = store.clone();

        let change = store.set_status(QuoteId::new(1), QuoteStatus::Paid).unwrap();
        assert!(matches!(change, StatusChange::Changed { .. }));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(QuoteId::new(2)), before.get(QuoteId::new(2)));
        let paid = store.get(QuoteId::new(1)).unwrap();
        let mut expected = before.get(QuoteId::new(1)).unwrap().clone();
        expected.status = QuoteStatus::Paid;
        assert_eq!(paid, &expected);
    }

    #[test]
    fn test_set_status_not_found_and_invalid() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        assert!(matches!(
            store.set_status(QuoteId::new(9), QuoteStatus::Paid),
            Err(StoreError::NotFound(_))
        ));
        store.set_status(QuoteId::new(1), QuoteStatus::Paid).unwrap();
        assert!(matches!(
            store.set_status(QuoteId::new(1), QuoteStatus::Unpaid),
            Err(StoreError::InvalidTransition { .. })
        ));
        assert_eq!(
            store.set_status(QuoteId::new(1), QuoteStatus::Paid).unwrap(),
            StatusChange::Unchanged(QuoteStatus::Paid)
        );
    }

    #[test]
    fn test_remove() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        store.append(quote(2, "b")).unwrap();
        let removed = store.remove(QuoteId::new(1)).unwrap();
        assert_eq!(removed.customer_name, "a");
        assert_eq!(store.len(), 1);
        assert!(store.get(QuoteId::new(1)).is_none());

        let before = store.clone();
        assert!(store.remove(QuoteId::new(42)).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_persist_then_load() {
        let mut storage = MemoryStorage::new();
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        store.append(quote(2, "b")).unwrap();
        store.persist_all(&mut storage).unwrap();

        let (loaded, outcome) = QuoteStore::load(&mut storage).unwrap();
        assert_eq!(outcome, LoadOutcome::Restored(2));
        assert_eq!(loaded, store);
        assert_eq!(loaded.as_slice().first().unwrap().id, QuoteId::new(2));
    }

    #[test]
    fn test_load_missing() {
        let mut storage = MemoryStorage::new();
        let (store, outcome) = QuoteStore::load(&mut storage).unwrap();
        assert!(store.is_empty());
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn test_load_corrupt_keeps_copy() {
        let mut storage = MemoryStorage::new();
        storage.set(QUOTES_KEY, "[{not json").unwrap();
        let (store, outcome) = QuoteStore::load(&mut storage).unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            outcome,
            LoadOutcome::Corrupt {
                backed_up: true,
                ..
            }
        ));
        assert_eq!(
            storage.get(CORRUPT_QUOTES_KEY).unwrap().as_deref(),
            Some("[{not json")
        );
    }

    #[test]
    fn test_load_corrupt_without_room_for_copy() {
        let raw = "[{not json";
        let mut storage = MemoryStorage::with_quota(QUOTES_KEY.len() + raw.len() + 4);
        storage.set(QUOTES_KEY, raw).unwrap();

        let (store, outcome) = QuoteStore::load(&mut storage).unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            outcome,
            LoadOutcome::Corrupt {
                backed_up: false,
                ..
            }
        ));
        assert_eq!(storage.get(CORRUPT_QUOTES_KEY).unwrap(), None);
        assert_eq!(storage.get(QUOTES_KEY).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_load_browser_snapshot_with_blank_tax_rate() {
        let raw = r#"[
            {"id": 1700000000002, "customerName": "Globex", "productName": "Gadget",
             "quantity": "1", "pricePerUnit": "8", "taxRate": "",
             "subtotal": 8, "tax": 0, "total": 8,
             "status": "unpaid", "createdAt": "2023-11-14T22:13:20.002Z"},
            {"id": 1700000000001, "customerName": "Acme", "productName": "Widget",
             "quantity": "2", "pricePerUnit": "10.00", "taxRate": "10",
             "subtotal": 20, "tax": 2, "total": 22,
             "status": "paid", "createdAt": "2023-11-14T22:13:20.001Z"}
        ]"#;
        let mut storage = MemoryStorage::new();
        storage.set(QUOTES_KEY, raw).unwrap();

        let (store, outcome) = QuoteStore::load(&mut storage).unwrap();
        assert_eq!(outcome, LoadOutcome::Restored(2));
        let first = store.as_slice().first().unwrap();
        assert!(first.tax_rate.is_zero());
        assert_eq!(first.total, first.subtotal + first.tax);
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let mut store = QuoteStore::new();
        assert_eq!(store.next_id(at(1_000)), QuoteId::new(1_000));
        store.append(quote(5_000, "a")).unwrap();
        assert_eq!(store.next_id(at(1_000)), QuoteId::new(5_001));
        assert_eq!(store.next_id(at(5_000)), QuoteId::new(5_001));
        assert_eq!(store.next_id(at(9_000)), QuoteId::new(9_000));
    }

    #[test]
    fn test_seed_demo_refuses_to_overwrite() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "mine")).unwrap();
        assert!(matches!(
            store.seed_demo(at(1_700_000_000_000), false),
            Err(StoreError::WouldOverwrite(1))
        ));
        assert_eq!(store.len(), 1);

        let seeded = store.seed_demo(at(1_700_000_000_000), true).unwrap();
        assert_eq!(seeded, store.len());
        assert!(store.iter().all(|q| q.customer_name != "mine"));
    }

    #[test]
    fn test_clear() {
        let mut store = QuoteStore::new();
        store.append(quote(1, "a")).unwrap();
        assert_eq!(store.clear(), 1);
        assert!(store.is_empty());
    }
}

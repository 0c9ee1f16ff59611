//! Application state: the quote store, theme preference and current view.
//!
//! Every mutation is applied in memory first and then persisted. A failed
//! write does not undo the mutation; it is reported back as a warning so the
//! caller can show a non-fatal notice.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::quote::Quote;
use crate::storage::{Storage, StorageError, THEME_KEY};
use crate::store::{LoadOutcome, QuoteStore, StoreError};
use crate::types::{QuoteId, QuoteStatus, StatusChange, Theme};
use crate::validation::ValidQuote;

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    CreateQuote,
}

/// Options for [`AppState::open`].
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Seed demo quotes when storage has no snapshot at all.
    pub seed_on_first_run: bool,
    /// Clock reading used for seeding.
    pub now: DateTime<Utc>,
}

/// Result of a mutation that has been applied in memory.
#[derive(Debug)]
#[must_use]
pub struct Committed<T> {
    /// Value produced by the mutation.
    pub value: T,
    /// Set when the follow-up write to storage failed.
    pub warning: Option<StorageError>,
}

impl<T> Committed<T> {
    const fn saved(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

/// Explicit replacement for ambient UI globals.
#[derive(Debug)]
pub struct AppState<S> {
    storage: S,
    store: QuoteStore,
    theme: Theme,
    view: View,
}

impl<S: Storage> AppState<S> {
    /// Load quotes and theme from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn open(mut storage: S, options: OpenOptions) -> Result<(Self, LoadOutcome), StorageError> {
        let (mut store, outcome) = QuoteStore::load(&mut storage)?;

        let theme = match storage.get(THEME_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        if outcome == LoadOutcome::Missing && options.seed_on_first_run {
            // An empty store cannot refuse seeding.
            if let Ok(count) = store.seed_demo(options.now, false) {
                info!(count, "seeded demo quotes on first run");
                if let Err(e) = store.persist_all(&mut storage) {
                    warn!(error = %e, "failed to persist demo quotes");
                }
            }
        }

        Ok((
            Self {
                storage,
                store,
                theme,
                view: View::Dashboard,
            },
            outcome,
        ))
    }

    #[must_use]
    pub const fn store(&self) -> &QuoteStore {
        &self.store
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    pub const fn navigate(&mut self, view: View) {
        self.view = view;
    }

    /// Create, prepend and persist a quote from validated input, then return
    /// to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] only if ID assignment collides,
    /// which `next_id` rules out.
    pub fn create_quote(
        &mut self,
        input: ValidQuote,
        now: DateTime<Utc>,
    ) -> Result<Committed<Quote>, StoreError> {
        let id = self.store.next_id(now);
        let quote = Quote::from_valid(id, input, now);
        self.store.append(quote.clone())?;
        info!(id = %quote.id, total = %quote.total, "quote created");
        self.view = View::Dashboard;
        Ok(self.commit(quote))
    }

    /// Mark quote `id` as paid.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown ID.
    pub fn mark_paid(&mut self, id: QuoteId) -> Result<Committed<StatusChange>, StoreError> {
        let change = self.store.set_status(id, QuoteStatus::Paid)?;
        match change {
            StatusChange::Changed { .. } => {
                info!(%id, "quote marked as paid");
                Ok(self.commit(change))
            }
            StatusChange::Unchanged(_) => Ok(Committed::saved(change)),
        }
    }

    /// Delete quote `id`. The caller is responsible for confirming first.
    pub fn delete_quote(&mut self, id: QuoteId) -> Committed<Option<Quote>> {
        match self.store.remove(id) {
            Some(quote) => {
                info!(%id, "quote deleted");
                self.commit(Some(quote))
            }
            None => Committed::saved(None),
        }
    }

    /// Replace the store with demo quotes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WouldOverwrite`] when quotes exist and `force`
    /// is false.
    pub fn seed_demo(&mut self, now: DateTime<Utc>, force: bool) -> Result<Committed<usize>, StoreError> {
        let count = self.store.seed_demo(now, force)?;
        info!(count, "demo quotes seeded");
        Ok(self.commit(count))
    }

    /// Delete every quote.
    pub fn clear(&mut self) -> Committed<usize> {
        let count = self.store.clear();
        info!(count, "quotes cleared");
        self.commit(count)
    }

    /// Store a new theme preference.
    pub fn set_theme(&mut self, theme: Theme) -> Committed<Theme> {
        self.theme = theme;
        let warning = self.storage.set(THEME_KEY, theme.as_str()).err();
        if let Some(e) = &warning {
            warn!(error = %e, "failed to persist theme");
        }
        Committed {
            value: theme,
            warning,
        }
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Committed<Theme> {
        self.set_theme(self.theme.toggled())
    }

    /// Consume the state, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit<T>(&mut self, value: T) -> Committed<T> {
        let warning = self.store.persist_all(&mut self.storage).err();
        if let Some(e) = &warning {
            warn!(error = %e, "failed to persist quotes; changes are kept in memory only");
        }
        Committed { value, warning }
    }
}

//! Quotedesk Core - quote calculation, storage and filtering.
//!
//! This crate provides everything the `quotedesk` CLI needs except I/O:
//! - [`calculator`] - subtotal/tax/total arithmetic and live preview
//! - [`validation`] - strict form validation with field-level errors
//! - [`store`] - the newest-first quote collection and its JSON snapshot
//! - [`filter`] - dashboard search, status filter and aggregates
//! - [`export`] - CSV rendering
//! - [`state`] - application state that persists after every mutation
//!
//! # Architecture
//!
//! Durable storage is reached only through the [`Storage`] trait. The CLI
//! provides a file-backed implementation; [`MemoryStorage`] serves tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod calculator;
pub mod export;
pub mod filter;
pub mod quote;
pub mod seed;
pub mod state;
pub mod storage;
pub mod store;
pub mod types;
pub mod validation;

pub use calculator::Totals;
pub use filter::{FilteredView, StatusFilter, Summary};
pub use quote::Quote;
pub use state::{AppState, Committed, OpenOptions, View};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{LoadOutcome, QuoteStore, StoreError};
pub use types::*;
pub use validation::{Field, FieldError, FormErrors, QuoteForm, ValidQuote};

//! Core types for quotedesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;
pub mod theme;

pub use id::QuoteId;
pub use money::Money;
pub use status::{ParseStatusError, QuoteStatus, StatusChange};
pub use theme::{ParseThemeError, Theme};

//! Integration tests for Quotedesk.
//!
//! The tests in `tests/` drive `quotedesk-core` end to end through
//! [`MemoryStorage`](quotedesk_core::MemoryStorage): create, persist, reload,
//! pay, delete, filter and export.

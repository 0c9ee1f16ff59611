//! CLI command implementations.
//!
//! Each command works on an [`AppState`](quotedesk_core::AppState) and a
//! [`Console`](crate::console::Console), never on stdin/stdout directly.

pub mod dashboard;
pub mod export;
pub mod quote;
pub mod seed;
pub mod theme;

use std::io::{self, BufRead, Write};

use quotedesk_core::StorageError;

use crate::console::Console;

/// Tell the user a change was applied but could not be saved.
fn report_unsaved<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    warning: Option<StorageError>,
) -> io::Result<()> {
    match warning {
        Some(StorageError::QuotaExceeded { .. }) => {
            console.notice("Storage is full; this change is kept for this session only.")
        }
        Some(e) => console.notice(format!("Could not save changes: {e}")),
        None => Ok(()),
    }
}

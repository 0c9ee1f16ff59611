//! Demo seeding and clearing the store.

use std::io::{BufRead, Write};

use chrono::Utc;
use quotedesk_core::{AppState, Storage};

use super::report_unsaved;
use crate::console::Console;
use crate::error::CliError;

/// Replace the store with demo quotes.
///
/// A non-empty store is only overwritten after confirmation, or when
/// `assume_yes` is set.
///
/// # Errors
///
/// Returns an error if the console fails.
pub fn seed<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    assume_yes: bool,
) -> Result<(), CliError> {
    let existing = state.store().len();
    if existing > 0 && !assume_yes {
        let question = format!("Replace {existing} existing quotes with demo data?");
        if !console.confirm(&question)? {
            console.say("Cancelled.")?;
            return Ok(());
        }
    }

    let committed = state.seed_demo(Utc::now(), true)?;
    console.say(format!("Seeded {} demo quotes.", committed.value))?;
    report_unsaved(console, committed.warning)?;
    Ok(())
}

/// Delete every quote after confirmation, unless `assume_yes` is set.
///
/// # Errors
///
/// Returns an error if the console fails.
pub fn clear<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    assume_yes: bool,
) -> Result<(), CliError> {
    let existing = state.store().len();
    if existing == 0 {
        console.say("No quotes to clear.")?;
        return Ok(());
    }
    if !assume_yes && !console.confirm(&format!("Delete all {existing} quotes?"))? {
        console.say("Cancelled.")?;
        return Ok(());
    }

    let committed = state.clear();
    console.say(format!("Deleted {} quotes.", committed.value))?;
    report_unsaved(console, committed.warning)?;
    Ok(())
}

//! Theme preference.

use std::io::{BufRead, Write};

use quotedesk_core::{AppState, Storage, Theme};

use super::report_unsaved;
use crate::console::Console;
use crate::error::CliError;

/// What to do with the theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

/// Show, set or toggle the stored theme.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn run<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    action: ThemeAction,
) -> Result<(), CliError> {
    let committed = match action {
        ThemeAction::Show => {
            console.say(format!("Theme: {}", state.theme()))?;
            return Ok(());
        }
        ThemeAction::Set(theme) => state.set_theme(theme),
        ThemeAction::Toggle => state.toggle_theme(),
    };
    console.say(format!("Theme set to {}.", committed.value))?;
    report_unsaved(console, committed.warning)?;
    Ok(())
}

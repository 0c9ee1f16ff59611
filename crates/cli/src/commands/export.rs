//! CSV export of every stored quote.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use quotedesk_core::{AppState, Storage, export};
use tracing::info;

use crate::console::Console;
use crate::error::CliError;

/// Write all quotes as CSV to `out`, or to `quotes-<today>.csv` in the
/// working directory. Returns the path written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn run<S: Storage, R: BufRead, W: Write>(
    state: &AppState<S>,
    console: &mut Console<R, W>,
    out: Option<&Path>,
) -> Result<PathBuf, CliError> {
    let path = out.map_or_else(
        || PathBuf::from(export::file_name(Local::now().date_naive())),
        Path::to_path_buf,
    );
    let csv = export::to_csv(state.store(), &Local);
    std::fs::write(&path, csv)?;

    info!(path = %path.display(), count = state.store().len(), "quotes exported");
    console.say(format!(
        "Exported {} quotes to {}",
        state.store().len(),
        path.display()
    ))?;
    Ok(path)
}

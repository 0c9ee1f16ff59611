//! Dashboard listing with search and status filter.

use std::io::{BufRead, Write};

use chrono::Local;
use quotedesk_core::{AppState, FilteredView, StatusFilter, Storage, View};
use serde_json::json;

use crate::console::Console;
use crate::error::CliError;
use crate::render;

/// Print the dashboard figures and the matching quotes.
///
/// With `as_json`, prints `{"summary": .., "showing": .., "total": .., "quotes": [..]}`
/// instead.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn list<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    search: &str,
    status: StatusFilter,
    as_json: bool,
) -> Result<(), CliError> {
    state.navigate(View::Dashboard);
    let view = FilteredView::new(state.store().as_slice(), search, status);

    if as_json {
        let body = json!({
            "summary": view.summary,
            "showing": view.shown(),
            "total": view.total,
            "quotes": view.quotes,
        });
        console.say(serde_json::to_string_pretty(&body)?)?;
    } else {
        console.say(render::dashboard(&view, &Local))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quotedesk_core::QuoteStatus;

    use super::*;
    use crate::commands::testing::{console, demo_state, empty_state, output};

    #[test]
    fn test_list_filters_by_status() {
        let mut state = demo_state();
        let mut c = console("");
        list(&mut state, &mut c, "", StatusFilter::Only(QuoteStatus::Paid), false).unwrap();
        let out = output(c);
        assert!(out.contains("[Paid]"));
        assert!(!out.contains("[Unpaid]"));
        assert!(out.contains("Showing 2 of 5 quotes"));
    }

    #[test]
    fn test_list_search_no_match() {
        let mut state = demo_state();
        let mut c = console("");
        list(&mut state, &mut c, "zzz-nothing", StatusFilter::All, false).unwrap();
        assert!(output(c).contains("No quotes match."));
    }

    #[test]
    fn test_list_empty_store() {
        let mut state = empty_state();
        let mut c = console("");
        list(&mut state, &mut c, "", StatusFilter::All, false).unwrap();
        assert!(output(c).contains("No quotes yet."));
    }

    #[test]
    fn test_list_json() {
        let mut state = demo_state();
        let mut c = console("");
        list(&mut state, &mut c, "acme", StatusFilter::All, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output(c)).unwrap();
        assert_eq!(value["showing"], 1);
        assert_eq!(value["total"], 5);
        assert_eq!(value["quotes"][0]["customerName"], "Acme Corporation");
        assert_eq!(value["summary"]["count"], 5);
    }
}

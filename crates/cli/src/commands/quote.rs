//! Creating, inspecting, paying and deleting single quotes.

use std::io::{BufRead, Write};
use std::time::Duration;

use chrono::{Local, Utc};
use quotedesk_core::{
    AppState, QuoteForm, QuoteId, StatusChange, Storage, StoreError, View, calculator,
};
use tracing::debug;

use super::report_unsaved;
use crate::console::Console;
use crate::error::CliError;
use crate::render;

/// Form values given on the command line. Missing ones are prompted for.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub price_per_unit: Option<String>,
    pub tax_rate: Option<String>,
}

/// Fill in the quote form, validate it and commit the quote after
/// `submit_delay`.
///
/// With `interactive` off, missing fields stay blank and fail validation.
/// Every invalid field is listed before the error is returned.
///
/// # Errors
///
/// Returns [`CliError::InvalidForm`] when the form does not validate, or an
/// I/O error from the console.
pub async fn create<S, R, W>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    draft: Draft,
    interactive: bool,
    submit_delay: Duration,
) -> Result<QuoteId, CliError>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    state.navigate(View::CreateQuote);
    let form = fill_form(console, draft, interactive)?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            for error in errors.iter() {
                console.say(format!("  - {error}"))?;
            }
            state.navigate(View::Dashboard);
            return Err(errors.into());
        }
    };

    console.say("Generating quote...")?;
    tokio::time::sleep(submit_delay).await;

    let committed = state.create_quote(valid, Utc::now())?;
    console.say("Quote created.")?;
    console.say(render::quote_card(&committed.value, &Local))?;
    report_unsaved(console, committed.warning)?;
    Ok(committed.value.id)
}

fn fill_form<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    draft: Draft,
    interactive: bool,
) -> Result<QuoteForm, CliError> {
    let mut form = QuoteForm::default();
    let mut prompted_numbers = false;

    let mut value = |given: Option<String>, label: &str, numeric: bool| -> Result<String, CliError> {
        match given {
            Some(v) => Ok(v),
            None if interactive => {
                prompted_numbers |= numeric;
                Ok(console.ask(label)?)
            }
            None => Ok(String::new()),
        }
    };

    form.customer_name = value(draft.customer_name, "Customer name", false)?;
    form.product_name = value(draft.product_name, "Product name", false)?;
    form.quantity = value(draft.quantity, "Quantity", true)?;
    form.price_per_unit = value(draft.price_per_unit, "Price per unit", true)?;
    let tax_rate = draft
        .tax_rate
        .or_else(|| (!interactive).then(|| form.tax_rate.clone()));
    form.tax_rate = value(tax_rate, "Tax rate (%)", true)?;

    if prompted_numbers {
        console.say(render::preview(&form.preview(), &form.tax_rate))?;
    }
    debug!(customer = %form.customer_name, "quote form filled");
    Ok(form)
}

/// Print the lenient live preview for raw field text.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn preview<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    quantity: &str,
    price_per_unit: &str,
    tax_rate: &str,
) -> Result<(), CliError> {
    let totals = calculator::preview(quantity, price_per_unit, tax_rate);
    console.say(render::preview(&totals, tax_rate))?;
    Ok(())
}

/// Print one quote.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for an unknown ID.
pub fn show<S: Storage, R: BufRead, W: Write>(
    state: &AppState<S>,
    console: &mut Console<R, W>,
    id: QuoteId,
) -> Result<(), CliError> {
    let quote = state.store().get(id).ok_or(StoreError::NotFound(id))?;
    console.say(render::quote_card(quote, &Local))?;
    Ok(())
}

/// Mark a quote as paid.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for an unknown ID.
pub fn pay<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    id: QuoteId,
) -> Result<(), CliError> {
    let committed = state.mark_paid(id)?;
    match committed.value {
        StatusChange::Changed { .. } => {
            console.say(format!("Quote #{} marked as paid.", id.short_number()))?;
        }
        StatusChange::Unchanged(_) => {
            console.say(format!("Quote #{} is already paid.", id.short_number()))?;
        }
    }
    report_unsaved(console, committed.warning)?;
    Ok(())
}

/// Delete a quote after confirmation, unless `assume_yes` is set.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for an unknown ID.
pub fn delete<S: Storage, R: BufRead, W: Write>(
    state: &mut AppState<S>,
    console: &mut Console<R, W>,
    id: QuoteId,
    assume_yes: bool,
) -> Result<(), CliError> {
    let customer = state
        .store()
        .get(id)
        .map(|q| q.customer_name.clone())
        .ok_or(StoreError::NotFound(id))?;

    let question = format!(
        "Delete quote #{} for {customer}? This cannot be undone.",
        id.short_number()
    );
    if !assume_yes && !console.confirm(&question)? {
        console.say("Cancelled.")?;
        return Ok(());
    }

    let committed = state.delete_quote(id);
    if committed.value.is_some() {
        console.say(format!("Deleted quote #{}.", id.short_number()))?;
    }
    report_unsaved(console, committed.warning)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quotedesk_core::{Field, MemoryStorage, QuoteStatus, storage::QUOTES_KEY};
    use rust_decimal::Decimal;

    use super::*;
    use crate::commands::testing::{console, demo_state, empty_state, open, output};

    fn draft(quantity: &str, price: &str, tax: &str) -> Draft {
        Draft {
            customer_name: Some("Acme".to_owned()),
            product_name: Some("Widget".to_owned()),
            quantity: Some(quantity.to_owned()),
            price_per_unit: Some(price.to_owned()),
            tax_rate: Some(tax.to_owned()),
        }
    }

    #[tokio::test]
    async fn test_create_from_flags() {
        let mut state = empty_state();
        let mut c = console("");
        let id = create(&mut state, &mut c, draft("2", "10", "10"), false, Duration::ZERO)
            .await
            .unwrap();

        let quote = state.store().get(id).unwrap();
        assert_eq!(quote.total, Decimal::new(22, 0));
        assert_eq!(state.view(), View::Dashboard);
        assert!(state.storage().get(QUOTES_KEY).unwrap().is_some());

        let out = output(c);
        assert!(out.contains("Generating quote..."));
        assert!(out.contains("Total:     $22.00"));
        assert!(!out.contains("! "));
    }

    #[tokio::test]
    async fn test_create_prompts_for_missing_fields() {
        let mut state = empty_state();
        let mut c = console("Globex\nGadget\n3\n5\n\n");
        let id = create(&mut state, &mut c, Draft::default(), true, Duration::ZERO)
            .await
            .unwrap();

        let quote = state.store().get(id).unwrap();
        assert_eq!(quote.customer_name, "Globex");
        assert_eq!(quote.total, Decimal::new(15, 0));

        let out = output(c);
        assert!(out.contains("Quote Preview"));
        assert!(out.contains("Subtotal:  $15.00"));
    }

    #[tokio::test]
    async fn test_create_reports_every_invalid_field() {
        let mut state = empty_state();
        let mut c = console("");
        let mut d = draft("0", "-1", "150");
        d.customer_name = Some("  ".to_owned());
        let err = create(&mut state, &mut c, d, false, Duration::ZERO)
            .await
            .unwrap_err();

        let CliError::InvalidForm(errors) = err else {
            panic!("expected form errors, got {err:?}");
        };
        assert_eq!(errors.len(), 4);
        assert!(errors.for_field(Field::ProductName).is_none());
        assert!(state.store().is_empty());
        assert_eq!(state.view(), View::Dashboard);
        assert!(output(c).contains("  - Customer name is required"));
    }

    #[tokio::test]
    async fn test_create_keeps_quote_when_storage_is_full() {
        let mut state = open(MemoryStorage::with_quota(16), false);
        let mut c = console("");
        let id = create(&mut state, &mut c, draft("1", "1", "0"), false, Duration::ZERO)
            .await
            .unwrap();

        assert!(state.store().get(id).is_some());
        assert!(output(c).contains("! Storage is full"));
    }

    #[test]
    fn test_preview_is_lenient() {
        let mut c = console("");
        preview(&mut c, "2abc", "", "x").unwrap();
        let out = output(c);
        assert!(out.contains("Subtotal:  $0.00"));
        assert!(out.contains("Tax (x%): $0.00"));
    }

    #[test]
    fn test_pay_twice() {
        let mut state = demo_state();
        let id = state
            .store()
            .iter()
            .find(|q| q.status == QuoteStatus::Unpaid)
            .unwrap()
            .id;
        let mut c = console("");
        pay(&mut state, &mut c, id).unwrap();
        pay(&mut state, &mut c, id).unwrap();

        assert!(state.store().get(id).unwrap().is_paid());
        let out = output(c);
        assert!(out.contains("marked as paid."));
        assert!(out.contains("is already paid."));
    }

    #[test]
    fn test_pay_unknown() {
        let mut state = empty_state();
        let err = pay(&mut state, &mut console(""), QuoteId::new(42)).unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = demo_state();
        let id = state.store().as_slice().first().unwrap().id;
        let before = state.store().len();

        let mut c = console("n\n");
        delete(&mut state, &mut c, id, false).unwrap();
        assert_eq!(state.store().len(), before);
        assert!(output(c).contains("Cancelled."));

        let mut c = console("y\n");
        delete(&mut state, &mut c, id, false).unwrap();
        assert_eq!(state.store().len(), before - 1);
        assert!(state.store().get(id).is_none());
    }

    #[test]
    fn test_delete_with_yes_skips_prompt() {
        let mut state = demo_state();
        let id = state.store().as_slice().first().unwrap().id;
        let mut c = console("");
        delete(&mut state, &mut c, id, true).unwrap();
        assert!(state.store().get(id).is_none());
        assert!(!output(c).contains("[y/N]"));
    }

    #[test]
    fn test_show_unknown() {
        let state = empty_state();
        let err = show(&state, &mut console(""), QuoteId::new(7)).unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::NotFound(_))));
    }
}

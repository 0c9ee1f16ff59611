//! Plain-text rendering of quotes and dashboard figures.

use std::fmt::Display;

use chrono::TimeZone;
use quotedesk_core::{FilteredView, Money, Quote, Summary, Totals};
use rust_decimal::Decimal;

/// Live preview block shown while filling in the form.
#[must_use]
pub fn preview(totals: &Totals, tax_rate_text: &str) -> String {
    let rate = if tax_rate_text.trim().is_empty() {
        "0"
    } else {
        tax_rate_text.trim()
    };
    format!(
        "Quote Preview\n  Subtotal:  {}\n  Tax ({rate}%): {}\n  Total:     {}",
        Money(totals.subtotal),
        Money(totals.tax),
        Money(totals.total),
    )
}

/// One quote as a card.
#[must_use]
pub fn quote_card<Tz>(quote: &Quote, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = quote.created_at.with_timezone(tz).format("%b %-d, %Y");
    let mut card = format!(
        "Quote #{}  [{}]  {date}\n  Customer:  {}\n  Product:   {}\n  Quantity:  {} x {}\n  Subtotal:  {}\n",
        quote.short_number(),
        quote.status.label(),
        quote.customer_name,
        quote.product_name,
        quote.quantity.normalize(),
        Money(quote.price_per_unit),
        Money(quote.subtotal),
    );
    if quote.tax > Decimal::ZERO {
        card.push_str(&format!(
            "  Tax ({}%): {}\n",
            quote.tax_rate.normalize(),
            Money(quote.tax)
        ));
    }
    card.push_str(&format!(
        "  Total:     {}\n  ID:        {}",
        Money(quote.total),
        quote.id
    ));
    card
}

/// Revenue / pending / count line.
#[must_use]
pub fn summary(summary: &Summary) -> String {
    format!(
        "Total Revenue: {}   Pending Amount: {}   Total Quotes: {}",
        Money(summary.revenue),
        Money(summary.pending),
        summary.count
    )
}

/// Full dashboard listing.
#[must_use]
pub fn dashboard<Tz>(view: &FilteredView<'_>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = summary(&view.summary);
    out.push_str("\n\n");
    if let Some(message) = view.empty_message() {
        out.push_str(message);
        return out;
    }
    for quote in &view.quotes {
        out.push_str(&quote_card(quote, tz));
        out.push_str("\n\n");
    }
    if let Some(line) = view.results_line() {
        out.push_str(&line);
    }
    out
}

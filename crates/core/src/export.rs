//! CSV export of the quote list.

use core::fmt::Display;

use chrono::{NaiveDate, TimeZone};

use crate::quote::Quote;
use crate::types::Money;

/// Header row of the export.
pub const CSV_HEADER: [&str; 9] = [
    "Invoice ID",
    "Customer",
    "Product",
    "Quantity",
    "Price",
    "Tax Rate",
    "Total",
    "Status",
    "Date",
];

/// Render `quotes` as CSV, one row per quote in the given order.
///
/// Dates are rendered as `M/D/YYYY` in `tz`.
#[must_use]
pub fn to_csv<'a, I, Tz>(quotes: I, tz: &Tz) -> String
where
    I: IntoIterator<Item = &'a Quote>,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().map(|h| (*h).to_owned()));
    for quote in quotes {
        let date = quote.created_at.with_timezone(tz).format("%-m/%-d/%Y");
        push_row(
            &mut out,
            [
                quote.id.to_string(),
                quote.customer_name.clone(),
                quote.product_name.clone(),
                quote.quantity.normalize().to_string(),
                Money::fixed(quote.price_per_unit),
                format!("{}%", quote.tax_rate.normalize()),
                Money::fixed(quote.total),
                quote.status.to_string(),
                date.to_string(),
            ],
        );
    }
    out
}

/// Export file name for `today`, e.g. `quotes-2024-03-09.csv`.
#[must_use]
pub fn file_name(today: NaiveDate) -> String {
    format!("quotes-{}.csv", today.format("%Y-%m-%d"))
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(&field));
    }
    out.push('\n');
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

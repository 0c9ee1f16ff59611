//! Demo quotes for first-run onboarding.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::calculator::compute;
use crate::quote::Quote;
use crate::types::{QuoteId, QuoteStatus};

/// (customer, product, quantity, price in cents, tax rate, days ago, paid)
const DEMO_ROWS: &[(&str, &str, i64, i64, i64, i64, bool)] = &[
    ("Northwind Traders", "Annual support plan", 1, 240_000, 8, 1, false),
    ("Acme Corporation", "Widget", 25, 1_250, 10, 3, true),
    ("Globex", "Consulting hours", 12, 15_000, 0, 6, false),
    ("Initech", "TPS report binders", 40, 399, 7, 10, true),
    ("Umbrella Health", "Lab equipment lease", 2, 87_500, 18, 14, false),
];

/// Example quotes, newest first, dated relative to `now`.
#[must_use]
pub fn demo_quotes(now: DateTime<Utc>) -> Vec<Quote> {
    DEMO_ROWS
        .iter()
        .map(|&(customer, product, quantity, cents, rate, days_ago, paid)| {
            let created_at = now - Duration::days(days_ago);
            let quantity = Decimal::from(quantity);
            let price_per_unit = Decimal::new(cents, 2);
            let tax_rate = Decimal::from(rate);
            let totals = compute(quantity, price_per_unit, tax_rate);
            Quote {
                id: QuoteId::from_timestamp(created_at),
                customer_name: customer.to_owned(),
                product_name: product.to_owned(),
                quantity,
                price_per_unit,
                tax_rate,
                subtotal: totals.subtotal,
                tax: totals.tax,
                total: totals.total,
                status: if paid {
                    QuoteStatus::Paid
                } else {
                    QuoteStatus::Unpaid
                },
                created_at,
            }
        })
        .collect()
}

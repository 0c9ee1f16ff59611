//! The quote record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::calculator::{self, Totals};
use crate::types::{QuoteId, QuoteStatus};
use crate::validation::ValidQuote;

/// A billing record for one customer/product/quantity transaction.
///
/// Serialized with camelCase keys. Decimal fields are written as strings and
/// read from either strings or JSON numbers. The form fields (`quantity`,
/// `pricePerUnit`, `taxRate`) also accept a blank string, read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub customer_name: String,
    pub product_name: String,
    #[serde(deserialize_with = "form_decimal")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "form_decimal")]
    pub price_per_unit: Decimal,
    /// Percent, `0..=100`.
    #[serde(deserialize_with = "form_decimal")]
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Build a new unpaid quote from validated input.
    #[must_use]
    pub fn from_valid(id: QuoteId, input: ValidQuote, created_at: DateTime<Utc>) -> Self {
        let Totals {
            subtotal,
            tax,
            total,
        } = input.totals();
        let quantity = input.quantity();
        let price_per_unit = input.price_per_unit();
        let tax_rate = input.tax_rate();
        let (customer_name, product_name) = input.into_names();
        Self {
            id,
            customer_name,
            product_name,
            quantity,
            price_per_unit,
            tax_rate,
            subtotal,
            tax,
            total,
            status: QuoteStatus::Unpaid,
            created_at,
        }
    }

    /// Amounts as stored on the record.
    #[must_use]
    pub const fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        }
    }

    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == QuoteStatus::Paid
    }

    /// Human-facing quote number (last six digits of the ID).
    #[must_use]
    pub fn short_number(&self) -> String {
        self.id.short_number()
    }
}

/// Decimal stored from raw form text: a number, a numeric string, or blank.
fn form_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(Decimal),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) if text.trim().is_empty() => Ok(Decimal::ZERO),
        Raw::Text(text) => calculator::parse_strict(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid number `{text}`"))),
    }
}

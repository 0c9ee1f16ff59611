//! Quote form input and boundary validation.
//!
//! A [`QuoteForm`] holds exactly what the user typed. Only
//! [`QuoteForm::validate`] can turn it into a [`ValidQuote`], the sole input
//! accepted when creating a [`crate::Quote`].

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{self, Totals};

/// Largest quantity or unit price accepted on submission.
pub const MAX_NUMERIC_INPUT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A field of the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    CustomerName,
    ProductName,
    Quantity,
    PricePerUnit,
    TaxRate,
}

impl Field {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CustomerName => "Customer name",
            Self::ProductName => "Product name",
            Self::Quantity => "Quantity",
            Self::PricePerUnit => "Price per unit",
            Self::TaxRate => "Tax rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single field-level validation failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is blank after trimming.
    #[error("{field} is required")]
    Required {
        /// Offending field.
        field: Field,
    },
    /// The text is not a number.
    #[error("{field} must be a number")]
    NotANumber {
        /// Offending field.
        field: Field,
    },
    /// The number must be strictly positive.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// Offending field.
        field: Field,
    },
    /// The number is outside an inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Offending field.
        field: Field,
        /// Inclusive lower bound.
        min: Decimal,
        /// Inclusive upper bound.
        max: Decimal,
    },
    /// The number exceeds [`MAX_NUMERIC_INPUT`].
    #[error("{field} must be at most {max}")]
    TooLarge {
        /// Offending field.
        field: Field,
        /// Largest accepted value.
        max: Decimal,
    },
}

impl FieldError {
    /// The field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Required { field }
            | Self::NotANumber { field }
            | Self::NotPositive { field }
            | Self::OutOfRange { field, .. }
            | Self::TooLarge { field, .. } => *field,
        }
    }
}

/// Every validation failure found in one form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// The error for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// Iterate over all errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of invalid fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the form is valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0.len() == 1 { "field" } else { "fields" };
        write!(f, "{} invalid {noun}", self.0.len())?;
        for (i, error) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Raw text of the quote form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteForm {
    pub customer_name: String,
    pub product_name: String,
    pub quantity: String,
    pub price_per_unit: String,
    pub tax_rate: String,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            product_name: String::new(),
            quantity: String::new(),
            price_per_unit: String::new(),
            tax_rate: "0".to_owned(),
        }
    }
}

impl QuoteForm {
    /// Lenient live preview of the current input.
    #[must_use]
    pub fn preview(&self) -> Totals {
        calculator::preview(&self.quantity, &self.price_per_unit, &self.tax_rate)
    }

    /// Clear every field back to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Strictly validate the form.
    ///
    /// # Errors
    ///
    /// Returns every field violation found:
    /// - blank customer or product name
    /// - quantity or price missing, not a number, not positive, or too large
    /// - tax rate not a number or outside `0..=100` (blank means 0)
    pub fn validate(&self) -> Result<ValidQuote, FormErrors> {
        let mut errors = FormErrors::default();

        let customer_name = required_text(Field::CustomerName, &self.customer_name, &mut errors);
        let product_name = required_text(Field::ProductName, &self.product_name, &mut errors);
        let quantity = positive_number(Field::Quantity, &self.quantity, &mut errors);
        let price_per_unit = positive_number(Field::PricePerUnit, &self.price_per_unit, &mut errors);
        let tax_rate = tax_rate(&self.tax_rate, &mut errors);

        match (customer_name, product_name, quantity, price_per_unit, tax_rate) {
            (Some(customer_name), Some(product_name), Some(quantity), Some(price_per_unit), Some(tax_rate))
                if errors.is_empty() =>
            {
                Ok(ValidQuote {
                    customer_name,
                    product_name,
                    quantity,
                    price_per_unit,
                    tax_rate,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(field: Field, raw: &str, errors: &mut FormErrors) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::Required { field });
        return None;
    }
    Some(trimmed.to_owned())
}

fn positive_number(field: Field, raw: &str, errors: &mut FormErrors) -> Option<Decimal> {
    if raw.trim().is_empty() {
        errors.push(FieldError::Required { field });
        return None;
    }
    let Some(value) = calculator::parse_strict(raw) else {
        errors.push(FieldError::NotANumber { field });
        return None;
    };
    if value <= Decimal::ZERO {
        errors.push(FieldError::NotPositive { field });
        return None;
    }
    if value > MAX_NUMERIC_INPUT {
        errors.push(FieldError::TooLarge {
            field,
            max: MAX_NUMERIC_INPUT,
        });
        return None;
    }
    Some(value)
}

fn tax_rate(raw: &str, errors: &mut FormErrors) -> Option<Decimal> {
    if raw.trim().is_empty() {
        return Some(Decimal::ZERO);
    }
    let Some(value) = calculator::parse_strict(raw) else {
        errors.push(FieldError::NotANumber {
            field: Field::TaxRate,
        });
        return None;
    };
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        errors.push(FieldError::OutOfRange {
            field: Field::TaxRate,
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
        return None;
    }
    Some(value)
}

/// Form input that passed validation.
///
/// Names are trimmed; numbers are within their accepted ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuote {
    customer_name: String,
    product_name: String,
    quantity: Decimal,
    price_per_unit: Decimal,
    tax_rate: Decimal,
}

impl ValidQuote {
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    #[must_use]
    pub const fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Committed amounts for this input.
    #[must_use]
    pub fn totals(&self) -> Totals {
        calculator::compute(self.quantity, self.price_per_unit, self.tax_rate)
    }

    pub(crate) fn into_names(self) -> (String, String) {
        (self.customer_name, self.product_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(customer: &str, product: &str, qty: &str, price: &str, tax: &str) -> QuoteForm {
        QuoteForm {
            customer_name: customer.to_owned(),
            product_name: product.to_owned(),
            quantity: qty.to_owned(),
            price_per_unit: price.to_owned(),
            tax_rate: tax.to_owned(),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = form(" Acme ", "Widget", "2", "10.00", "10").validate().unwrap();
        assert_eq!(valid.customer_name(), "Acme");
        assert_eq!(valid.quantity(), Decimal::from(2));
        assert_eq!(valid.totals().total, Decimal::from(22));
    }

    #[test]
    fn test_default_form_has_zero_tax() {
        assert_eq!(QuoteForm::default().tax_rate, "0");
    }

    #[test]
    fn test_blank_tax_is_zero() {
        let valid = form("Acme", "Widget", "1", "5", "  ").validate().unwrap();
        assert!(valid.tax_rate().is_zero());
    }

    #[test]
    fn test_collects_all_errors() {
        let errors = QuoteForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(
            errors.for_field(Field::CustomerName),
            Some(FieldError::Required { .. })
        ));
        assert!(matches!(
            errors.for_field(Field::PricePerUnit),
            Some(FieldError::Required { .. })
        ));
        assert!(errors.for_field(Field::TaxRate).is_none());
    }

    #[test]
    fn test_whitespace_names_are_required() {
        let errors = form("   ", "\t", "1", "1", "0").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_non_positive_numbers() {
        let errors = form("A", "B", "0", "-1", "0").validate().unwrap_err();
        assert_eq!(
            errors.for_field(Field::Quantity),
            Some(&FieldError::NotPositive {
                field: Field::Quantity
            })
        );
        assert_eq!(
            errors.for_field(Field::PricePerUnit),
            Some(&FieldError::NotPositive {
                field: Field::PricePerUnit
            })
        );
    }

    #[test]
    fn test_unparseable_numbers_block_submission() {
        let errors = form("A", "B", "2x", "10", "ten").validate().unwrap_err();
        assert!(matches!(
            errors.for_field(Field::Quantity),
            Some(FieldError::NotANumber { .. })
        ));
        assert!(matches!(
            errors.for_field(Field::TaxRate),
            Some(FieldError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_preview_stays_lenient_for_invalid_input() {
        let f = form("A", "B", "2x", "10", "0");
        assert!(f.validate().is_err());
        assert_eq!(f.preview().total, Decimal::from(20));
    }

    #[test]
    fn test_tax_rate_range() {
        assert!(form("A", "B", "1", "1", "100").validate().is_ok());
        assert!(form("A", "B", "1", "1", "0").validate().is_ok());
        let errors = form("A", "B", "1", "1", "100.01").validate().unwrap_err();
        assert!(matches!(
            errors.for_field(Field::TaxRate),
            Some(FieldError::OutOfRange { .. })
        ));
        assert!(form("A", "B", "1", "1", "-1").validate().is_err());
    }

    #[test]
    fn test_too_large() {
        let errors = form("A", "B", "1000000001", "1", "0").validate().unwrap_err();
        assert!(matches!(
            errors.for_field(Field::Quantity),
            Some(FieldError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let errors = form("", "B", "1", "1", "200").validate().unwrap_err();
        assert_eq!(
            errors.to_string(),
            "2 invalid fields: Customer name is required; Tax rate must be between 0 and 100"
        );
    }

    #[test]
    fn test_reset() {
        let mut f = form("A", "B", "1", "1", "5");
        f.reset();
        assert_eq!(f, QuoteForm::default());
    }
}

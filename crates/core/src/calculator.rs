//! Quote total computation.
//!
//! `compute` is the single source of subtotal/tax/total arithmetic. The live
//! preview parses its inputs leniently (anything unreadable counts as zero)
//! while submission goes through [`crate::validation`], which is strict.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived amounts for one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// `quantity * price_per_unit`.
    pub subtotal: Decimal,
    /// `subtotal * tax_rate / 100`.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

/// Compute subtotal, tax and total.
///
/// Arithmetic saturates instead of panicking, so the function is total over
/// any decimal input. Validated quotes stay far below the saturation point.
///
/// ```
/// use quotedesk_core::calculator::compute;
/// use rust_decimal::Decimal;
///
/// let t = compute(Decimal::from(2), Decimal::new(1000, 2), Decimal::from(10));
/// assert_eq!(t.subtotal, Decimal::from(20));
/// assert_eq!(t.tax, Decimal::from(2));
/// assert_eq!(t.total, Decimal::from(22));
/// ```
#[must_use]
pub fn compute(quantity: Decimal, price_per_unit: Decimal, tax_rate: Decimal) -> Totals {
    let subtotal = quantity.saturating_mul(price_per_unit);
    let tax = subtotal.saturating_mul(tax_rate / Decimal::ONE_HUNDRED);
    let total = subtotal.saturating_add(tax);
    Totals {
        subtotal,
        tax,
        total,
    }
}

/// Live preview over raw text inputs. Never fails.
#[must_use]
pub fn preview(quantity: &str, price_per_unit: &str, tax_rate: &str) -> Totals {
    compute(
        parse_lenient(quantity),
        parse_lenient(price_per_unit),
        parse_lenient(tax_rate),
    )
}

/// Parse the leading number of `text`, or zero if there is none.
///
/// Mirrors how a browser number field is read for preview: `"12abc"` is 12,
/// `"abc"` and `""` are 0.
#[must_use]
pub fn parse_lenient(text: &str) -> Decimal {
    scan_number(text.trim_start()).map_or(Decimal::ZERO, |(value, _)| value)
}

/// Parse `text` as a complete number.
///
/// Returns `None` when the trimmed text is empty or has trailing garbage.
#[must_use]
pub fn parse_strict(text: &str) -> Option<Decimal> {
    let text = text.trim();
    match scan_number(text) {
        Some((value, consumed)) if consumed == text.len() => Some(value),
        _ => None,
    }
}

/// Maximum power of ten accepted in an exponent.
const MAX_EXPONENT: u32 = 28;

/// Scan a leading `[+-]digits[.digits][e[+-]digits]` number.
///
/// Returns the value and the number of bytes consumed.
fn scan_number(s: &str) -> Option<(Decimal, usize)> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let int_digits = s.get(int_start..end)?;

    let mut frac_digits = "";
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        frac_digits = s.get(frac_start..frac_end)?;
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            end = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut normalized = String::with_capacity(end + 2);
    if negative {
        normalized.push('-');
    }
    normalized.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_digits);
    }
    let mut value: Decimal = normalized.parse().ok()?;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            let exponent: i32 = s.get(end + 1..exp_end)?.parse().ok()?;
            value = scale_by_power_of_ten(value, exponent)?;
            end = exp_end;
        }
    }

    Some((value, end))
}

fn scale_by_power_of_ten(mut value: Decimal, exponent: i32) -> Option<Decimal> {
    if exponent.unsigned_abs() > MAX_EXPONENT {
        return None;
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }
    Some(value.normalize())
}

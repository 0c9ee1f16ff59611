//! Currency display for decimal amounts.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// A currency amount formatted for display (e.g. `$19.99`).
///
/// Amounts are stored unrounded; rounding to cents happens only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Decimal);

impl Money {
    /// Round to two decimal places, half away from zero.
    #[must_use]
    pub fn cents(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format as a plain two-decimal string without the currency symbol.
    #[must_use]
    pub fn fixed(amount: Decimal) -> String {
        format!("{:.2}", Self::cents(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_sign_negative() && !self.0.is_zero() {
            write!(f, "-${}", Self::fixed(self.0.abs()))
        } else {
            write!(f, "${}", Self::fixed(self.0))
        }
    }
}

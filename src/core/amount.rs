use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Numeric type used for monetary and percentage arithmetic.
///
/// `Decimal` is the exact path used for documents. `f64` reproduces the
/// floating-point behaviour of the desktop renderer and is kept for
/// comparison with figures it already printed.
pub trait Amount:
    Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display + Serialize + Send + Sync
{
    const ZERO: Self;
    const HUNDRED: Self;

    /// Parse a user-entered numeric string.
    ///
    /// Returns `None` for empty, non-numeric, non-finite or out-of-range input.
    /// Decimal rejects exponents below its 28-digit scale (`"1e-40"`) that f64
    /// still represents.
    fn parse_amount(raw: &str) -> Option<Self>;

    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    /// `self * (percent / 100)`
    fn percent(self, percent: Self) -> Self;

    /// Canonical form used as a grouping key (`19.0` -> `19`, `-0` -> `0`).
    fn normalized(self) -> Self;

    fn is_negative(self) -> bool {
        self < Self::ZERO
    }
}

impl Amount for Decimal {
    const ZERO: Self = Decimal::ZERO;
    const HUNDRED: Self = Decimal::ONE_HUNDRED;

    fn parse_amount(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        // from_str accepts `_` digit separators, f64 does not.
        if trimmed.is_empty() || trimmed.contains('_') {
            return None;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }

    // Arithmetic saturates at the Decimal bounds instead of panicking.
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }

    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }

    fn percent(self, percent: Self) -> Self {
        self.saturating_mul(percent / Decimal::ONE_HUNDRED)
    }

    fn normalized(self) -> Self {
        self.normalize()
    }
}

impl Amount for f64 {
    const ZERO: Self = 0.0;
    const HUNDRED: Self = 100.0;

    fn parse_amount(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Rust's float parser accepts "inf" and "NaN", which are not amounts.
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn percent(self, percent: Self) -> Self {
        self * (percent / 100.0)
    }

    fn normalized(self) -> Self {
        if self == 0.0 {
            0.0
        } else {
            self
        }
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a document can be issued in, with their display precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Tunisian Dinar (3 decimal places, millimes)
    #[default]
    TND,
    /// Euro (2 decimal places)
    EUR,
    /// US Dollar (2 decimal places)
    USD,
}

impl Currency {
    /// Returns the decimal scale for this currency
    /// - TND: 3
    /// - EUR/USD: 2
    pub fn scale(&self) -> u32 {
        match self {
            Currency::TND => 3,
            Currency::EUR | Currency::USD => 2,
        }
    }

    /// Rounds an amount to this currency's scale.
    ///
    /// Invoices use commercial rounding (half away from zero), not banker's rounding.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{} {:.width$}",
            self,
            self.round(amount),
            width = self.scale() as usize
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::TND => write!(f, "TND"),
            Currency::EUR => write!(f, "EUR"),
            Currency::USD => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TND" => Ok(Currency::TND),
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

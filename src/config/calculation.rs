use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};
use crate::modules::invoices::ParsePolicy;

/// Number representation used for the tax summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arithmetic {
    /// Exact decimal arithmetic
    #[default]
    Decimal,
    /// Binary floating point, matching figures printed by the old renderer
    Float,
}

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arithmetic::Decimal => write!(f, "decimal"),
            Arithmetic::Float => write!(f, "float"),
        }
    }
}

impl FromStr for Arithmetic {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decimal" => Ok(Arithmetic::Decimal),
            "float" | "f64" => Ok(Arithmetic::Float),
            _ => Err(format!("Invalid arithmetic: {}", s)),
        }
    }
}

/// Settings for document calculations
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CalculationConfig {
    pub arithmetic: Arithmetic,
    pub parse_policy: ParsePolicy,
    pub default_currency: Currency,
}

impl CalculationConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(CalculationConfig {
            arithmetic: parse_var(&lookup, "INTEGRA_ARITHMETIC")?.unwrap_or_default(),
            parse_policy: parse_var(&lookup, "INTEGRA_PARSE_POLICY")?.unwrap_or_default(),
            default_currency: parse_var(&lookup, "INTEGRA_DEFAULT_CURRENCY")?.unwrap_or_default(),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|e| AppError::configuration(format!("Invalid {}: {}", key, e))),
        _ => Ok(None),
    }
}

// Line items as entered on an invoice or quote form.
//
// The form keeps every numeric field as the text the user typed, so a
// `LineItem` is raw input. Turning it into numbers is an explicit step:
// `parse` fails on the first bad field, `parse_lenient` substitutes zero
// and reports what it substituted.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::Amount;

/// A product or service row, exactly as supplied by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Display label, passed through untouched
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "raw_number")]
    pub quantity: String,

    #[serde(default, deserialize_with = "raw_number")]
    pub unit_price: String,

    /// Tax rate as a percentage, e.g. "19" for 19%
    #[serde(default, deserialize_with = "raw_number")]
    pub tax_rate_percent: String,

    /// Amount before tax and before the document discount (THT)
    #[serde(
        rename = "tht",
        alias = "preTaxAmount",
        default,
        deserialize_with = "raw_number"
    )]
    pub pre_tax_amount: String,

    /// Tax-inclusive amount (TTC), informational only
    #[serde(
        rename = "ttc",
        alias = "postTaxAmount",
        default,
        deserialize_with = "raw_number"
    )]
    pub post_tax_amount: String,
}

/// Numeric fields that take part in the tax calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItemField {
    TaxRatePercent,
    PreTaxAmount,
}

impl fmt::Display for LineItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineItemField::TaxRatePercent => write!(f, "taxRatePercent"),
            LineItemField::PreTaxAmount => write!(f, "preTaxAmount"),
        }
    }
}

/// Why a line item field was rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    #[error("{field} is not a number: {value:?}")]
    Unparsable { field: LineItemField, value: String },

    #[error("{field} cannot be negative, got: {value}")]
    Negative { field: LineItemField, value: String },
}

impl LineItemError {
    pub fn field(&self) -> LineItemField {
        match self {
            LineItemError::Unparsable { field, .. } | LineItemError::Negative { field, .. } => *field,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            LineItemError::Unparsable { value, .. } | LineItemError::Negative { value, .. } => value,
        }
    }
}

/// A line item reduced to the numbers the tax summary needs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLineItem<A: Amount = Decimal> {
    pub name: String,
    pub tax_rate: A,
    pub pre_tax_amount: A,
}

impl<A: Amount> ParsedLineItem<A> {
    pub fn new(name: impl Into<String>, tax_rate: A, pre_tax_amount: A) -> Self {
        Self {
            name: name.into(),
            tax_rate,
            pre_tax_amount,
        }
    }
}

impl LineItem {
    /// Create a line item from its label, tax rate and pre-tax amount
    pub fn new(
        name: impl Into<String>,
        tax_rate_percent: impl Into<String>,
        pre_tax_amount: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tax_rate_percent: tax_rate_percent.into(),
            pre_tax_amount: pre_tax_amount.into(),
            ..Self::default()
        }
    }

    /// Attach the informational quantity and unit price
    pub fn with_pricing(mut self, quantity: impl Into<String>, unit_price: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self.unit_price = unit_price.into();
        self
    }

    /// Attach the informational tax-inclusive amount
    pub fn with_post_tax_amount(mut self, post_tax_amount: impl Into<String>) -> Self {
        self.post_tax_amount = post_tax_amount.into();
        self
    }

    /// Parse the tax rate and pre-tax amount, rejecting unparsable or negative values
    pub fn parse<A: Amount>(&self) -> Result<ParsedLineItem<A>, LineItemError> {
        let tax_rate = parse_strict(LineItemField::TaxRatePercent, &self.tax_rate_percent)?;
        let pre_tax_amount = parse_strict(LineItemField::PreTaxAmount, &self.pre_tax_amount)?;

        Ok(ParsedLineItem::new(self.name.clone(), tax_rate, pre_tax_amount))
    }

    /// Parse like the document renderer always has: unparsable fields become zero.
    ///
    /// Negative values are kept as-is. Every substituted field is returned
    /// alongside the parsed item.
    pub fn parse_lenient<A: Amount>(&self) -> (ParsedLineItem<A>, Vec<LineItemError>) {
        let mut coerced = Vec::new();
        let tax_rate = parse_or_zero(
            LineItemField::TaxRatePercent,
            &self.tax_rate_percent,
            &mut coerced,
        );
        let pre_tax_amount = parse_or_zero(
            LineItemField::PreTaxAmount,
            &self.pre_tax_amount,
            &mut coerced,
        );

        (
            ParsedLineItem::new(self.name.clone(), tax_rate, pre_tax_amount),
            coerced,
        )
    }
}

fn parse_strict<A: Amount>(field: LineItemField, raw: &str) -> Result<A, LineItemError> {
    let value = A::parse_amount(raw).ok_or_else(|| LineItemError::Unparsable {
        field,
        value: raw.to_string(),
    })?;

    if value.is_negative() {
        return Err(LineItemError::Negative {
            field,
            value: raw.trim().to_string(),
        });
    }

    Ok(value)
}

fn parse_or_zero<A: Amount>(
    field: LineItemField,
    raw: &str,
    coerced: &mut Vec<LineItemError>,
) -> A {
    match A::parse_amount(raw) {
        Some(value) => value,
        None => {
            coerced.push(LineItemError::Unparsable {
                field,
                value: raw.to_string(),
            });
            A::ZERO
        }
    }
}

/// Accept a JSON string, number or null for a raw numeric field
pub(crate) fn raw_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a number or numeric string, got {}",
            other
        ))),
    }
}

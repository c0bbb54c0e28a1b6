use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

use super::line_item::{raw_number, LineItem, LineItemError, LineItemField};
use crate::core::{Amount, Currency, Result};
use crate::modules::taxes::models::{TaxSummary, TaxTotals};

/// Kind of commercial document being totalled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    #[serde(alias = "facture")]
    Invoice,
    #[serde(alias = "devis")]
    Quote,
}

/// Document as submitted by the invoice or quote editor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    #[serde(default)]
    pub kind: DocumentKind,

    /// Falls back to the configured default currency when absent
    #[serde(default)]
    pub currency: Option<Currency>,

    /// Global discount in percent; empty means no discount
    #[serde(default, deserialize_with = "raw_number")]
    pub discount_percentage: String,

    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl DocumentRequest {
    pub fn new(kind: DocumentKind, items: Vec<LineItem>) -> Self {
        Self {
            kind,
            items,
            ..Self::default()
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_discount(mut self, discount_percentage: impl Into<String>) -> Self {
        self.discount_percentage = discount_percentage.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// A field that was replaced by zero while summarizing a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedField {
    /// Position of the line item in the request
    pub index: usize,
    pub name: String,
    pub field: LineItemField,
    pub value: String,
}

impl RejectedField {
    pub fn new(index: usize, name: &str, error: &LineItemError) -> Self {
        Self {
            index,
            name: name.to_string(),
            field: error.field(),
            value: error.value().to_string(),
        }
    }
}

/// Everything the document template needs for its tax table and totals block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary<A: Amount = Decimal> {
    pub kind: DocumentKind,
    pub currency: Currency,
    pub discount_percentage: A,
    pub tax_summary: TaxSummary<A>,
    pub totals: TaxTotals<A>,
    pub rejected_items: Vec<RejectedField>,
}

impl DocumentSummary<Decimal> {
    /// Copy with every amount rounded to the document currency
    pub fn rounded(&self) -> Self {
        Self {
            kind: self.kind,
            currency: self.currency,
            discount_percentage: self.discount_percentage,
            tax_summary: self.tax_summary.rounded(self.currency),
            totals: self.totals.rounded(self.currency),
            rejected_items: self.rejected_items.clone(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::AppError;
use crate::core::{Amount, Currency};
use crate::modules::invoices::models::{
    DocumentRequest, DocumentSummary, LineItem, ParsedLineItem, RejectedField,
};
use crate::modules::taxes::services::TaxSummaryAggregator;

/// How malformed numbers in a document are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Replace unparsable numbers with zero and report them
    #[default]
    Lenient,
    /// Reject the document on the first invalid number or out-of-range discount
    Strict,
}

impl fmt::Display for ParsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePolicy::Lenient => write!(f, "lenient"),
            ParsePolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ParsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ParsePolicy::Lenient),
            "strict" => Ok(ParsePolicy::Strict),
            _ => Err(format!("Invalid parse policy: {}", s)),
        }
    }
}

/// Turns an invoice or quote request into its tax table and totals
pub struct DocumentService {
    aggregator: TaxSummaryAggregator,
    policy: ParsePolicy,
    default_currency: Currency,
}

impl DocumentService {
    pub fn new(policy: ParsePolicy, default_currency: Currency) -> Self {
        Self {
            aggregator: TaxSummaryAggregator::new(),
            policy,
            default_currency,
        }
    }

    /// Summarize a document
    pub fn summarize<A: Amount>(&self, request: &DocumentRequest) -> Result<DocumentSummary<A>, AppError> {
        let currency = request.currency.unwrap_or(self.default_currency);
        let discount_percentage = self.parse_discount::<A>(&request.discount_percentage)?;

        let (tax_summary, rejected_items) = match self.policy {
            ParsePolicy::Lenient => {
                let (items, rejected) = parse_lenient(&request.items);
                (self.aggregator.aggregate_parsed(&items, discount_percentage), rejected)
            }
            ParsePolicy::Strict => (
                self.aggregator
                    .aggregate_strict(&request.items, discount_percentage)?,
                Vec::new(),
            ),
        };
        let totals = tax_summary.totals();

        tracing::debug!(
            kind = ?request.kind,
            %currency,
            items = request.items.len(),
            rates = tax_summary.len(),
            rejected = rejected_items.len(),
            "Document summarized"
        );

        Ok(DocumentSummary {
            kind: request.kind,
            currency,
            discount_percentage,
            tax_summary,
            totals,
            rejected_items,
        })
    }

    /// Empty means no discount. Range is only enforced under the strict policy.
    fn parse_discount<A: Amount>(&self, raw: &str) -> Result<A, AppError> {
        if raw.trim().is_empty() {
            return Ok(A::ZERO);
        }

        let discount = A::parse_amount(raw).ok_or_else(|| {
            AppError::validation(format!("Discount percentage is not a number: {:?}", raw))
        })?;

        if self.policy == ParsePolicy::Strict && (discount < A::ZERO || discount > A::HUNDRED) {
            return Err(AppError::validation(format!(
                "Discount percentage must be between 0 and 100, got: {}",
                discount
            )));
        }

        Ok(discount)
    }
}

fn parse_lenient<A: Amount>(items: &[LineItem]) -> (Vec<ParsedLineItem<A>>, Vec<RejectedField>) {
    let mut parsed = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let (parsed_item, coerced) = item.parse_lenient();
        for error in &coerced {
            tracing::warn!(
                index,
                name = %item.name,
                field = %error.field(),
                value = error.value(),
                "Line item value is not a number, counting it as zero"
            );
            rejected.push(RejectedField::new(index, &item.name, error));
        }
        parsed.push(parsed_item);
    }

    (parsed, rejected)
}

use crate::core::error::AppError;
use crate::core::Amount;
use crate::modules::invoices::models::{LineItem, ParsedLineItem};
use crate::modules::taxes::models::TaxSummary;

/// Groups line items by tax rate and accumulates discounted bases and taxes.
///
/// Pure: no I/O, no logging, no configuration. The discount percentage is
/// applied as given, so values outside 0..=100 are not clamped.
pub struct TaxSummaryAggregator;

impl TaxSummaryAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate raw line items; unparsable numbers count as zero
    pub fn aggregate<A: Amount>(&self, items: &[LineItem], discount_percentage: A) -> TaxSummary<A> {
        let parsed: Vec<ParsedLineItem<A>> = items
            .iter()
            .map(|item| item.parse_lenient().0)
            .collect();

        self.aggregate_parsed(&parsed, discount_percentage)
    }

    /// Aggregate raw line items, failing on the first one that does not parse
    pub fn aggregate_strict<A: Amount>(
        &self,
        items: &[LineItem],
        discount_percentage: A,
    ) -> Result<TaxSummary<A>, AppError> {
        let parsed = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.parse()
                    .map_err(|source| AppError::invalid_line_item(index, source))
            })
            .collect::<Result<Vec<ParsedLineItem<A>>, AppError>>()?;

        Ok(self.aggregate_parsed(&parsed, discount_percentage))
    }

    /// Single pass over already-parsed items
    pub fn aggregate_parsed<A: Amount>(
        &self,
        items: &[ParsedLineItem<A>],
        discount_percentage: A,
    ) -> TaxSummary<A> {
        let mut summary = TaxSummary::new();

        for item in items {
            let discount_amount = item.pre_tax_amount.percent(discount_percentage);
            let taxable_base = item.pre_tax_amount.sub(discount_amount);
            let tax = taxable_base.percent(item.tax_rate);

            summary.bucket_mut(item.tax_rate).accumulate(
                item.pre_tax_amount,
                discount_amount,
                taxable_base,
                tax,
            );
        }

        summary
    }
}

impl Default for TaxSummaryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

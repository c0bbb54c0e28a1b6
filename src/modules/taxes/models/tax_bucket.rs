use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{Amount, Currency};

/// Running totals for every line item sharing one tax rate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBucket<A: Amount = Decimal> {
    /// Sum of pre-tax amounts after the document discount
    pub taxable_base: A,
    /// Sum of tax computed on the discounted base
    pub tax_amount: A,
    /// Sum of pre-tax amounts before the discount
    pub total_pre_tax: A,
    /// Sum of the discount removed from each line
    pub total_discount: A,
    /// Same figure as `tax_amount`; the document template reads this name
    pub total_tax: A,
}

impl<A: Amount> TaxBucket<A> {
    pub(crate) fn accumulate(&mut self, pre_tax_amount: A, discount_amount: A, taxable_base: A, tax: A) {
        self.taxable_base = self.taxable_base.add(taxable_base);
        self.tax_amount = self.tax_amount.add(tax);
        self.total_pre_tax = self.total_pre_tax.add(pre_tax_amount);
        self.total_discount = self.total_discount.add(discount_amount);
        self.total_tax = self.total_tax.add(tax);
    }
}

impl TaxBucket<Decimal> {
    /// Round every figure to the currency's display precision
    pub fn rounded(&self, currency: Currency) -> Self {
        Self {
            taxable_base: currency.round(self.taxable_base),
            tax_amount: currency.round(self.tax_amount),
            total_pre_tax: currency.round(self.total_pre_tax),
            total_discount: currency.round(self.total_discount),
            total_tax: currency.round(self.total_tax),
        }
    }
}

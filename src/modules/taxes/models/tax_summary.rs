use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use super::TaxBucket;
use crate::core::{Amount, Currency};

/// Tax buckets keyed by numeric tax rate, in the order rates were first seen
///
/// Serializes as a JSON object keyed by the rate (`{"19": {...}, "7": {...}}`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaxSummary<A: Amount = Decimal> {
    buckets: Vec<(A, TaxBucket<A>)>,
}

/// Document-level totals derived from a tax summary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxTotals<A: Amount = Decimal> {
    /// Total HT before discount
    pub total_pre_tax: A,
    pub total_discount: A,
    /// Total HT after discount
    pub net_pre_tax: A,
    /// Total TVA
    pub total_tax: A,
    /// Total TTC
    pub total_with_tax: A,
}

impl<A: Amount> TaxSummary<A> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Bucket for `rate`, created empty if the rate has not been seen yet
    pub(crate) fn bucket_mut(&mut self, rate: A) -> &mut TaxBucket<A> {
        let key = rate.normalized();
        let index = match self.buckets.iter().position(|(existing, _)| *existing == key) {
            Some(index) => index,
            None => {
                self.buckets.push((key, TaxBucket::default()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[index].1
    }

    pub fn get(&self, rate: A) -> Option<&TaxBucket<A>> {
        let key = rate.normalized();
        self.buckets
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, bucket)| bucket)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (A, &TaxBucket<A>)> + '_ {
        self.buckets.iter().map(|(rate, bucket)| (*rate, bucket))
    }

    pub fn rates(&self) -> Vec<A> {
        self.buckets.iter().map(|(rate, _)| *rate).collect()
    }

    /// Buckets ordered by ascending rate, the order the summary table is printed in
    pub fn sorted_by_rate(&self) -> Vec<(A, TaxBucket<A>)> {
        let mut sorted = self.buckets.clone();
        sorted.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        sorted
    }

    pub fn totals(&self) -> TaxTotals<A> {
        let mut totals: TaxTotals<A> = TaxTotals::default();
        for (_, bucket) in &self.buckets {
            totals.total_pre_tax = totals.total_pre_tax.add(bucket.total_pre_tax);
            totals.total_discount = totals.total_discount.add(bucket.total_discount);
            totals.net_pre_tax = totals.net_pre_tax.add(bucket.taxable_base);
            totals.total_tax = totals.total_tax.add(bucket.total_tax);
        }
        totals.total_with_tax = totals.net_pre_tax.add(totals.total_tax);
        totals
    }
}

impl TaxSummary<Decimal> {
    /// Round every bucket to the currency's display precision
    pub fn rounded(&self, currency: Currency) -> Self {
        Self {
            buckets: self
                .buckets
                .iter()
                .map(|(rate, bucket)| (*rate, bucket.rounded(currency)))
                .collect(),
        }
    }
}

impl TaxTotals<Decimal> {
    /// Round for display; TTC is rebuilt from the rounded HT and TVA so the printed lines add up
    pub fn rounded(&self, currency: Currency) -> Self {
        let net_pre_tax = currency.round(self.net_pre_tax);
        let total_tax = currency.round(self.total_tax);
        Self {
            total_pre_tax: currency.round(self.total_pre_tax),
            total_discount: currency.round(self.total_discount),
            net_pre_tax,
            total_tax,
            total_with_tax: net_pre_tax + total_tax,
        }
    }
}

impl<A: Amount> Serialize for TaxSummary<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (rate, bucket) in &self.buckets {
            map.serialize_entry(&rate.to_string(), bucket)?;
        }
        map.end()
    }
}

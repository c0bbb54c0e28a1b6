// Property-based tests for the tax summary
//
// Properties tested:
// 1. Total pre-tax across buckets equals the sum of all line amounts
// 2. Within a bucket, taxable base + discount = pre-tax total
// 3. Bucket count equals the number of distinct rates
// 4. Item order only changes bucket order, never bucket contents
// 5. Float and decimal arithmetic agree within tolerance

use integra::invoices::LineItem;
use integra::taxes::TaxSummaryAggregator;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashSet;

const RATES: [&str; 5] = ["0", "7", "13", "19", "19.0"];

/// (rate index, amount in millimes)
fn line_items() -> impl Strategy<Value = Vec<(usize, u64)>> {
    prop::collection::vec((0usize..RATES.len(), 0u64..10_000_000u64), 0..20)
}

fn build_items(raw: &[(usize, u64)]) -> Vec<LineItem> {
    raw.iter()
        .enumerate()
        .map(|(i, (rate, millimes))| {
            LineItem::new(
                format!("Article {}", i),
                RATES[*rate],
                Decimal::new(*millimes as i64, 3).to_string(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn test_total_pre_tax_equals_sum_of_lines(
        raw in line_items(),
        discount in 0u32..=100u32
    ) {
        let items = build_items(&raw);
        let summary = TaxSummaryAggregator::new().aggregate(&items, Decimal::from(discount));

        let expected: Decimal = raw.iter().map(|(_, m)| Decimal::new(*m as i64, 3)).sum();
        let actual: Decimal = summary.iter().map(|(_, b)| b.total_pre_tax).sum();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(summary.totals().total_pre_tax, expected);
    }

    #[test]
    fn test_base_plus_discount_is_pre_tax(
        raw in line_items(),
        discount_basis_points in 0u32..=10_000u32
    ) {
        let items = build_items(&raw);
        let discount = Decimal::new(discount_basis_points as i64, 2);
        let summary = TaxSummaryAggregator::new().aggregate(&items, discount);

        for (rate, bucket) in summary.iter() {
            prop_assert_eq!(
                bucket.taxable_base + bucket.total_discount,
                bucket.total_pre_tax,
                "rate {}", rate
            );
            prop_assert_eq!(bucket.total_tax, bucket.tax_amount);
            prop_assert!(bucket.tax_amount >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_one_bucket_per_distinct_rate(raw in line_items()) {
        let items = build_items(&raw);
        let summary = TaxSummaryAggregator::new().aggregate(&items, Decimal::ZERO);

        // "19" and "19.0" are the same rate
        let distinct: HashSet<&str> = raw
            .iter()
            .map(|(rate, _)| RATES[*rate].trim_end_matches(".0"))
            .collect();
        prop_assert_eq!(summary.len(), distinct.len());
    }

    #[test]
    fn test_item_order_does_not_change_buckets(
        raw in line_items(),
        discount in 0u32..=100u32
    ) {
        let items = build_items(&raw);
        let mut reversed = items.clone();
        reversed.reverse();
        let aggregator = TaxSummaryAggregator::new();

        let forward = aggregator.aggregate(&items, Decimal::from(discount));
        let backward = aggregator.aggregate(&reversed, Decimal::from(discount));

        prop_assert_eq!(forward.len(), backward.len());
        for (rate, bucket) in forward.iter() {
            prop_assert_eq!(Some(bucket), backward.get(rate));
        }
    }

    #[test]
    fn test_float_path_tracks_decimal_path(
        raw in line_items(),
        discount in 0u32..=100u32
    ) {
        let items = build_items(&raw);
        let aggregator = TaxSummaryAggregator::new();

        let exact = aggregator.aggregate(&items, Decimal::from(discount));
        let float = aggregator.aggregate(&items, discount as f64);

        prop_assert_eq!(exact.len(), float.len());
        for (rate, bucket) in exact.iter() {
            let float_bucket = float.get(rate.to_f64().unwrap()).unwrap();
            let pairs = [
                (bucket.taxable_base, float_bucket.taxable_base),
                (bucket.tax_amount, float_bucket.tax_amount),
                (bucket.total_pre_tax, float_bucket.total_pre_tax),
                (bucket.total_discount, float_bucket.total_discount),
            ];
            for (exact_value, float_value) in pairs {
                let exact_value = exact_value.to_f64().unwrap();
                let tolerance = 1e-6 * exact_value.abs().max(1.0);
                prop_assert!(
                    (exact_value - float_value).abs() <= tolerance,
                    "rate {}: decimal {} vs float {}", rate, exact_value, float_value
                );
            }
        }
    }
}

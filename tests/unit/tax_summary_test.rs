// Tax summary aggregation over invoice line items
//
// Each scenario runs on the exact decimal path; the float path is checked
// against the same expectations within a tolerance.

use integra::invoices::LineItem;
use integra::taxes::{TaxBucket, TaxSummaryAggregator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn assert_float_bucket(bucket: &TaxBucket<f64>, expected: [f64; 5]) {
    assert_close(bucket.taxable_base, expected[0]);
    assert_close(bucket.tax_amount, expected[1]);
    assert_close(bucket.total_pre_tax, expected[2]);
    assert_close(bucket.total_discount, expected[3]);
    assert_close(bucket.total_tax, expected[4]);
}

#[test]
fn test_empty_items_give_empty_summary() {
    let aggregator = TaxSummaryAggregator::new();

    for discount in [dec!(0), dec!(10), dec!(100), dec!(-5), dec!(250)] {
        assert!(aggregator.aggregate(&[], discount).is_empty());
    }
    assert!(aggregator.aggregate(&[], 42.0).is_empty());
}

#[test]
fn test_single_item_no_discount() {
    let items = vec![LineItem::new("Produit", "19", "100")];
    let aggregator = TaxSummaryAggregator::new();

    let summary = aggregator.aggregate(&items, Decimal::ZERO);
    assert_eq!(summary.len(), 1);
    assert_eq!(
        *summary.get(dec!(19)).unwrap(),
        TaxBucket {
            taxable_base: dec!(100),
            tax_amount: dec!(19),
            total_pre_tax: dec!(100),
            total_discount: dec!(0),
            total_tax: dec!(19),
        }
    );

    let summary = aggregator.aggregate(&items, 0.0);
    assert_float_bucket(summary.get(19.0).unwrap(), [100.0, 19.0, 100.0, 0.0, 19.0]);
}

#[test]
fn test_single_item_with_ten_percent_discount() {
    let items = vec![LineItem::new("Produit", "19", "100")];
    let aggregator = TaxSummaryAggregator::new();

    let summary = aggregator.aggregate(&items, dec!(10));
    let bucket = summary.get(dec!(19)).unwrap();
    assert_eq!(bucket.total_discount, dec!(10));
    assert_eq!(bucket.taxable_base, dec!(90));
    assert_eq!(bucket.tax_amount, dec!(17.1));
    assert_eq!(bucket.total_tax, dec!(17.1));
    assert_eq!(bucket.total_pre_tax, dec!(100));

    let summary = aggregator.aggregate(&items, 10.0);
    assert_float_bucket(summary.get(19.0).unwrap(), [90.0, 17.1, 100.0, 10.0, 17.1]);
}

#[test]
fn test_equivalent_rate_strings_share_a_bucket() {
    let items = vec![
        LineItem::new("A", "19", "100"),
        LineItem::new("B", "19.0", "50"),
    ];
    let aggregator = TaxSummaryAggregator::new();

    let summary = aggregator.aggregate(&items, Decimal::ZERO);
    assert_eq!(summary.len(), 1);
    assert_eq!(summary.rates()[0].to_string(), "19");
    assert_eq!(summary.get(dec!(19)).unwrap().total_pre_tax, dec!(150));
    assert_eq!(summary.get(dec!(19)).unwrap().tax_amount, dec!(28.5));

    let summary = aggregator.aggregate(&items, 0.0);
    assert_eq!(summary.len(), 1);
    assert_close(summary.get(19.0).unwrap().total_pre_tax, 150.0);
}

#[test]
fn test_different_rates_give_independent_buckets() {
    let items = vec![
        LineItem::new("Matériel", "19", "200"),
        LineItem::new("Livres", "7", "50"),
        LineItem::new("Câble", "19", "30"),
    ];

    let summary = TaxSummaryAggregator::new().aggregate(&items, dec!(20));

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.rates(), vec![dec!(19), dec!(7)]);

    let nineteen = summary.get(dec!(19)).unwrap();
    assert_eq!(nineteen.total_pre_tax, dec!(230));
    assert_eq!(nineteen.total_discount, dec!(46));
    assert_eq!(nineteen.taxable_base, dec!(184));
    assert_eq!(nineteen.tax_amount, dec!(34.96));

    let seven = summary.get(dec!(7)).unwrap();
    assert_eq!(seven.total_pre_tax, dec!(50));
    assert_eq!(seven.total_discount, dec!(10));
    assert_eq!(seven.taxable_base, dec!(40));
    assert_eq!(seven.tax_amount, dec!(2.8));

    let total_pre_tax: Decimal = summary.iter().map(|(_, b)| b.total_pre_tax).sum();
    assert_eq!(total_pre_tax, dec!(280));
}

#[test]
fn test_unparsable_amount_contributes_zero() {
    let items = vec![
        LineItem::new("Illisible", "19", "abc"),
        LineItem::new("Tout illisible", "n/a", "abc"),
    ];
    let aggregator = TaxSummaryAggregator::new();

    let summary = aggregator.aggregate(&items, dec!(10));
    assert_eq!(summary.len(), 2);
    assert_eq!(*summary.get(dec!(19)).unwrap(), TaxBucket::default());
    assert_eq!(*summary.get(Decimal::ZERO).unwrap(), TaxBucket::default());

    let summary = aggregator.aggregate(&items, 10.0);
    assert_float_bucket(summary.get(0.0).unwrap(), [0.0; 5]);
}

#[test]
fn test_aggregate_is_idempotent() {
    let items = vec![
        LineItem::new("A", "19", "123.456"),
        LineItem::new("B", "7", "0.333"),
        LineItem::new("C", "13", "999.999"),
    ];
    let aggregator = TaxSummaryAggregator::new();

    assert_eq!(
        aggregator.aggregate(&items, dec!(12.5)),
        aggregator.aggregate(&items, dec!(12.5))
    );

    let first = aggregator.aggregate(&items, 12.5);
    let second = aggregator.aggregate(&items, 12.5);
    for ((rate_a, a), (rate_b, b)) in first.iter().zip(second.iter()) {
        assert_eq!(rate_a.to_bits(), rate_b.to_bits());
        assert_eq!(a.tax_amount.to_bits(), b.tax_amount.to_bits());
        assert_eq!(a.taxable_base.to_bits(), b.taxable_base.to_bits());
    }
}

#[test]
fn test_total_tax_always_mirrors_tax_amount() {
    let items = vec![
        LineItem::new("A", "19", "10.10"),
        LineItem::new("B", "19", "20.20"),
        LineItem::new("C", "0", "5"),
    ];

    let summary = TaxSummaryAggregator::new().aggregate(&items, dec!(3));

    for (_, bucket) in summary.iter() {
        assert_eq!(bucket.total_tax, bucket.tax_amount);
        assert_eq!(bucket.taxable_base + bucket.total_discount, bucket.total_pre_tax);
    }
}

#[test]
fn test_sorted_by_rate_for_rendering() {
    let items = vec![
        LineItem::new("A", "19", "10"),
        LineItem::new("B", "0", "10"),
        LineItem::new("C", "7", "10"),
    ];

    let summary = TaxSummaryAggregator::new().aggregate(&items, Decimal::ZERO);

    let sorted: Vec<Decimal> = summary.sorted_by_rate().into_iter().map(|(r, _)| r).collect();
    assert_eq!(sorted, vec![dec!(0), dec!(7), dec!(19)]);
    assert_eq!(summary.rates(), vec![dec!(19), dec!(0), dec!(7)]);
}

mod tax_summary_aggregator;

pub use tax_summary_aggregator::TaxSummaryAggregator;

pub mod models;
pub mod services;

pub use models::{TaxBucket, TaxSummary, TaxTotals};
pub use services::TaxSummaryAggregator;

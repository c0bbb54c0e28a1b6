mod tax_bucket;
mod tax_summary;

pub use tax_bucket::TaxBucket;
pub use tax_summary::{TaxSummary, TaxTotals};

//! Integra invoicing core
//!
//! Tax summaries and totals for the invoices and quotes produced by the
//! Integra desktop application.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::company;
pub use modules::invoices;
pub use modules::taxes;

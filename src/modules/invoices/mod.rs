// Invoices and quotes

pub mod models;
pub mod services;

pub use models::{DocumentKind, DocumentRequest, DocumentSummary, LineItem, ParsedLineItem};
pub use services::{DocumentService, ParsePolicy};

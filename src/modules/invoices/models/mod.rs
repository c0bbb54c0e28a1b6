mod document;
mod line_item;

pub use document::{DocumentKind, DocumentRequest, DocumentSummary, RejectedField};
pub use line_item::{LineItem, LineItemError, LineItemField, ParsedLineItem};

mod document_item;
mod document_kind;
mod line_entry;

pub use document_item::{CreateLineItemRequest, DocumentItem};
pub use document_kind::DocumentKind;
pub use line_entry::{ComputedLine, DocumentTotals, LineEntry};

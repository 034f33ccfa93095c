// Documents module
//
// Arithmetic and numbering shared by invoices and quotes. Nothing here
// touches storage; callers supply already-validated input.

pub mod models;
pub mod services;

pub use models::{
    ComputedLine, CreateLineItemRequest, DocumentItem, DocumentKind, DocumentTotals, LineEntry,
};
pub use services::{closing_date, compute_totals, next_number, price_items, PricedDocument};

//! Bizdesk invoicing backend library
//!
//! Clients, products, invoices and quotes for multi-tenant small-business
//! bookkeeping, plus the document totals and numbering they share.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::documents;
pub use modules::invoices;
pub use modules::quotes;

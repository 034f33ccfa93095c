pub mod invoice_repository;

pub use invoice_repository::{InvoiceRepository, MySqlInvoiceRepository};
pub(crate) use invoice_repository::ItemRow;

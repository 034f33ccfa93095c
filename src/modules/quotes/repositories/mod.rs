pub mod quote_repository;

pub use quote_repository::{MySqlQuoteRepository, QuoteRepository};

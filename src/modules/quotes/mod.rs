// Quotes module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Quote, QuoteResponse, QuoteStatus};
pub use repositories::{MySqlQuoteRepository, QuoteRepository};
pub use services::QuoteService;

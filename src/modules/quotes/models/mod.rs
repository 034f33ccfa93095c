mod quote;

pub use quote::{CreateQuoteRequest, Quote, QuoteResponse, QuoteStatus, UpdateQuoteStatusRequest};

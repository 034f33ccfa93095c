pub mod product_service;

pub use product_service::{ensure_line_products, ProductService};

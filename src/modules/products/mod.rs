// Products module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Product, ProductRequest, ProductResponse};
pub use repositories::MySqlProductRepository;
pub use services::{ensure_line_products, ProductService};

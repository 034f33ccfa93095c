// Clients module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Client, ClientRequest};
pub use repositories::MySqlClientRepository;
pub use services::ClientService;

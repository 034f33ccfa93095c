// Dashboard module
//
// Per-tenant summary figures for the landing page.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DashboardResponse, DashboardStats};
pub use repositories::{DashboardRepository, MySqlDashboardRepository};
pub use services::DashboardService;

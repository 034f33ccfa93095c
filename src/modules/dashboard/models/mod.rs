mod dashboard;

pub use dashboard::{DashboardResponse, DashboardStats, InvoiceSummary};

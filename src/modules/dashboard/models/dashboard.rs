use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::invoices::Invoice;

/// Aggregate figures for one tenant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_clients: i64,
    pub total_products: i64,
    pub total_invoices: i64,

    /// Sum of PAID invoice totals with a payment date in the last 30 days
    pub monthly_revenue: Decimal,

    /// Sum of SENT and OVERDUE invoice totals
    pub pending_payments: Decimal,

    pub overdue_invoices: i64,
}

/// Invoice-derived part of the stats
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceSummary {
    pub total_invoices: i64,
    pub monthly_revenue: Decimal,
    pub pending_payments: Decimal,
    pub overdue_invoices: i64,
}

/// Body of GET /api/dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_invoices: Vec<Invoice>,
}

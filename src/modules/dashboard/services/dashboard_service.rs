use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::core::{Result, TenantRepository};
use crate::modules::clients::Client;
use crate::modules::dashboard::models::{DashboardResponse, DashboardStats};
use crate::modules::dashboard::repositories::DashboardRepository;
use crate::modules::invoices::InvoiceRepository;
use crate::modules::products::Product;

const REVENUE_WINDOW_DAYS: i64 = 30;
const RECENT_INVOICES: i64 = 5;

/// Service assembling the tenant dashboard
pub struct DashboardService {
    dashboard_repo: Arc<dyn DashboardRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn TenantRepository<Client>>,
    product_repo: Arc<dyn TenantRepository<Product>>,
}

impl DashboardService {
    pub fn new(
        dashboard_repo: Arc<dyn DashboardRepository>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        client_repo: Arc<dyn TenantRepository<Client>>,
        product_repo: Arc<dyn TenantRepository<Product>>,
    ) -> Self {
        Self {
            dashboard_repo,
            invoice_repo,
            client_repo,
            product_repo,
        }
    }

    pub async fn get_dashboard(&self, tenant_id: &str) -> Result<DashboardResponse> {
        let since = Utc::now() - Duration::days(REVENUE_WINDOW_DAYS);

        let summary = self.dashboard_repo.invoice_summary(tenant_id, since).await?;
        let stats = DashboardStats {
            total_clients: self.client_repo.count(tenant_id).await?,
            total_products: self.product_repo.count(tenant_id).await?,
            total_invoices: summary.total_invoices,
            monthly_revenue: summary.monthly_revenue,
            pending_payments: summary.pending_payments,
            overdue_invoices: summary.overdue_invoices,
        };

        let recent_invoices = self
            .invoice_repo
            .list(tenant_id, None, RECENT_INVOICES, 0)
            .await?;

        tracing::debug!(
            tenant_id,
            total_invoices = stats.total_invoices,
            "Dashboard assembled"
        );

        Ok(DashboardResponse {
            stats,
            recent_invoices,
        })
    }
}

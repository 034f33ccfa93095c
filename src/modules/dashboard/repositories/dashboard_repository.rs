use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::core::Result;
use crate::modules::dashboard::models::InvoiceSummary;

/// Repository for dashboard aggregation queries
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Invoice counts and sums for a tenant; revenue only counts payments on or after `revenue_since`
    async fn invoice_summary(
        &self,
        tenant_id: &str,
        revenue_since: DateTime<Utc>,
    ) -> Result<InvoiceSummary>;
}

pub struct MySqlDashboardRepository {
    pool: MySqlPool,
}

impl MySqlDashboardRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceAggregates {
    total_invoices: i64,
    monthly_revenue: Option<Decimal>,
    pending_payments: Option<Decimal>,
    overdue_invoices: i64,
}

#[async_trait]
impl DashboardRepository for MySqlDashboardRepository {
    async fn invoice_summary(
        &self,
        tenant_id: &str,
        revenue_since: DateTime<Utc>,
    ) -> Result<InvoiceSummary> {
        // MySQL SUM over DECIMAL yields DECIMAL, and NULL on an empty set
        let aggregates = sqlx::query_as::<_, InvoiceAggregates>(
            r#"
            SELECT
                COUNT(*) AS total_invoices,
                SUM(CASE WHEN status = 'PAID' AND payment_date >= ? THEN total_amount END)
                    AS monthly_revenue,
                SUM(CASE WHEN status IN ('SENT', 'OVERDUE') THEN total_amount END)
                    AS pending_payments,
                CAST(COALESCE(SUM(status = 'OVERDUE'), 0) AS SIGNED) AS overdue_invoices
            FROM invoices
            WHERE user_id = ?
            "#,
        )
        .bind(revenue_since)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(InvoiceSummary {
            total_invoices: aggregates.total_invoices,
            monthly_revenue: aggregates.monthly_revenue.unwrap_or_default(),
            pending_payments: aggregates.pending_payments.unwrap_or_default(),
            overdue_invoices: aggregates.overdue_invoices,
        })
    }
}

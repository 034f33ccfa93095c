// Invoice persistence
//
// Implements:
// - Create invoice with items (transactional)
// - Read invoice by ID and its items in position order
// - List invoices with optional status filter and pagination
// - Persist status changes
// - Count invoices for document numbering

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};
use crate::modules::documents::DocumentItem;
use crate::modules::invoices::models::{Invoice, InvoiceStatus};

const INVOICE_COLUMNS: &str = r#"
    id, invoice_number, user_id, client_id, status, issue_date, due_date, currency,
    subtotal, tax_amount, total_amount, paid_amount, payment_date, notes, terms,
    created_at, updated_at
"#;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Number of invoices ever created, across all tenants; feeds the number generator
    async fn count_all(&self) -> Result<u64>;

    /// Insert header and items atomically
    async fn create(&self, invoice: &Invoice, items: &[DocumentItem]) -> Result<Invoice>;

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Invoice>>;

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<DocumentItem>>;

    /// Newest first
    async fn list(
        &self,
        tenant_id: &str,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>>;

    /// Persist status, payment fields and updated_at
    async fn update_status(&self, invoice: &Invoice) -> Result<()>;
}

/// MySQL-backed invoice repository
pub struct MySqlInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        invoice_id: &str,
        items: &[DocumentItem],
    ) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position, product_id, description,
                    quantity, unit_price, discount, tax_rate, total
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(invoice_id)
            .bind(item.position)
            .bind(&item.product_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount)
            .bind(item.tax_rate)
            .bind(item.total)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl InvoiceRepository for MySqlInvoiceRepository {
    async fn count_all(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|_| AppError::internal("Negative invoice count"))
    }

    async fn create(&self, invoice: &Invoice, items: &[DocumentItem]) -> Result<Invoice> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, user_id, client_id, status, issue_date, due_date,
                currency, subtotal, tax_amount, total_amount, paid_amount, payment_date,
                notes, terms, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(&invoice.user_id)
        .bind(&invoice.client_id)
        .bind(invoice.status.as_str())
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.currency.as_str())
        .bind(invoice.subtotal)
        .bind(invoice.tax_amount)
        .bind(invoice.total_amount)
        .bind(invoice.paid_amount)
        .bind(invoice.payment_date)
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, &format!("Invoice {}", invoice.invoice_number)))?;

        Self::insert_items(&mut tx, &invoice.id, items).await?;

        tx.commit().await?;

        Ok(invoice.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Invoice>> {
        let query = format!(
            "SELECT {} FROM invoices WHERE id = ? AND user_id = ?",
            INVOICE_COLUMNS
        );

        let row = sqlx::query_as::<_, InvoiceRow>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(InvoiceRow::into_invoice).transpose()
    }

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<DocumentItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, position, product_id, description, quantity, unit_price,
                   discount, tax_rate, total
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY position
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn list(
        &self,
        tenant_id: &str,
        status: Option<InvoiceStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM invoices WHERE user_id = ? AND status = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    INVOICE_COLUMNS
                );
                sqlx::query_as::<_, InvoiceRow>(&query)
                    .bind(tenant_id)
                    .bind(status.as_str())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {} FROM invoices WHERE user_id = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    INVOICE_COLUMNS
                );
                sqlx::query_as::<_, InvoiceRow>(&query)
                    .bind(tenant_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.into_iter().map(InvoiceRow::into_invoice).collect()
    }

    async fn update_status(&self, invoice: &Invoice) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE invoices
            SET status = ?, paid_amount = ?, payment_date = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(invoice.status.as_str())
        .bind(invoice.paid_amount)
        .bind(invoice.payment_date)
        .bind(invoice.updated_at)
        .bind(&invoice.id)
        .bind(&invoice.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                invoice.id
            )));
        }

        Ok(())
    }
}

// Helper structs for database mapping

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    invoice_number: String,
    user_id: String,
    client_id: String,
    status: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    currency: String,
    subtotal: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    paid_amount: Decimal,
    payment_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    terms: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self) -> Result<Invoice> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| AppError::Internal(format!("Invalid currency in database: {}", e)))?;
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            user_id: self.user_id,
            client_id: self.client_id,
            status,
            issue_date: self.issue_date,
            due_date: self.due_date,
            currency,
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            payment_date: self.payment_date,
            notes: self.notes,
            terms: self.terms,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row shape shared by `invoice_items` and `quote_items`
#[derive(Debug, FromRow)]
pub(crate) struct ItemRow {
    id: String,
    position: i32,
    product_id: Option<String>,
    description: String,
    quantity: Decimal,
    unit_price: Decimal,
    discount: Decimal,
    tax_rate: Decimal,
    total: Decimal,
}

impl ItemRow {
    pub(crate) fn into_item(self) -> DocumentItem {
        DocumentItem {
            id: self.id,
            position: self.position,
            product_id: self.product_id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount: self.discount,
            tax_rate: self.tax_rate,
            total: self.total,
        }
    }
}

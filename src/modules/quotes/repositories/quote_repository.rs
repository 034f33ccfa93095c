use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

use crate::core::{AppError, Currency, Result};
use crate::modules::documents::DocumentItem;
use crate::modules::invoices::repositories::ItemRow;
use crate::modules::quotes::models::{Quote, QuoteStatus};

const QUOTE_COLUMNS: &str = r#"
    id, quote_number, user_id, client_id, status, issue_date, valid_until, currency,
    subtotal, tax_amount, total_amount, notes, terms, created_at, updated_at
"#;

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Total quotes across all tenants
    async fn count_all(&self) -> Result<u64>;

    async fn create(&self, quote: &Quote, items: &[DocumentItem]) -> Result<Quote>;

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Quote>>;

    async fn find_items(&self, quote_id: &str) -> Result<Vec<DocumentItem>>;

    async fn list(&self, tenant_id: &str, limit: i64, offset: i64) -> Result<Vec<Quote>>;

    async fn update_status(&self, quote: &Quote) -> Result<()>;
}

pub struct MySqlQuoteRepository {
    pool: MySqlPool,
}

impl MySqlQuoteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for MySqlQuoteRepository {
    async fn count_all(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|_| AppError::internal("Negative quote count"))
    }

    async fn create(&self, quote: &Quote, items: &[DocumentItem]) -> Result<Quote> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, quote_number, user_id, client_id, status, issue_date, valid_until,
                currency, subtotal, tax_amount, total_amount, notes, terms,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&quote.id)
        .bind(&quote.quote_number)
        .bind(&quote.user_id)
        .bind(&quote.client_id)
        .bind(quote.status.as_str())
        .bind(quote.issue_date)
        .bind(quote.valid_until)
        .bind(quote.currency.as_str())
        .bind(quote.subtotal)
        .bind(quote.tax_amount)
        .bind(quote.total_amount)
        .bind(&quote.notes)
        .bind(&quote.terms)
        .bind(quote.created_at)
        .bind(quote.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, &format!("Quote {}", quote.quote_number)))?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO quote_items (
                    id, quote_id, position, product_id, description,
                    quantity, unit_price, discount, tax_rate, total
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&quote.id)
            .bind(item.position)
            .bind(&item.product_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount)
            .bind(item.tax_rate)
            .bind(item.total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(quote.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Quote>> {
        let query = format!(
            "SELECT {} FROM quotes WHERE id = ? AND user_id = ?",
            QUOTE_COLUMNS
        );

        sqlx::query_as::<_, QuoteRow>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?
            .map(QuoteRow::into_quote)
            .transpose()
    }

    async fn find_items(&self, quote_id: &str) -> Result<Vec<DocumentItem>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, position, product_id, description, quantity, unit_price,
                   discount, tax_rate, total
            FROM quote_items
            WHERE quote_id = ?
            ORDER BY position
            "#,
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn list(&self, tenant_id: &str, limit: i64, offset: i64) -> Result<Vec<Quote>> {
        let query = format!(
            "SELECT {} FROM quotes WHERE user_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
            QUOTE_COLUMNS
        );

        let rows = sqlx::query_as::<_, QuoteRow>(&query)
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(QuoteRow::into_quote).collect()
    }

    async fn update_status(&self, quote: &Quote) -> Result<()> {
        let result = sqlx::query(
            "UPDATE quotes SET status = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(quote.status.as_str())
        .bind(quote.updated_at)
        .bind(&quote.id)
        .bind(&quote.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Quote with id '{}' not found",
                quote.id
            )));
        }

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct QuoteRow {
    id: String,
    quote_number: String,
    user_id: String,
    client_id: String,
    status: String,
    issue_date: NaiveDate,
    valid_until: NaiveDate,
    currency: String,
    subtotal: Decimal,
    tax_amount: Decimal,
    total_amount: Decimal,
    notes: Option<String>,
    terms: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuoteRow {
    fn into_quote(self) -> Result<Quote> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| AppError::Internal(format!("Invalid currency in database: {}", e)))?;
        let status = QuoteStatus::from_str(&self.status)
            .map_err(|e| AppError::Internal(format!("Invalid status in database: {}", e)))?;

        Ok(Quote {
            id: self.id,
            quote_number: self.quote_number,
            user_id: self.user_id,
            client_id: self.client_id,
            status,
            issue_date: self.issue_date,
            valid_until: self.valid_until,
            currency,
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total_amount: self.total_amount,
            notes: self.notes,
            terms: self.terms,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// MySQL persistence for clients

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

use crate::core::{AppError, Currency, Result, TenantRepository};
use crate::modules::clients::models::Client;

const CLIENT_COLUMNS: &str = r#"
    id, user_id, name, email, phone, address, city, country, tax_id,
    currency, payment_terms, discount, notes, created_at, updated_at
"#;

/// Repository for client database operations
pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository<Client> for MySqlClientRepository {
    async fn create(&self, client: &Client) -> Result<Client> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, user_id, name, email, phone, address, city, country, tax_id,
                currency, payment_terms, discount, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.id)
        .bind(&client.user_id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.city)
        .bind(&client.country)
        .bind(&client.tax_id)
        .bind(client.currency.as_str())
        .bind(client.payment_terms)
        .bind(client.discount)
        .bind(&client.notes)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "Client"))?;

        tracing::debug!(client_id = %client.id, "Client inserted");
        Ok(client.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Client>> {
        let query = format!(
            "SELECT {} FROM clients WHERE id = ? AND user_id = ?",
            CLIENT_COLUMNS
        );

        let row = sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ClientRow::into_client).transpose()
    }

    async fn update(&self, client: &Client) -> Result<Option<Client>> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = ?, email = ?, phone = ?, address = ?, city = ?, country = ?,
                tax_id = ?, currency = ?, payment_terms = ?, discount = ?, notes = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.city)
        .bind(&client.country)
        .bind(&client.tax_id)
        .bind(client.currency.as_str())
        .bind(client.payment_terms)
        .bind(client.discount)
        .bind(&client.notes)
        .bind(client.updated_at)
        .bind(&client.id)
        .bind(&client.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(client.clone()))
    }

    async fn delete(&self, id: &str, tenant_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await
            // invoices and quotes hold a foreign key on the client
            .map_err(|e| AppError::from_delete(e, "Client"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Client>> {
        let query = format!(
            "SELECT {} FROM clients WHERE user_id = ? ORDER BY created_at DESC",
            CLIENT_COLUMNS
        );

        sqlx::query_as::<_, ClientRow>(&query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ClientRow::into_client)
            .collect()
    }

    async fn count(&self, tenant_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE user_id = ?")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: String,
    user_id: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    country: Option<String>,
    tax_id: Option<String>,
    currency: String,
    payment_terms: i32,
    discount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClientRow {
    fn into_client(self) -> Result<Client> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| AppError::Internal(format!("Invalid currency in database: {}", e)))?;

        Ok(Client {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            country: self.country,
            tax_id: self.tax_id,
            currency,
            payment_terms: self.payment_terms,
            discount: self.discount,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

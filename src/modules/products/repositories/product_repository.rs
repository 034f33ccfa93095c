use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

use crate::core::{AppError, Currency, Result, TenantRepository};
use crate::modules::products::models::Product;

const PRODUCT_COLUMNS: &str = r#"
    id, user_id, name, description, sku, category, price, cost, currency, unit,
    stock, min_stock, tax_rate, is_active, created_at, updated_at
"#;

/// Repository for product database operations
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository<Product> for MySqlProductRepository {
    async fn create(&self, product: &Product) -> Result<Product> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, user_id, name, description, sku, category, price, cost, currency, unit,
                stock, min_stock, tax_rate, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.id)
        .bind(&product.user_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.cost)
        .bind(product.currency.as_str())
        .bind(&product.unit)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(product.tax_rate)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "Product"))?;

        Ok(product.clone())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE id = ? AND user_id = ?",
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, sku = ?, category = ?, price = ?, cost = ?,
                currency = ?, unit = ?, stock = ?, min_stock = ?, tax_rate = ?,
                is_active = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.sku)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.cost)
        .bind(product.currency.as_str())
        .bind(&product.unit)
        .bind(product.stock)
        .bind(product.min_stock)
        .bind(product.tax_rate)
        .bind(product.is_active)
        .bind(product.updated_at)
        .bind(&product.id)
        .bind(&product.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &str, tenant_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE user_id = ? ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductRow::into_product)
            .collect()
    }

    async fn count(&self, tenant_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE user_id = ?")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    sku: Option<String>,
    category: Option<String>,
    price: Decimal,
    cost: Decimal,
    currency: String,
    unit: String,
    stock: i32,
    min_stock: i32,
    tax_rate: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product> {
        let currency = Currency::from_str(&self.currency)
            .map_err(|e| AppError::Internal(format!("Invalid currency in database: {}", e)))?;

        Ok(Product {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            sku: self.sku,
            category: self.category,
            price: self.price,
            cost: self.cost,
            currency,
            unit: self.unit,
            stock: self.stock,
            min_stock: self.min_stock,
            tax_rate: self.tax_rate,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};

/// A catalogue item the tenant sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    #[serde(skip_serializing)]
    pub user_id: String,

    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,

    /// Selling price per unit
    pub price: Decimal,

    /// Purchase cost per unit
    pub cost: Decimal,

    pub currency: Currency,

    /// Unit of measure ("unit", "hour", "kg", ...)
    pub unit: String,

    pub stock: i32,
    pub min_stock: i32,

    /// Default tax percentage applied when the product is invoiced
    pub tax_rate: Decimal,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/products and PUT /api/products/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    pub currency: Option<Currency>,
    pub unit: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub min_stock: i32,
    #[serde(default)]
    pub tax_rate: Decimal,
    pub is_active: Option<bool>,
}

/// Product as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,

    /// Stock at or below the reorder threshold
    pub low_stock: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let low_stock = product.is_low_stock();
        Self { product, low_stock }
    }
}

impl ProductRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if self.name.len() > 255 {
            return Err(AppError::validation(
                "Product name cannot exceed 255 characters",
            ));
        }

        if self.price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Price must be non-negative, got: {}",
                self.price
            )));
        }

        if self.cost < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Cost must be non-negative, got: {}",
                self.cost
            )));
        }

        if self.tax_rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Tax rate must be non-negative, got: {}",
                self.tax_rate
            )));
        }

        // tax_rate is stored as DECIMAL(7,4)
        if self.tax_rate >= Decimal::ONE_THOUSAND {
            return Err(AppError::validation(format!(
                "Tax rate must be below 1000, got: {}",
                self.tax_rate
            )));
        }

        if self.stock < 0 || self.min_stock < 0 {
            return Err(AppError::validation("Stock levels must be non-negative"));
        }

        Ok(())
    }
}

impl Product {
    pub fn new(request: ProductRequest, tenant_id: &str, default_currency: Currency) -> Result<Self> {
        request.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: tenant_id.to_string(),
            name: request.name.trim().to_string(),
            description: request.description,
            sku: request.sku,
            category: request.category,
            price: request.price,
            cost: request.cost,
            currency: request.currency.unwrap_or(default_currency),
            unit: request.unit.unwrap_or_else(|| "unit".to_string()),
            stock: request.stock,
            min_stock: request.min_stock,
            tax_rate: request.tax_rate,
            is_active: request.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, request: ProductRequest) -> Result<()> {
        request.validate()?;

        self.name = request.name.trim().to_string();
        self.description = request.description;
        self.sku = request.sku;
        self.category = request.category;
        self.price = request.price;
        self.cost = request.cost;
        if let Some(currency) = request.currency {
            self.currency = currency;
        }
        if let Some(unit) = request.unit {
            self.unit = unit;
        }
        self.stock = request.stock;
        self.min_stock = request.min_stock;
        self.tax_rate = request.tax_rate;
        self.is_active = request.is_active.unwrap_or(self.is_active);
        self.updated_at = Utc::now();

        Ok(())
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

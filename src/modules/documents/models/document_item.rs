use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

use super::LineEntry;

/// Upper bound for a line's quantity and unit price
const MAX_LINE_VALUE: i64 = 1_000_000_000;

/// Percent columns are DECIMAL(7,4), so rates stay below 1000
const TAX_RATE_LIMIT: i64 = 1_000;

/// Decimal places the quantity, price and percent columns keep
const MAX_INPUT_SCALE: u32 = 4;

/// One line of an invoice or quote creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLineItemRequest {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,

    /// Discount percentage, 0-100
    #[serde(default)]
    pub discount: Decimal,

    /// Tax percentage, 0 or more
    #[serde(default)]
    pub tax_rate: Decimal,

    pub product_id: Option<String>,
}

impl CreateLineItemRequest {
    /// Boundary validation; the totals calculator itself accepts anything
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Line item {}: description cannot be empty",
                index
            )));
        }

        if self.description.len() > 255 {
            return Err(AppError::validation(format!(
                "Line item {}: description cannot exceed 255 characters",
                index
            )));
        }

        if self.quantity < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Line item {}: quantity must be non-negative, got: {}",
                index, self.quantity
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Line item {}: unit price must be non-negative, got: {}",
                index, self.unit_price
            )));
        }

        if self.discount < Decimal::ZERO || self.discount > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Line item {}: discount must be between 0 and 100, got: {}",
                index, self.discount
            )));
        }

        if self.tax_rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Line item {}: tax rate must be non-negative, got: {}",
                index, self.tax_rate
            )));
        }

        let max_value = Decimal::from(MAX_LINE_VALUE);
        if self.quantity > max_value {
            return Err(AppError::validation(format!(
                "Line item {}: quantity cannot exceed {}, got: {}",
                index, max_value, self.quantity
            )));
        }

        if self.unit_price > max_value {
            return Err(AppError::validation(format!(
                "Line item {}: unit price cannot exceed {}, got: {}",
                index, max_value, self.unit_price
            )));
        }

        if self.tax_rate >= Decimal::from(TAX_RATE_LIMIT) {
            return Err(AppError::validation(format!(
                "Line item {}: tax rate must be below {}, got: {}",
                index, TAX_RATE_LIMIT, self.tax_rate
            )));
        }

        for (field, value) in [
            ("quantity", self.quantity),
            ("unit price", self.unit_price),
            ("discount", self.discount),
            ("tax rate", self.tax_rate),
        ] {
            if value.normalize().scale() > MAX_INPUT_SCALE {
                return Err(AppError::validation(format!(
                    "Line item {}: {} allows at most {} decimal places, got: {}",
                    index, field, MAX_INPUT_SCALE, value
                )));
            }
        }

        Ok(())
    }

    pub fn to_entry(&self) -> LineEntry {
        LineEntry::new(self.quantity, self.unit_price, self.discount, self.tax_rate)
    }
}

/// A stored document line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: String,

    /// Zero-based position within the document
    pub position: i32,

    pub product_id: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub tax_rate: Decimal,

    /// Line total after discount and tax, rounded to the document currency
    pub total: Decimal,
}

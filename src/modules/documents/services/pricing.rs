use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};
use crate::modules::documents::models::{
    CreateLineItemRequest, DocumentItem, DocumentTotals, LineEntry,
};

use super::compute_totals;

/// Money columns are DECIMAL(19,4): fifteen integer digits
const STORED_AMOUNT_LIMIT: i64 = 1_000_000_000_000_000;

/// Lines and totals ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct PricedDocument {
    pub items: Vec<DocumentItem>,
    pub totals: DocumentTotals,
}

/// Validate request lines, run the totals calculator and round for storage.
///
/// Line totals, subtotal and tax are each rounded to the currency scale, and
/// the stored total is rebuilt from the rounded parts so that
/// `total_amount == subtotal + tax_amount` holds on persisted values too.
pub fn price_items(items: &[CreateLineItemRequest], currency: Currency) -> Result<PricedDocument> {
    if items.is_empty() {
        return Err(AppError::validation(
            "Document must have at least one line item",
        ));
    }

    for (idx, item) in items.iter().enumerate() {
        item.validate(idx)?;
    }

    let entries: Vec<LineEntry> = items.iter().map(CreateLineItemRequest::to_entry).collect();
    let (computed, raw) = compute_totals(&entries);

    let items: Vec<DocumentItem> = items
        .iter()
        .zip(computed)
        .enumerate()
        .map(|(position, (request, line))| DocumentItem {
            id: Uuid::new_v4().to_string(),
            position: position as i32,
            product_id: request.product_id.clone(),
            description: request.description.trim().to_string(),
            quantity: line.entry.quantity,
            unit_price: line.entry.unit_price,
            discount: line.entry.discount_percent,
            tax_rate: line.entry.tax_percent,
            total: currency.round(line.line_total),
        })
        .collect();

    let subtotal = currency.round(raw.subtotal);
    let tax_amount = currency.round(raw.tax_amount);
    let totals = DocumentTotals {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount,
    };

    for item in &items {
        if !fits_column(item.total) {
            return Err(AppError::validation(format!(
                "Line item {}: line total {} is too large to store",
                item.position, item.total
            )));
        }
    }

    if !fits_column(totals.subtotal) || !fits_column(totals.total_amount) {
        return Err(AppError::validation(format!(
            "Document total {} is too large to store",
            totals.total_amount
        )));
    }

    Ok(PricedDocument { items, totals })
}

fn fits_column(amount: Decimal) -> bool {
    amount.abs() < Decimal::from(STORED_AMOUNT_LIMIT)
}

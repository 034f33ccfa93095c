use rust_decimal::Decimal;

use crate::modules::documents::models::{ComputedLine, DocumentTotals, LineEntry};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Compute per-line amounts and document totals.
///
/// For each line:
/// - item_subtotal = quantity × unit_price
/// - item_discount = item_subtotal × discount_percent / 100
/// - taxable_base  = item_subtotal − item_discount
/// - item_tax      = taxable_base × tax_percent / 100
/// - line_total    = taxable_base + item_tax
///
/// The document subtotal sums the *pre-discount* item subtotals, the tax
/// amount sums the per-line taxes, and total = subtotal + tax.
///
/// No validation and no rounding happen here; out-of-range percentages and
/// negative amounts are applied as given. Output lines keep input order.
pub fn compute_totals(lines: &[LineEntry]) -> (Vec<ComputedLine>, DocumentTotals) {
    let mut subtotal = Decimal::ZERO;
    let mut tax_amount = Decimal::ZERO;

    let computed: Vec<ComputedLine> = lines
        .iter()
        .map(|entry| {
            let item_subtotal = entry.item_subtotal();
            let item_discount = item_subtotal * entry.discount_percent / HUNDRED;
            let taxable_base = item_subtotal - item_discount;
            let item_tax = taxable_base * entry.tax_percent / HUNDRED;
            let line_total = taxable_base + item_tax;

            subtotal += item_subtotal;
            tax_amount += item_tax;

            ComputedLine {
                entry: *entry,
                item_subtotal,
                item_discount,
                taxable_base,
                item_tax,
                line_total,
            }
        })
        .collect();

    let totals = DocumentTotals {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount,
    };

    (computed, totals)
}

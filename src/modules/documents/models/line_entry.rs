use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced row of an invoice or quote, as fed to the totals calculator.
///
/// Percentages are expressed on a 0–100 scale (`20` means 20 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub tax_percent: Decimal,
}

impl LineEntry {
    pub fn new(
        quantity: Decimal,
        unit_price: Decimal,
        discount_percent: Decimal,
        tax_percent: Decimal,
    ) -> Self {
        Self {
            quantity,
            unit_price,
            discount_percent,
            tax_percent,
        }
    }

    /// quantity × unit price, before discount and tax
    pub fn item_subtotal(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A line entry together with the amounts derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLine {
    #[serde(flatten)]
    pub entry: LineEntry,

    /// quantity × unit price
    pub item_subtotal: Decimal,

    /// Portion of `item_subtotal` removed by the line discount
    pub item_discount: Decimal,

    /// `item_subtotal - item_discount`
    pub taxable_base: Decimal,

    /// Tax on the taxable base
    pub item_tax: Decimal,

    /// `taxable_base + item_tax`
    pub line_total: Decimal,
}

/// Document-level sums.
///
/// `subtotal` is accumulated before discounts while `tax_amount` is taxed on
/// discounted bases, so `subtotal + tax_amount` is not the sum of line totals
/// whenever a line carries a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

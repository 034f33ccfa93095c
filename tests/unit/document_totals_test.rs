// Property-based tests for document totals
//
// Checks the arithmetic rules of the totals calculator across many inputs:
// - total is always subtotal + tax
// - subtotal is the pre-discount sum
// - tax is charged on the discounted base
// - storage rounding keeps the sum consistent

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bizdesk::core::Currency;
use bizdesk::modules::documents::{compute_totals, price_items, CreateLineItemRequest, LineEntry};

fn amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0i64..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn percent(max_hundredths: i64) -> impl Strategy<Value = Decimal> {
    (0i64..=max_hundredths).prop_map(|h| Decimal::new(h, 2))
}

fn line_strategy() -> impl Strategy<Value = LineEntry> {
    (amount(100_000), amount(10_000_000), percent(10_000), percent(5_000))
        .prop_map(|(q, p, d, t)| LineEntry::new(q, p, d, t))
}

proptest! {
    #[test]
    fn test_total_is_subtotal_plus_tax(lines in prop::collection::vec(line_strategy(), 0..20)) {
        let (_, totals) = compute_totals(&lines);
        prop_assert_eq!(totals.total_amount, totals.subtotal + totals.tax_amount);
    }

    #[test]
    fn test_subtotal_ignores_discounts(lines in prop::collection::vec(line_strategy(), 1..20)) {
        let (computed, totals) = compute_totals(&lines);

        let expected: Decimal = lines.iter().map(|l| l.quantity * l.unit_price).sum();
        prop_assert_eq!(totals.subtotal, expected);

        let tax: Decimal = computed.iter().map(|c| c.item_tax).sum();
        prop_assert_eq!(totals.tax_amount, tax);
    }

    #[test]
    fn test_line_arithmetic(line in line_strategy()) {
        let (computed, _) = compute_totals(&[line]);
        let c = &computed[0];

        prop_assert_eq!(c.taxable_base, c.item_subtotal - c.item_discount);
        prop_assert_eq!(c.item_tax, c.taxable_base * line.tax_percent / Decimal::ONE_HUNDRED);
        prop_assert_eq!(c.line_total, c.taxable_base + c.item_tax);
        prop_assert!(c.item_discount <= c.item_subtotal);
        prop_assert!(c.item_tax >= Decimal::ZERO);
    }

    #[test]
    fn test_no_discount_no_tax_is_plain_product(q in amount(100_000), p in amount(10_000_000)) {
        let (computed, totals) = compute_totals(&[LineEntry::new(q, p, Decimal::ZERO, Decimal::ZERO)]);
        prop_assert_eq!(computed[0].line_total, q * p);
        prop_assert_eq!(totals.total_amount, q * p);
    }

    #[test]
    fn test_full_discount_zeroes_line(q in amount(100_000), p in amount(10_000_000), t in percent(5_000)) {
        let (computed, totals) = compute_totals(&[LineEntry::new(q, p, Decimal::ONE_HUNDRED, t)]);
        prop_assert_eq!(computed[0].line_total, Decimal::ZERO);
        prop_assert_eq!(computed[0].item_tax, Decimal::ZERO);
        // the full amount still counts toward the subtotal
        prop_assert_eq!(totals.subtotal, q * p);
    }

    #[test]
    fn test_line_order_is_preserved(lines in prop::collection::vec(line_strategy(), 1..10)) {
        let (computed, totals) = compute_totals(&lines);
        prop_assert_eq!(computed.len(), lines.len());
        for (c, l) in computed.iter().zip(&lines) {
            prop_assert_eq!(&c.entry, l);
        }

        let mut reversed = lines.clone();
        reversed.reverse();
        let (_, reversed_totals) = compute_totals(&reversed);
        prop_assert_eq!(totals, reversed_totals);
    }

    #[test]
    fn test_stored_amounts_are_rounded_and_consistent(
        q in amount(100_000),
        p in amount(10_000_000),
        d in percent(10_000),
        t in percent(5_000),
    ) {
        let request = CreateLineItemRequest {
            description: "Generated".to_string(),
            quantity: q,
            unit_price: p,
            discount: d,
            tax_rate: t,
            product_id: None,
        };

        let priced = price_items(&[request], Currency::USD).unwrap();
        prop_assert!(priced.totals.subtotal.scale() <= 2);
        prop_assert!(priced.totals.tax_amount.scale() <= 2);
        prop_assert!(priced.items[0].total.scale() <= 2);
        prop_assert_eq!(
            priced.totals.total_amount,
            priced.totals.subtotal + priced.totals.tax_amount
        );
    }
}

#[test]
fn test_reference_documents() {
    let (_, totals) = compute_totals(&[LineEntry::new(dec!(2), dec!(100), dec!(10), dec!(20))]);
    assert_eq!(totals.subtotal, dec!(200));
    assert_eq!(totals.tax_amount, dec!(36));
    assert_eq!(totals.total_amount, dec!(236));

    let (lines, totals) = compute_totals(&[
        LineEntry::new(dec!(1), dec!(50), dec!(0), dec!(0)),
        LineEntry::new(dec!(3), dec!(10), dec!(0), dec!(10)),
    ]);
    assert_eq!(lines[0].line_total, dec!(50));
    assert_eq!(lines[1].line_total, dec!(33));
    assert_eq!(totals.subtotal, dec!(80));
    assert_eq!(totals.tax_amount, dec!(3));
    assert_eq!(totals.total_amount, dec!(83));
}

#[test]
fn test_calculator_does_not_validate() {
    // negative quantity and 150% discount are applied as given
    let (lines, totals) = compute_totals(&[LineEntry::new(dec!(-1), dec!(10), dec!(150), dec!(0))]);
    assert_eq!(lines[0].item_subtotal, dec!(-10));
    assert_eq!(lines[0].item_discount, dec!(-15));
    assert_eq!(lines[0].line_total, dec!(5));
    assert_eq!(totals.subtotal, dec!(-10));
}

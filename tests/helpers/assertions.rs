// Test Assertion Helpers
//
// Common checks on JSON response bodies.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Read a decimal field whether it was serialized as a string or a number
///
/// # Panics
/// If the field is missing or not numeric
pub fn decimal_field(body: &Value, field: &str) -> Decimal {
    match &body[field] {
        Value::String(s) => Decimal::from_str(s)
            .unwrap_or_else(|_| panic!("{} is not a decimal: {}", field, s)),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .unwrap_or_else(|_| panic!("{} is not a decimal: {}", field, n)),
        other => panic!("{} missing or not numeric: {:?}", field, other),
    }
}

/// Assert a decimal field equals `expected` numerically (scale-insensitive)
pub fn assert_decimal(body: &Value, field: &str, expected: &str) {
    let expected = Decimal::from_str(expected).expect("expected value must parse");
    let actual = decimal_field(body, field);
    assert_eq!(
        actual.normalize(),
        expected.normalize(),
        "{}: expected {}, got {}",
        field,
        expected,
        actual
    );
}

/// Assert the standard error envelope carries the HTTP status `code`
///
/// # Example
/// ```ignore
/// assert_error_code(&body, 404);
/// ```
pub fn assert_error_code(body: &Value, code: u16) {
    assert_eq!(
        body["error"]["code"], code,
        "unexpected error body: {}",
        body
    );
    assert!(
        body["error"]["message"].is_string(),
        "error message missing: {}",
        body
    );
}

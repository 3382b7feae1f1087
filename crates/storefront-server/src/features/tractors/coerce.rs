//! Lenient coercion of the loosely typed tractor form fields

use serde_json::Value as JsonValue;

/// `price` to cents: a JSON number is already cents; a string is euros with
/// `,` or `.` as decimal separator. Anything else, including unparsable
/// text, is 0.
pub fn price_cents(value: Option<&JsonValue>) -> i64 {
    match value {
        Some(JsonValue::Number(n)) => n
            .as_i64()
            .unwrap_or_else(|| n.as_f64().map_or(0, |f| f.round() as i64)),
        Some(JsonValue::String(s)) => euros_to_cents(s),
        _ => 0,
    }
}

fn euros_to_cents(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.replacen(',', ".", 1).parse::<f64>() {
        Ok(euros) if euros.is_finite() => (euros * 100.0).round() as i64,
        _ => 0,
    }
}

/// `quantity` to an integer, truncating fractions. Booleans count as 0/1,
/// everything unparsable is 0.
pub fn quantity(value: Option<&JsonValue>) -> i32 {
    let number = match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
        Some(JsonValue::Bool(b)) => Some(f64::from(u8::from(*b))),
        _ => None,
    };
    number.filter(|n| n.is_finite()).map_or(0, |n| n.trunc() as i32)
}

/// Blank text becomes `None`.
pub fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_number_is_cents() {
        assert_eq!(price_cents(Some(&json!(1250))), 1250);
        assert_eq!(price_cents(Some(&json!(99.6))), 100);
    }

    #[test]
    fn test_price_string_is_euros() {
        assert_eq!(price_cents(Some(&json!("12,50"))), 1250);
        assert_eq!(price_cents(Some(&json!("12.5"))), 1250);
        assert_eq!(price_cents(Some(&json!(" 18900 "))), 1_890_000);
    }

    #[test]
    fn test_price_fallbacks() {
        assert_eq!(price_cents(None), 0);
        assert_eq!(price_cents(Some(&JsonValue::Null)), 0);
        assert_eq!(price_cents(Some(&json!(""))), 0);
        assert_eq!(price_cents(Some(&json!("su richiesta"))), 0);
        assert_eq!(price_cents(Some(&json!(true))), 0);
    }

    #[test]
    fn test_quantity() {
        assert_eq!(quantity(Some(&json!(3))), 3);
        assert_eq!(quantity(Some(&json!(3.9))), 3);
        assert_eq!(quantity(Some(&json!("7"))), 7);
        assert_eq!(quantity(Some(&json!("2.5"))), 2);
        assert_eq!(quantity(Some(&json!(true))), 1);
        assert_eq!(quantity(Some(&json!("tanti"))), 0);
        assert_eq!(quantity(None), 0);
    }

    #[test]
    fn test_text() {
        assert_eq!(text(Some(String::new())), None);
        assert_eq!(text(Some("Cabina".into())).as_deref(), Some("Cabina"));
    }
}

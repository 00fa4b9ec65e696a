use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Currency label printed in front of every amount
pub const CURRENCY: &str = "QAR";

/// Round a money value to two decimals (half away from zero)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, e.g. `QAR 12.50`
pub fn format_money(value: Decimal) -> String {
    format!("{} {:.2}", CURRENCY, round_money(value))
}

/// Accept a JSON string, number or null for a text field
///
/// Phone numbers come back as numbers from some endpoints and strings from others.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => None,
        Some(Loose::Text(s)) if s.is_empty() => None,
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Int(n)) => Some(n.to_string()),
        Some(Loose::Float(n)) => Some(n.to_string()),
    })
}

/// Treat blank form input as absent
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Phone {
        #[serde(default, deserialize_with = "opt_string_or_number")]
        phone: Option<String>,
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(125, 1)), "QAR 12.50");
        assert_eq!(format_money(Decimal::new(10005, 3)), "QAR 10.01");
        assert_eq!(format_money(Decimal::ZERO), "QAR 0.00");
    }

    #[test]
    fn test_phone_shapes() {
        let p: Phone = serde_json::from_str(r#"{"phone":55501234}"#).unwrap();
        assert_eq!(p.phone.as_deref(), Some("55501234"));
        let p: Phone = serde_json::from_str(r#"{"phone":"+974 5550"}"#).unwrap();
        assert_eq!(p.phone.as_deref(), Some("+974 5550"));
        let p: Phone = serde_json::from_str(r#"{"phone":""}"#).unwrap();
        assert!(p.phone.is_none());
        let p: Phone = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.phone.is_none());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Doha "), Some("Doha".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}

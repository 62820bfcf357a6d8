//! 폼 입력을 위한 관대한 숫자 역직렬화.
//!
//! 텍스트 위젯은 숫자 필드도 문자열로 내보낼 수 있습니다.
//! `"12"`, `12`, `""`, `null`을 모두 받아들입니다.

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

fn number_value<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("숫자가 아닙니다: {s}"))),
        other => Err(D::Error::custom(format!("숫자가 아닙니다: {other}"))),
    }
}

/// `Option<f64>` 필드용.
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_value(deserializer)
}

/// `Option<i64>` 필드용. 소수부가 있으면 거부합니다.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match number_value(deserializer)? {
        None => Ok(None),
        Some(n) if n.fract() == 0.0 => Ok(Some(n as i64)),
        Some(n) => Err(D::Error::custom(format!("정수가 아닙니다: {n}"))),
    }
}

/// `Option<String>` 식별자용. 숫자 식별자는 문자열로 바꿉니다.
pub fn identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("식별자가 아닙니다: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::float")]
        balance: Option<f64>,
        #[serde(default, deserialize_with = "super::integer")]
        epoch: Option<i64>,
        #[serde(default, deserialize_with = "super::identifier")]
        id: Option<String>,
    }

    #[test]
    fn test_accepts_strings_and_numbers() {
        let s: Sample = serde_json::from_str(r#"{"balance": "1000,5", "epoch": 3}"#).unwrap();
        assert_eq!(s.balance, Some(1000.5));
        assert_eq!(s.epoch, Some(3));

        let s: Sample = serde_json::from_str(r#"{"balance": "", "epoch": "7"}"#).unwrap();
        assert_eq!(s.balance, None);
        assert_eq!(s.epoch, Some(7));

        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.balance, None);
        assert_eq!(s.id, None);
    }

    #[test]
    fn test_identifier_accepts_numbers() {
        let s: Sample = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(s.id.as_deref(), Some("42"));

        let s: Sample = serde_json::from_str(r#"{"id": "a-1"}"#).unwrap();
        assert_eq!(s.id.as_deref(), Some("a-1"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"balance": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"epoch": 1.5}"#).is_err());
    }
}

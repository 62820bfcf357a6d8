//! 테이블 셀 포맷팅 파이프.
//!
//! 모든 변환은 순수 함수입니다. 형식에 맞지 않는 입력은 원래 텍스트를 그대로 반환합니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 컬럼 값에 적용할 포맷팅 파이프.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PipeType {
    /// `000.000.000-00`
    Cpf,
    /// `00.000.000/0000-00`
    Cnpj,
    /// `dd/MM/yyyy`
    Date,
    /// `(00) 0000-0000` 또는 `(00) 00000-0000`
    Phone,
    /// `HH:mm`
    Time,
}

impl PipeType {
    /// 원시 셀 값을 표시 문자열로 변환합니다.
    pub fn transform(&self, raw: &Value) -> String {
        let text = value_text(raw);
        match self {
            PipeType::Cpf => format_digits(&text, &[(3, "."), (3, "."), (3, "-"), (2, "")], 11),
            PipeType::Cnpj => {
                format_digits(&text, &[(2, "."), (3, "."), (3, "/"), (4, "-"), (2, "")], 14)
            }
            PipeType::Phone => format_phone(&text),
            PipeType::Date => parse_instant(raw)
                .map(|dt| dt.format("%d/%m/%Y").to_string())
                .unwrap_or(text),
            PipeType::Time => parse_instant(raw)
                .map(|dt| dt.format("%H:%M").to_string())
                .or_else(|| parse_time(&text).map(|t| t.format("%H:%M").to_string()))
                .unwrap_or(text),
        }
    }
}

/// JSON 값을 셀 텍스트로 변환합니다. `null`은 빈 문자열입니다.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn digits_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn format_digits(text: &str, groups: &[(usize, &str)], expected: usize) -> String {
    let digits = digits_of(text);
    if digits.len() != expected {
        return text.to_string();
    }

    let mut out = String::with_capacity(expected + groups.len());
    let mut rest = digits.as_str();
    for (len, sep) in groups {
        let (head, tail) = rest.split_at(*len);
        out.push_str(head);
        out.push_str(sep);
        rest = tail;
    }
    out
}

fn format_phone(text: &str) -> String {
    let digits = digits_of(text);
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        _ => text.to_string(),
    }
}

fn parse_instant(raw: &Value) -> Option<NaiveDateTime> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok())
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
            .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }),
        _ => None,
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_pipes() {
        assert_eq!(PipeType::Cpf.transform(&json!("12345678901")), "123.456.789-01");
        assert_eq!(
            PipeType::Cnpj.transform(&json!("12345678000199")),
            "12.345.678/0001-99"
        );
        assert_eq!(PipeType::Cpf.transform(&json!("123")), "123");
    }

    #[test]
    fn test_phone_pipe() {
        assert_eq!(PipeType::Phone.transform(&json!("1133334444")), "(11) 3333-4444");
        assert_eq!(PipeType::Phone.transform(&json!(11987654321_i64)), "(11) 98765-4321");
        assert_eq!(PipeType::Phone.transform(&json!("12")), "12");
    }

    #[test]
    fn test_date_and_time_pipes() {
        let raw = json!("2024-03-05T14:07:00");
        assert_eq!(PipeType::Date.transform(&raw), "05/03/2024");
        assert_eq!(PipeType::Time.transform(&raw), "14:07");

        assert_eq!(PipeType::Date.transform(&json!("2024-12-31")), "31/12/2024");
        assert_eq!(PipeType::Time.transform(&json!("09:30:15")), "09:30");
        assert_eq!(PipeType::Date.transform(&json!("not a date")), "not a date");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&Value::Null), "");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(["hold", "open"])), "hold, open");
    }
}

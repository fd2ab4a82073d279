//! Lenient field codecs for the loosely typed server payloads.
//!
//! The API serializes dates, amounts, and counters inconsistently (strings
//! vs numbers, empty strings for "none", MySQL zero dates). These modules
//! read all of those shapes once, at ingestion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Parse the date shapes the server emits.
pub fn parse_server_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("0000-00-00") {
        return None;
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(stamp.date());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|stamp| stamp.date_naive())
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
}

/// `Option<NaiveDate>` from `null`, `""`, zero dates, `yyyy-MM-dd`, SQL
/// datetimes, or RFC 3339. Serializes as `yyyy-MM-dd`.
pub mod opt_date {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(day) => serializer.serialize_str(&day.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) => parse_server_date(&s),
            _ => None,
        })
    }
}

/// `Option<f64>` from a number or a numeric string; anything else is
/// `None`.
pub mod opt_number {
    use super::*;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(value_as_f64))
    }
}

/// `u64` counter from a number or numeric string; unreadable values are 0.
pub mod count {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(value_as_f64)
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64)
            .unwrap_or(0))
    }
}

/// `Option<String>` where blank strings are `None`.
pub mod opt_text {
    use super::*;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(s) => serializer.serialize_str(s),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(default, with = "opt_date")]
        day: Option<NaiveDate>,
        #[serde(default, with = "opt_number")]
        cost: Option<f64>,
        #[serde(default, with = "count")]
        total: u64,
        #[serde(default, with = "opt_text")]
        remarks: Option<String>,
    }

    #[test]
    fn test_server_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_server_date("2024-03-09"), expected);
        assert_eq!(parse_server_date("2024-03-09 14:22:01"), expected);
        assert_eq!(parse_server_date("2024-03-09T14:22:01Z"), expected);
        assert_eq!(parse_server_date("0000-00-00"), None);
        assert_eq!(parse_server_date(" "), None);
    }

    #[test]
    fn test_lenient_fields() {
        let sample: Sample = serde_json::from_str(
            r#"{"day":"2024-03-09","cost":"1,250.50","total":"17","remarks":"  "}"#,
        )
        .expect("sample");
        assert_eq!(sample.cost, Some(1250.5));
        assert_eq!(sample.total, 17);
        assert_eq!(sample.remarks, None);

        let json = serde_json::to_value(&sample).expect("serialize");
        assert_eq!(json["day"], "2024-03-09");
    }

    #[test]
    fn test_missing_fields_default() {
        let sample: Sample = serde_json::from_str("{}").expect("sample");
        assert_eq!(sample.day, None);
        assert_eq!(sample.cost, None);
        assert_eq!(sample.total, 0);
    }
}

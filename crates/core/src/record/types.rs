//! Sales record types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracker_shared::types::RecordId;

/// A single day's sale logged by a staff member at a branch.
///
/// Records are immutable once created; the log only grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Record ID.
    pub id: RecordId,
    /// Calendar day the sale belongs to.
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    /// Staff member name.
    pub staff: String,
    /// Branch name.
    pub branch: String,
    /// Sale amount, never negative.
    pub amount: Decimal,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Input for logging a new sale.
///
/// Every field is optional on the wire so that missing values surface as
/// validation errors rather than as malformed requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSalesRecord {
    /// Calendar day of the sale.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Staff member name.
    #[serde(default)]
    pub staff: String,
    /// Branch name.
    #[serde(default)]
    pub branch: String,
    /// Sale amount.
    #[serde(default)]
    pub amount: Decimal,
    /// Optional note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Parses a calendar date from `YYYY-MM-DD` or a full ISO-8601 timestamp.
///
/// Timestamps keep only their date part.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10)?;
    match trimmed.as_bytes().get(10) {
        None | Some(b'T' | b' ') => NaiveDate::parse_from_str(head, "%Y-%m-%d").ok(),
        Some(_) => None,
    }
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 5);
        assert_eq!(parse_calendar_date("2024-06-05"), expected);
        assert_eq!(parse_calendar_date(" 2024-06-05 "), expected);
        assert_eq!(parse_calendar_date("2024-06-05T10:00:00.000Z"), expected);
        assert_eq!(parse_calendar_date("2024-06-05x"), None);
        assert_eq!(parse_calendar_date("2024-13-05"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_record_accepts_numeric_and_string_amounts() {
        let numeric: SalesRecord = serde_json::from_str(
            r#"{"id":"r_1","date":"2024-06-05","staff":"Ana","branch":"Centro","amount":100.5}"#,
        )
        .unwrap();
        let string: SalesRecord = serde_json::from_str(
            r#"{"id":"r_1","date":"2024-06-05","staff":"Ana","branch":"Centro","amount":"100.5"}"#,
        )
        .unwrap();

        assert_eq!(numeric.amount, dec!(100.5));
        assert_eq!(numeric, string);
        assert_eq!(numeric.note, None);
    }

    #[test]
    fn test_record_omits_empty_note() {
        let record = SalesRecord {
            id: RecordId::from("r_1"),
            date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            staff: "Ana".to_string(),
            branch: "Centro".to_string(),
            amount: dec!(10),
            note: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["date"], "2024-06-05");
    }
}

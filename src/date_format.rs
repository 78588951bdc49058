//! Serializes [time::Date] as "YYYY-MM-DD", the format used by the stored
//! records and by HTML date inputs.

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// Calendar dates, e.g. "2024-01-10".
pub const ISO_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// Day first, the way dates are shown in the transaction table, e.g. "10/01/2024".
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero]/[month repr:numerical padding:zero]/[year]");

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = date
        .format(ISO_DATE_FORMAT)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Date::parse(s.trim(), ISO_DATE_FORMAT).map_err(serde::de::Error::custom)
}

/// Parse an optional "YYYY-MM-DD" string, treating blank or malformed input as unset.
pub fn parse_optional_date(text: Option<&str>) -> Option<Date> {
    let text = text?.trim();

    if text.is_empty() {
        return None;
    }

    Date::parse(text, ISO_DATE_FORMAT)
        .inspect_err(|error| tracing::debug!("ignoring invalid date {text:?}: {error}"))
        .ok()
}

/// Format `date` as "YYYY-MM-DD".
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format `date` as "DD/MM/YYYY".
pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{format_display_date, format_iso_date, parse_optional_date};

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_optional_date(Some("2024-01-11")),
            Some(date!(2024 - 01 - 11))
        );
    }

    #[test]
    fn blank_and_invalid_dates_are_unset() {
        assert_eq!(parse_optional_date(None), None);
        assert_eq!(parse_optional_date(Some("")), None);
        assert_eq!(parse_optional_date(Some("   ")), None);
        assert_eq!(parse_optional_date(Some("11/01/2024")), None);
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_iso_date(date!(2024 - 01 - 05)), "2024-01-05");
        assert_eq!(format_display_date(date!(2024 - 01 - 05)), "05/01/2024");
    }
}

//! Conversion helpers shared by the storage and connect layers.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use std::str::FromStr;

/// Serialize a unit enum to its serde string form (e.g. `OnHold` -> `"on-hold"`).
pub fn enum_to_text<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string()
}

/// Parse a unit enum from its serde string form.
pub fn enum_from_text<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(&format!("\"{}\"", text)).ok()
}

/// Parse a decimal amount, treating blanks as zero. `None` when the text is not a number.
pub fn try_parse_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).ok()
}

/// Parse a decimal amount; blanks and garbage are zero.
pub fn parse_amount(text: &str) -> Decimal {
    try_parse_amount(text).unwrap_or(Decimal::ZERO)
}

/// Parse a platform timestamp. Accepts RFC 3339 and the zone-less
/// `YYYY-MM-DDTHH:MM:SS` form used by the e-commerce API.
pub fn parse_platform_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").ok()
}

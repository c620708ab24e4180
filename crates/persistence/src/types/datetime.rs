//! Canonical datetime text format.
//!
//! All datetimes travel as `YYYY-MM-DD HH:MM:SS`, both in JSON and in the
//! database columns, so range predicates compare correctly as text. Input
//! also accepts an ISO `T` separator and a trailing `Z`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// The canonical `strftime` pattern.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a datetime in the canonical form.
pub fn format(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parses a datetime from canonical or ISO-like text.
pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(&trimmed.replacen('T', " ", 1), DATETIME_FORMAT)
}

/// Serializes a datetime in the canonical form.
pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserializes a datetime from canonical or ISO-like text.
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| {
        serde::de::Error::custom(format!(
            "invalid datetime '{}', expected YYYY-MM-DD HH:MM:SS: {}",
            raw, e
        ))
    })
}

/// Serde adapter for optional datetimes in patch payloads.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional datetime.
    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional datetime; `null` maps to `None`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map(Some).map_err(|e| {
                serde::de::Error::custom(format!(
                    "invalid datetime '{}', expected YYYY-MM-DD HH:MM:SS: {}",
                    raw, e
                ))
            }),
            None => Ok(None),
        }
    }
}

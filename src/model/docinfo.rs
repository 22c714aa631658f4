//! Document metadata (core, extended and custom properties)

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Typed custom property value
#[derive(Clone, Debug, PartialEq)]
pub enum CustomValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl CustomValue {
    /// OOXML variant type element name (`vt:*`)
    pub fn vt_name(&self) -> &'static str {
        match self {
            CustomValue::Text(_) => "vt:lpwstr",
            CustomValue::Integer(_) => "vt:i4",
            CustomValue::Number(_) => "vt:r8",
            CustomValue::Bool(_) => "vt:bool",
            CustomValue::Date(_) => "vt:filetime",
        }
    }

    /// ODF `meta:value-type`
    pub fn odf_type(&self) -> &'static str {
        match self {
            CustomValue::Text(_) => "string",
            CustomValue::Integer(_) | CustomValue::Number(_) => "float",
            CustomValue::Bool(_) => "boolean",
            CustomValue::Date(_) => "date",
        }
    }

    /// Parse from an OOXML variant element name and its text
    pub fn from_vt(name: &str, text: &str) -> Option<Self> {
        let local = name.rsplit(':').next().unwrap_or(name);
        Some(match local {
            "lpwstr" | "lpstr" | "bstr" => CustomValue::Text(text.to_string()),
            "i1" | "i2" | "i4" | "i8" | "int" | "ui1" | "ui2" | "ui4" | "ui8" | "uint" => {
                CustomValue::Integer(text.trim().parse().ok()?)
            }
            "r4" | "r8" | "decimal" => CustomValue::Number(text.trim().parse().ok()?),
            "bool" => CustomValue::Bool(matches!(text.trim(), "true" | "1")),
            "filetime" | "date" => CustomValue::Date(parse_w3c_date(text)?),
            _ => return None,
        })
    }
}

impl std::fmt::Display for CustomValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomValue::Text(s) => f.write_str(s),
            CustomValue::Integer(i) => write!(f, "{}", i),
            CustomValue::Number(n) => write!(f, "{}", n),
            CustomValue::Bool(b) => write!(f, "{}", b),
            CustomValue::Date(d) => f.write_str(&format_w3c_date(d)),
        }
    }
}

/// Document properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocInfo {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub manager: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub custom: BTreeMap<String, CustomValue>,
}

impl DocInfo {
    pub fn set_custom(&mut self, name: impl Into<String>, value: CustomValue) {
        self.custom.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self == &DocInfo::default()
    }
}

/// `2024-01-02T03:04:05Z`
pub fn format_w3c_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse W3CDTF / RFC 3339 timestamps, accepting a missing offset as UTC
pub fn parse_w3c_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(d) = DateTime::parse_from_rfc3339(value) {
        return Some(d.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|n| n.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_dates() {
        let d = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(format_w3c_date(&d), "2024-03-01T12:30:00Z");
        assert_eq!(parse_w3c_date("2024-03-01T12:30:00Z"), Some(d));
        assert_eq!(parse_w3c_date("2024-03-01T12:30:00"), Some(d));
        assert_eq!(parse_w3c_date("yesterday"), None);
    }

    #[test]
    fn test_custom_values() {
        assert_eq!(CustomValue::from_vt("vt:i4", " 42 "), Some(CustomValue::Integer(42)));
        assert_eq!(CustomValue::from_vt("vt:bool", "true"), Some(CustomValue::Bool(true)));
        assert_eq!(CustomValue::from_vt("vt:i4", "x"), None);
        assert_eq!(CustomValue::Number(1.5).vt_name(), "vt:r8");
    }
}

//! Typed comparison values and calendar-day helpers.

use std::fmt;

use chrono::NaiveDate;

/// ISO calendar-date format used by queries and record date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A reserved literal with field-kind-specific meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialValue {
    /// The field is blank (or unset).
    Empty,
    /// The field is non-blank (or set).
    Set,
    /// The date is before today.
    Overdue,
    /// The date is today.
    Today,
    /// The date falls within the next 7 days, today included.
    Week,
    /// The date falls within the configured horizon, today included.
    Soon,
}

impl SpecialValue {
    /// All special values, in documentation order.
    pub const ALL: [SpecialValue; 6] = [
        SpecialValue::Empty,
        SpecialValue::Set,
        SpecialValue::Overdue,
        SpecialValue::Today,
        SpecialValue::Week,
        SpecialValue::Soon,
    ];

    /// Returns the literal spelling of the value.
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialValue::Empty => "empty",
            SpecialValue::Set => "set",
            SpecialValue::Overdue => "overdue",
            SpecialValue::Today => "today",
            SpecialValue::Week => "week",
            SpecialValue::Soon => "soon",
        }
    }

    /// Recognizes a special value, ignoring ASCII case.
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|special| special.as_str().eq_ignore_ascii_case(literal))
    }
}

impl fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value side of a comparison, typed by the field it is compared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A reserved literal such as `empty` or `overdue`.
    Special(SpecialValue),
    /// An integer, for numeric fields.
    Integer(i64),
    /// A calendar date, for date fields.
    Date(NaiveDate),
    /// Free text, for string, tag and full-text fields.
    Text(String),
}

impl Value {
    /// Returns the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Returns true when `text` would not survive the lexer as a bare word
/// with the same meaning.
fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.starts_with(['"', '\''])
        || text
            .chars()
            .any(|c| c.is_ascii_whitespace() || c.is_control() || ":=!<>()".contains(c))
        || ["and", "or", "not"]
            .iter()
            .any(|kw| kw.eq_ignore_ascii_case(text))
        || SpecialValue::from_literal(text).is_some()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Special(special) => write!(f, "{special}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Value::Text(text) if needs_quotes(text) => {
                let quote = if text.contains('"') { '\'' } else { '"' };
                write!(f, "{quote}{text}{quote}")
            }
            Value::Text(text) => f.write_str(text),
        }
    }
}

/// Parses a date literal typed in a query.
pub fn parse_date_literal(literal: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(literal, DATE_FORMAT).ok()
}

/// Parses the calendar day of a record's date field.
///
/// Only the first ten characters are considered, so a trailing time of day
/// (`2026-10-19T09:30:00`) is ignored. Blank or malformed input yields `None`.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_value_from_literal() {
        assert_eq!(SpecialValue::from_literal("empty"), Some(SpecialValue::Empty));
        assert_eq!(SpecialValue::from_literal("SET"), Some(SpecialValue::Set));
        assert_eq!(SpecialValue::from_literal("Overdue"), Some(SpecialValue::Overdue));
        assert_eq!(SpecialValue::from_literal("soon"), Some(SpecialValue::Soon));
        assert_eq!(SpecialValue::from_literal("tomorrow"), None);
        assert_eq!(SpecialValue::from_literal(""), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Special(SpecialValue::Week).to_string(), "week");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2026-01-05");
        assert_eq!(Value::Text("p1".to_string()).to_string(), "p1");
    }

    #[test]
    fn test_text_display_quotes_when_needed() {
        assert_eq!(Value::Text("two words".into()).to_string(), "\"two words\"");
        assert_eq!(Value::Text("a:b".into()).to_string(), "\"a:b\"");
        assert_eq!(Value::Text("empty".into()).to_string(), "\"empty\"");
        assert_eq!(Value::Text("OR".into()).to_string(), "\"OR\"");
        assert_eq!(Value::Text(String::new()).to_string(), "\"\"");
        assert_eq!(Value::Text("say \"hi\"".into()).to_string(), "'say \"hi\"'");
    }

    #[test]
    fn test_parse_record_date() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(parse_record_date("2026-10-19"), Some(day));
        assert_eq!(parse_record_date("2026-10-19T09:30:00"), Some(day));
        assert_eq!(parse_record_date(" 2026-10-19 "), Some(day));
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("next tuesday"), None);
        assert_eq!(parse_record_date("2026-13-40"), None);
    }

    #[test]
    fn test_parse_date_literal() {
        assert!(parse_date_literal("2026-02-28").is_some());
        assert!(parse_date_literal("2026-02-30").is_none());
        assert!(parse_date_literal("today").is_none());
    }
}

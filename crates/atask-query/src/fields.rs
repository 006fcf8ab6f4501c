//! The field registry: every queryable field, its semantic kind, the
//! operators it accepts and how it compares.
//!
//! All field-specific behaviour lives here. The parser asks a field's
//! [`FieldKind`] which operators it accepts and how to type a literal; the
//! evaluator asks it whether a record matches. Adding a field is a single
//! entry in [`FIELDS`].

use strsim::levenshtein;

use crate::ast::Operator;
use crate::evaluator::EvalConfig;
use crate::record::{DateField, NumberField, RecordView, StringField};
use crate::value::{parse_date_literal, parse_record_date, SpecialValue, Value};

/// Maximum edit distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

const EQUALITY: &[Operator] = &[Operator::Eq, Operator::NotEq];
const ORDERED: &[Operator] = &[Operator::Eq, Operator::NotEq, Operator::Gt, Operator::Lt];
const MEMBERSHIP: &[Operator] = &[Operator::Eq];

const PRESENCE: &[SpecialValue] = &[SpecialValue::Empty, SpecialValue::Set];

/// The semantic kind of a field, carrying the record accessor it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Case-sensitive string equality.
    ExactString(StringField),
    /// Calendar-day date comparison with relative special values.
    Date(DateField),
    /// Integer comparison.
    Numeric(NumberField),
    /// Membership in the record's tag set.
    TagSet,
    /// Case-insensitive substring search over one or more text fields.
    FullText(&'static [StringField]),
}

/// A registry entry.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field name.
    pub name: &'static str,
    /// Alternative spellings accepted in queries.
    pub aliases: &'static [&'static str],
    /// Semantic kind and accessor.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Returns true if `name` is this field's name or one of its aliases,
    /// ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Every queryable field.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "status",
        aliases: &[],
        kind: FieldKind::ExactString(StringField::Status),
    },
    FieldSpec {
        name: "priority",
        aliases: &[],
        kind: FieldKind::ExactString(StringField::Priority),
    },
    FieldSpec {
        name: "area",
        aliases: &[],
        kind: FieldKind::ExactString(StringField::Area),
    },
    FieldSpec {
        name: "assignee",
        aliases: &[],
        kind: FieldKind::ExactString(StringField::Assignee),
    },
    FieldSpec {
        name: "recur",
        aliases: &[],
        kind: FieldKind::ExactString(StringField::Recur),
    },
    FieldSpec {
        name: "project-id",
        aliases: &["project_id", "project"],
        kind: FieldKind::ExactString(StringField::ProjectId),
    },
    FieldSpec {
        name: "due-date",
        aliases: &["due", "due_date"],
        kind: FieldKind::Date(DateField::Due),
    },
    FieldSpec {
        name: "start-date",
        aliases: &["start", "start_date"],
        kind: FieldKind::Date(DateField::Start),
    },
    FieldSpec {
        name: "estimate",
        aliases: &[],
        kind: FieldKind::Numeric(NumberField::Estimate),
    },
    FieldSpec {
        name: "index-id",
        aliases: &["index_id", "id"],
        kind: FieldKind::Numeric(NumberField::IndexId),
    },
    FieldSpec {
        name: "tags",
        aliases: &["tag"],
        kind: FieldKind::TagSet,
    },
    FieldSpec {
        name: "content",
        aliases: &["body"],
        kind: FieldKind::FullText(&[StringField::Content]),
    },
    FieldSpec {
        name: "text",
        aliases: &[],
        kind: FieldKind::FullText(&[StringField::Title, StringField::Content]),
    },
    FieldSpec {
        name: "title",
        aliases: &[],
        kind: FieldKind::FullText(&[StringField::Title]),
    },
];

/// Finds a field by name or alias, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.is_named(name))
}

/// Suggests the closest known field name for a misspelled one.
pub fn suggest(name: &str) -> Option<String> {
    let query = name.to_lowercase();
    let threshold = MAX_SUGGESTION_DISTANCE.min(query.chars().count() / 2 + 1);

    let (best, distance) = FIELDS
        .iter()
        .flat_map(|spec| std::iter::once(spec.name).chain(spec.aliases.iter().copied()))
        .map(|candidate| (candidate, levenshtein(&query, candidate)))
        .min_by_key(|(_, d)| *d)?;

    if distance > 0 && distance <= threshold {
        Some(best.to_string())
    } else {
        None
    }
}

impl FieldKind {
    /// Returns the kind's name as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::ExactString(_) => "exact-string",
            FieldKind::Date(_) => "date",
            FieldKind::Numeric(_) => "numeric",
            FieldKind::TagSet => "tag-set",
            FieldKind::FullText(_) => "full-text",
        }
    }

    /// Returns the operators this kind accepts.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            FieldKind::ExactString(_) | FieldKind::Date(_) => EQUALITY,
            FieldKind::Numeric(_) => ORDERED,
            FieldKind::TagSet | FieldKind::FullText(_) => MEMBERSHIP,
        }
    }

    /// Returns the special values this kind gives meaning to.
    pub fn special_values(self) -> &'static [SpecialValue] {
        match self {
            FieldKind::ExactString(_) | FieldKind::Numeric(_) => PRESENCE,
            FieldKind::Date(_) => &SpecialValue::ALL,
            FieldKind::TagSet | FieldKind::FullText(_) => &[],
        }
    }

    /// Returns true if the kind accepts `op`.
    pub fn supports(self, op: Operator) -> bool {
        self.operators().contains(&op)
    }

    /// Types a literal for a comparison with `op`.
    ///
    /// Special values are recognized only when unquoted. On failure returns
    /// a description of what the field expects.
    pub(crate) fn parse_value(
        self,
        op: Operator,
        literal: &str,
        quoted: bool,
    ) -> Result<Value, &'static str> {
        let special = if quoted {
            None
        } else {
            SpecialValue::from_literal(literal)
                .filter(|s| self.special_values().contains(s))
        };

        match self {
            FieldKind::ExactString(_) => Ok(match special {
                Some(s) => Value::Special(s),
                None => Value::Text(literal.to_string()),
            }),
            FieldKind::Date(_) => {
                if let Some(s) = special {
                    return Ok(Value::Special(s));
                }
                parse_date_literal(literal)
                    .map(Value::Date)
                    .ok_or("a date (YYYY-MM-DD) or one of overdue, today, week, soon, empty, set")
            }
            FieldKind::Numeric(_) => {
                let ordered = matches!(op, Operator::Gt | Operator::Lt);
                match special {
                    Some(_) if ordered => Err("an integer"),
                    Some(s) => Ok(Value::Special(s)),
                    None => literal.parse::<i64>().map(Value::Integer).map_err(|_| {
                        if ordered {
                            "an integer"
                        } else {
                            "an integer, empty or set"
                        }
                    }),
                }
            }
            FieldKind::TagSet | FieldKind::FullText(_) => Ok(Value::Text(literal.to_string())),
        }
    }

    /// Returns true if `record` satisfies `op value` for this kind.
    ///
    /// Total over every input: combinations the parser never produces
    /// simply do not match.
    pub fn matches<R: RecordView + ?Sized>(
        self,
        record: &R,
        op: Operator,
        value: &Value,
        config: &EvalConfig,
    ) -> bool {
        match op {
            Operator::Eq => self.equals(record, value, config),
            Operator::NotEq => !self.equals(record, value, config),
            Operator::Gt | Operator::Lt => match self {
                FieldKind::Numeric(field) => compare_order(record.number(field), op, value),
                _ => false,
            },
        }
    }

    fn equals<R: RecordView + ?Sized>(self, record: &R, value: &Value, config: &EvalConfig) -> bool {
        match self {
            FieldKind::ExactString(field) => exact_equals(record.string(field), value),
            FieldKind::Date(field) => date_equals(record.date(field), value, config),
            FieldKind::Numeric(field) => number_equals(record.number(field), value),
            FieldKind::TagSet => value
                .as_text()
                .is_some_and(|wanted| record.tags().iter().any(|tag| tag == wanted)),
            FieldKind::FullText(fields) => value
                .as_text()
                .is_some_and(|needle| text_contains(record, fields, needle)),
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn exact_equals(actual: &str, value: &Value) -> bool {
    match value {
        Value::Special(SpecialValue::Empty) => is_blank(actual),
        Value::Special(SpecialValue::Set) => !is_blank(actual),
        Value::Text(expected) => actual == expected,
        _ => false,
    }
}

fn date_equals(raw: &str, value: &Value, config: &EvalConfig) -> bool {
    let days_until = || {
        parse_record_date(raw).map(|day| day.signed_duration_since(config.today).num_days())
    };

    match value {
        Value::Special(SpecialValue::Empty) => is_blank(raw),
        Value::Special(SpecialValue::Set) => !is_blank(raw),
        Value::Special(SpecialValue::Overdue) => days_until().is_some_and(|d| d < 0),
        Value::Special(SpecialValue::Today) => days_until() == Some(0),
        Value::Special(SpecialValue::Week) => days_until().is_some_and(|d| (0..=7).contains(&d)),
        Value::Special(SpecialValue::Soon) => {
            let horizon = i64::from(config.soon_horizon);
            days_until().is_some_and(|d| (0..=horizon).contains(&d))
        }
        Value::Date(expected) => parse_record_date(raw) == Some(*expected),
        Value::Text(text) => parse_date_literal(text)
            .is_some_and(|expected| parse_record_date(raw) == Some(expected)),
        Value::Integer(_) => false,
    }
}

fn number_equals(actual: Option<i64>, value: &Value) -> bool {
    match value {
        Value::Special(SpecialValue::Empty) => actual.is_none(),
        Value::Special(SpecialValue::Set) => actual.is_some(),
        Value::Integer(expected) => actual == Some(*expected),
        _ => false,
    }
}

fn compare_order(actual: Option<i64>, op: Operator, value: &Value) -> bool {
    match (actual, value) {
        (Some(actual), Value::Integer(bound)) => match op {
            Operator::Gt => actual > *bound,
            Operator::Lt => actual < *bound,
            Operator::Eq | Operator::NotEq => false,
        },
        _ => false,
    }
}

fn text_contains<R: RecordView + ?Sized>(record: &R, fields: &[StringField], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| record.string(*field).to_lowercase().contains(&needle))
}

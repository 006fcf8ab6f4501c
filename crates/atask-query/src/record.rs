//! The read-only accessor surface the evaluator uses to inspect records.

/// String-valued record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringField {
    Status,
    Priority,
    Area,
    Assignee,
    Recur,
    ProjectId,
    Title,
    Content,
}

/// Date-valued record fields (stored as `YYYY-MM-DD` strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Due,
    Start,
}

/// Integer-valued record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberField {
    Estimate,
    IndexId,
}

/// Read-only view of a candidate record.
///
/// Implementations must be side-effect free: the evaluator may call any
/// accessor any number of times, from several threads at once when the
/// implementing type is `Sync`.
///
/// # Example
///
/// ```
/// use atask_query::{DateField, NumberField, RecordView, StringField};
///
/// struct Note {
///     title: String,
/// }
///
/// impl RecordView for Note {
///     fn string(&self, field: StringField) -> &str {
///         match field {
///             StringField::Title => &self.title,
///             _ => "",
///         }
///     }
///
///     fn date(&self, _field: DateField) -> &str {
///         ""
///     }
///
///     fn number(&self, _field: NumberField) -> Option<i64> {
///         None
///     }
///
///     fn tags(&self) -> &[String] {
///         &[]
///     }
/// }
/// ```
pub trait RecordView {
    /// Returns a string field, blank when unset.
    fn string(&self, field: StringField) -> &str;

    /// Returns a date field as stored, blank when unset.
    fn date(&self, field: DateField) -> &str;

    /// Returns an integer field, `None` when unset.
    fn number(&self, field: NumberField) -> Option<i64>;

    /// Returns the record's tags.
    fn tags(&self) -> &[String];
}

impl<T: RecordView + ?Sized> RecordView for &T {
    fn string(&self, field: StringField) -> &str {
        (**self).string(field)
    }

    fn date(&self, field: DateField) -> &str {
        (**self).date(field)
    }

    fn number(&self, field: NumberField) -> Option<i64> {
        (**self).number(field)
    }

    fn tags(&self) -> &[String] {
        (**self).tags()
    }
}

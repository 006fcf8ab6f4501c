//! Common helper functions for output formatting.

use atask_query::parse_record_date;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Task and project statuses that no longer need attention.
const CLOSED_STATUSES: &[&str] = &["done", "dropped", "completed", "cancelled"];

/// Returns true if the status marks a finished task or project.
pub fn is_closed(status: &str) -> bool {
    CLOSED_STATUSES.contains(&status)
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats priority for display, padded to `width`.
pub fn format_priority(priority: &str, width: usize, use_colors: bool) -> String {
    let label = format!("{priority:<width$}");

    if use_colors {
        match priority {
            "p1" => label.red().to_string(),
            "p2" => label.yellow().to_string(),
            "p3" => label.blue().to_string(),
            _ => label.dimmed().to_string(),
        }
    } else {
        label
    }
}

/// Formats a due date relative to `today`, padded to `width`.
///
/// Overdue dates are red unless the task is closed; dates that do not parse
/// are shown as written.
pub fn format_due(
    due_date: &str,
    closed: bool,
    today: NaiveDate,
    width: usize,
    use_colors: bool,
) -> String {
    let Some(date) = parse_record_date(due_date) else {
        return format!("{due_date:<width$}");
    };

    let days = date.signed_duration_since(today).num_days();
    let display = match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        _ => date.format("%b %d").to_string(),
    };
    let display = format!("{display:<width$}");

    if use_colors {
        if days < 0 && !closed {
            display.red().to_string()
        } else if days == 0 {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Formats a status for display, padded to `width`. Closed statuses are dimmed.
pub fn format_status(status: &str, width: usize, use_colors: bool) -> String {
    let label = format!("{status:<width$}");
    if use_colors && is_closed(status) {
        label.dimmed().to_string()
    } else {
        label
    }
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    let joined = formatted.join(" ");

    truncate_str(&joined, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is long", 10), "this is...");
        assert_eq!(truncate_str("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_format_priority_no_colors() {
        assert_eq!(format_priority("p1", 4, false), "p1  ");
        assert_eq!(format_priority("", 4, false), "    ");
    }

    #[test]
    fn test_format_priority_colors_after_padding() {
        let colored = format_priority("p1", 4, true);
        assert!(colored.contains("p1  "));
        assert_ne!(colored, "p1  ");
    }

    #[test]
    fn test_format_due_relative() {
        assert_eq!(format_due("2026-10-19", false, today(), 0, false), "Today");
        assert_eq!(format_due("2026-10-20", false, today(), 0, false), "Tomorrow");
        assert_eq!(format_due("2026-10-18", false, today(), 0, false), "Yesterday");
        assert_eq!(format_due("2026-10-10", false, today(), 0, false), "9 days ago");
        assert_eq!(format_due("2026-12-01", false, today(), 0, false), "Dec 01");
        assert_eq!(format_due("2026-10-19T09:00", false, today(), 0, false), "Today");
    }

    #[test]
    fn test_format_due_blank_and_unparsable() {
        assert_eq!(format_due("", false, today(), 4, false), "    ");
        assert_eq!(format_due("someday", false, today(), 0, false), "someday");
    }

    #[test]
    fn test_format_due_overdue_color() {
        let open = format_due("2026-10-10", false, today(), 12, true);
        let done = format_due("2026-10-10", true, today(), 12, true);
        assert!(open.contains("\u{1b}[31m"));
        assert_eq!(done, "9 days ago  ");
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status("open", 6, true), "open  ");
        assert_ne!(format_status("done", 6, true), "done  ");
        assert_eq!(format_status("done", 6, false), "done  ");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&[], 15), "");
        assert_eq!(format_tags(&["home".to_string()], 15), "#home");
        assert_eq!(
            format_tags(&["a".to_string(), "b".to_string()], 15),
            "#a #b"
        );
    }

    #[test]
    fn test_is_closed() {
        assert!(is_closed("done"));
        assert!(is_closed("dropped"));
        assert!(is_closed("completed"));
        assert!(is_closed("cancelled"));
        assert!(!is_closed("paused"));
        assert!(!is_closed("open"));
        assert!(!is_closed("Done"));
    }
}

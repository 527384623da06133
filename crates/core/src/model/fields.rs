//! Field rules shared by the record kinds.

use thiserror::Error;

use crate::model::catalog::Catalog;

/// Upper bound for hours logged or planned in a single entry.
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Longest remark accepted on study records and plans, in characters.
pub const MAX_REMARKS_CHARS: usize = 250;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HoursError {
    #[error("hours must be greater than zero")]
    NotPositive,

    #[error("hours cannot exceed 24 in a single entry")]
    TooMany,
}

/// A subject/chapter pair that does not match the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("chapter {chapter} is not listed under {subject}")]
    UnknownChapter { subject: String, chapter: String },
}

pub(crate) fn check_hours(hours: f64) -> Result<f64, HoursError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(HoursError::NotPositive);
    }
    if hours > MAX_HOURS_PER_ENTRY {
        return Err(HoursError::TooMany);
    }
    Ok(hours)
}

pub(crate) fn check_selection(
    catalog: &Catalog,
    subject: &str,
    chapter: &str,
) -> Result<(), SelectionError> {
    if !catalog.has_subject(subject) {
        return Err(SelectionError::UnknownSubject(subject.to_owned()));
    }
    if !catalog.has_chapter(subject, chapter) {
        return Err(SelectionError::UnknownChapter {
            subject: subject.to_owned(),
            chapter: chapter.to_owned(),
        });
    }
    Ok(())
}

/// Trims optional free text; blank input becomes `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}

/// Character count of an optional remark when it exceeds the limit.
pub(crate) fn remarks_overflow(remarks: Option<&str>) -> Option<usize> {
    let len = remarks?.chars().count();
    (len > MAX_REMARKS_CHARS).then_some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_bounds() {
        assert_eq!(check_hours(0.0), Err(HoursError::NotPositive));
        assert_eq!(check_hours(-1.0), Err(HoursError::NotPositive));
        assert_eq!(check_hours(f64::NAN), Err(HoursError::NotPositive));
        assert_eq!(check_hours(24.5), Err(HoursError::TooMany));
        assert_eq!(check_hours(0.5), Ok(0.5));
        assert_eq!(check_hours(24.0), Ok(24.0));
    }

    #[test]
    fn blank_text_is_dropped() {
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(Some(" ok ".into())), Some("ok".into()));
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn remarks_limit_counts_characters() {
        let at_limit = "અ".repeat(MAX_REMARKS_CHARS);
        assert_eq!(remarks_overflow(Some(&at_limit)), None);
        let over = "a".repeat(MAX_REMARKS_CHARS + 1);
        assert_eq!(remarks_overflow(Some(&over)), Some(MAX_REMARKS_CHARS + 1));
    }
}

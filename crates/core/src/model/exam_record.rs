use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::analytics::percent::percentage_of;
use crate::model::catalog::Catalog;
use crate::model::fields;
use crate::model::ids::ExamRecordId;

/// Largest maximum-marks value an exam may declare.
pub const MAX_EXAM_MARKS: u32 = 1000;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamRecordError {
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    #[error("unknown exam type: {0}")]
    UnknownExamType(String),

    #[error("maximum marks must be between 1 and 1000, got {0}")]
    InvalidMaximumMarks(u32),

    #[error("marks scored ({marks}) cannot be more than maximum marks ({maximum})")]
    MarksExceedMaximum { marks: u32, maximum: u32 },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated exam result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRecordDraft {
    pub exam_date: NaiveDate,
    pub subject: String,
    pub exam_type: String,
    pub maximum_marks: u32,
    pub marks_scored: u32,
    pub improvements: Option<String>,
}

impl ExamRecordDraft {
    /// Validate the draft against the catalog and the marks rules.
    ///
    /// # Errors
    ///
    /// Returns `ExamRecordError::MarksExceedMaximum` when the score is above
    /// the maximum, or another variant for catalog and range failures.
    pub fn validate(self, catalog: &Catalog) -> Result<ExamRecordFields, ExamRecordError> {
        if !catalog.has_subject(&self.subject) {
            return Err(ExamRecordError::UnknownSubject(self.subject));
        }
        if !catalog.has_exam_type(&self.exam_type) {
            return Err(ExamRecordError::UnknownExamType(self.exam_type));
        }
        self.validate_values()
    }

    fn validate_values(self) -> Result<ExamRecordFields, ExamRecordError> {
        if !(1..=MAX_EXAM_MARKS).contains(&self.maximum_marks) {
            return Err(ExamRecordError::InvalidMaximumMarks(self.maximum_marks));
        }
        if self.marks_scored > self.maximum_marks {
            return Err(ExamRecordError::MarksExceedMaximum {
                marks: self.marks_scored,
                maximum: self.maximum_marks,
            });
        }
        Ok(ExamRecordFields {
            exam_date: self.exam_date,
            subject: self.subject,
            exam_type: self.exam_type,
            maximum_marks: self.maximum_marks,
            marks_scored: self.marks_scored,
            improvements: fields::normalize_optional(self.improvements),
        })
    }
}

//
// ─── VALIDATED FIELDS ──────────────────────────────────────────────────────────
//

/// Exam fields that passed validation and are ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamRecordFields {
    exam_date: NaiveDate,
    subject: String,
    exam_type: String,
    maximum_marks: u32,
    marks_scored: u32,
    improvements: Option<String>,
}

impl ExamRecordFields {
    #[must_use]
    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn exam_type(&self) -> &str {
        &self.exam_type
    }

    #[must_use]
    pub fn maximum_marks(&self) -> u32 {
        self.maximum_marks
    }

    #[must_use]
    pub fn marks_scored(&self) -> u32 {
        self.marks_scored
    }

    #[must_use]
    pub fn improvements(&self) -> Option<&str> {
        self.improvements.as_deref()
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// A formal assessment result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamRecord {
    id: ExamRecordId,
    #[serde(flatten)]
    fields: ExamRecordFields,
    created_at: DateTime<Utc>,
}

impl ExamRecord {
    #[must_use]
    pub fn new(id: ExamRecordId, fields: ExamRecordFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Rehydrate a stored exam result without consulting the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ExamRecordError` if the stored marks break the range rules.
    pub fn from_persisted(
        id: ExamRecordId,
        draft: ExamRecordDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ExamRecordError> {
        Ok(Self::new(id, draft.validate_values()?, created_at))
    }

    #[must_use]
    pub fn id(&self) -> ExamRecordId {
        self.id
    }

    #[must_use]
    pub fn fields(&self) -> &ExamRecordFields {
        &self.fields
    }

    #[must_use]
    pub fn exam_date(&self) -> NaiveDate {
        self.fields.exam_date
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.fields.subject
    }

    #[must_use]
    pub fn exam_type(&self) -> &str {
        &self.fields.exam_type
    }

    #[must_use]
    pub fn maximum_marks(&self) -> u32 {
        self.fields.maximum_marks
    }

    #[must_use]
    pub fn marks_scored(&self) -> u32 {
        self.fields.marks_scored
    }

    #[must_use]
    pub fn improvements(&self) -> Option<&str> {
        self.fields.improvements.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Score as a percentage of the maximum, rounded half-to-even to one decimal.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage_of(
            u64::from(self.fields.marks_scored),
            u64::from(self.fields.maximum_marks),
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft(maximum_marks: u32, marks_scored: u32) -> ExamRecordDraft {
        ExamRecordDraft {
            exam_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            subject: "Math".into(),
            exam_type: "Mock Test".into(),
            maximum_marks,
            marks_scored,
            improvements: None,
        }
    }

    #[test]
    fn marks_above_maximum_are_rejected() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            draft(80, 81).validate(&catalog).unwrap_err(),
            ExamRecordError::MarksExceedMaximum {
                marks: 81,
                maximum: 80
            }
        );
        assert!(draft(80, 80).validate(&catalog).is_ok());
    }

    #[test]
    fn maximum_marks_must_be_in_range() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            draft(0, 0).validate(&catalog).unwrap_err(),
            ExamRecordError::InvalidMaximumMarks(0)
        );
        assert_eq!(
            draft(1001, 10).validate(&catalog).unwrap_err(),
            ExamRecordError::InvalidMaximumMarks(1001)
        );
    }

    #[test]
    fn exam_type_comes_from_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let mut d = draft(100, 50);
        d.exam_type = "Olympiad".into();
        assert_eq!(
            d.validate(&catalog).unwrap_err(),
            ExamRecordError::UnknownExamType("Olympiad".into())
        );
    }

    #[test]
    fn percentage_rounds_half_to_even() {
        let exam = ExamRecord::from_persisted(ExamRecordId::new(1), draft(80, 45), fixed_now())
            .unwrap();
        assert_eq!(exam.percentage(), 56.2);
        assert_eq!(exam.percentage(), exam.percentage());
    }
}

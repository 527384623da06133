use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::catalog::Catalog;
use crate::model::fields::{
    self, HoursError, SelectionError, check_hours, check_selection,
};
use crate::model::ids::StudyRecordId;

/// Highest score a quick test during a study session can record.
pub const MAX_QUICK_TEST_MARKS: u32 = 100;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyRecordError {
    #[error(transparent)]
    Hours(#[from] HoursError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("unknown book or material: {0}")]
    UnknownMaterial(String),

    #[error("quick test marks must be between 0 and 100, got {0}")]
    MarksOutOfRange(u32),

    #[error("marks can only be recorded when a test was given")]
    MarksWithoutTest,

    #[error("remarks are limited to 250 characters, got {0}")]
    RemarksTooLong(usize),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated input for a study session, as collected by a form.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRecordDraft {
    pub date: NaiveDate,
    pub subject: String,
    pub chapter: String,
    pub book_material: String,
    pub hours_studied: f64,
    pub test_given: bool,
    pub marks_scored: Option<u32>,
    pub remarks: Option<String>,
}

impl StudyRecordDraft {
    /// Validate the draft against the catalog and the numeric rules.
    ///
    /// # Errors
    ///
    /// Returns `StudyRecordError` describing the first rule that failed.
    pub fn validate(self, catalog: &Catalog) -> Result<StudyRecordFields, StudyRecordError> {
        check_selection(catalog, &self.subject, &self.chapter)?;
        if !catalog.has_material(&self.book_material) {
            return Err(StudyRecordError::UnknownMaterial(self.book_material));
        }
        self.validate_values()
    }

    /// Numeric and text rules only; used when rehydrating stored rows.
    fn validate_values(self) -> Result<StudyRecordFields, StudyRecordError> {
        let hours_studied = check_hours(self.hours_studied)?;
        if let Some(marks) = self.marks_scored {
            if !self.test_given {
                return Err(StudyRecordError::MarksWithoutTest);
            }
            if marks > MAX_QUICK_TEST_MARKS {
                return Err(StudyRecordError::MarksOutOfRange(marks));
            }
        }
        let remarks = fields::normalize_optional(self.remarks);
        if let Some(len) = fields::remarks_overflow(remarks.as_deref()) {
            return Err(StudyRecordError::RemarksTooLong(len));
        }

        Ok(StudyRecordFields {
            date: self.date,
            subject: self.subject,
            chapter: self.chapter,
            book_material: self.book_material,
            hours_studied,
            test_given: self.test_given,
            marks_scored: self.marks_scored,
            remarks,
        })
    }
}

//
// ─── VALIDATED FIELDS ──────────────────────────────────────────────────────────
//

/// Study session fields that passed validation and are ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRecordFields {
    date: NaiveDate,
    subject: String,
    chapter: String,
    book_material: String,
    hours_studied: f64,
    test_given: bool,
    marks_scored: Option<u32>,
    remarks: Option<String>,
}

impl StudyRecordFields {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    #[must_use]
    pub fn book_material(&self) -> &str {
        &self.book_material
    }

    #[must_use]
    pub fn hours_studied(&self) -> f64 {
        self.hours_studied
    }

    #[must_use]
    pub fn test_given(&self) -> bool {
        self.test_given
    }

    #[must_use]
    pub fn marks_scored(&self) -> Option<u32> {
        self.marks_scored
    }

    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One logged study session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRecord {
    id: StudyRecordId,
    #[serde(flatten)]
    fields: StudyRecordFields,
    created_at: DateTime<Utc>,
}

impl StudyRecord {
    #[must_use]
    pub fn new(id: StudyRecordId, fields: StudyRecordFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Rehydrate a stored study session.
    ///
    /// The catalog is not consulted so edits to it never hide history.
    ///
    /// # Errors
    ///
    /// Returns `StudyRecordError` if the stored values break a numeric rule.
    pub fn from_persisted(
        id: StudyRecordId,
        draft: StudyRecordDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, StudyRecordError> {
        Ok(Self::new(id, draft.validate_values()?, created_at))
    }

    #[must_use]
    pub fn id(&self) -> StudyRecordId {
        self.id
    }

    #[must_use]
    pub fn fields(&self) -> &StudyRecordFields {
        &self.fields
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.fields.date
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.fields.subject
    }

    #[must_use]
    pub fn chapter(&self) -> &str {
        &self.fields.chapter
    }

    #[must_use]
    pub fn book_material(&self) -> &str {
        &self.fields.book_material
    }

    #[must_use]
    pub fn hours_studied(&self) -> f64 {
        self.fields.hours_studied
    }

    #[must_use]
    pub fn test_given(&self) -> bool {
        self.fields.test_given
    }

    #[must_use]
    pub fn marks_scored(&self) -> Option<u32> {
        self.fields.marks_scored
    }

    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.fields.remarks.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

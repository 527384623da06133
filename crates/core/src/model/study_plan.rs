use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::catalog::Catalog;
use crate::model::fields::{self, HoursError, SelectionError, check_hours, check_selection};
use crate::model::ids::StudyPlanId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyPlanError {
    #[error(transparent)]
    Hours(#[from] HoursError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("remarks are limited to 250 characters, got {0}")]
    RemarksTooLong(usize),
}

/// Unvalidated input for a planned study session.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyPlanDraft {
    pub plan_date: NaiveDate,
    pub subject: String,
    pub chapter: String,
    pub planned_hours: f64,
    pub remarks: Option<String>,
}

impl StudyPlanDraft {
    /// Validate the draft against the catalog and the hour limits.
    ///
    /// # Errors
    ///
    /// Returns `StudyPlanError` describing the first rule that failed.
    pub fn validate(self, catalog: &Catalog) -> Result<StudyPlanFields, StudyPlanError> {
        check_selection(catalog, &self.subject, &self.chapter)?;
        self.validate_values()
    }

    fn validate_values(self) -> Result<StudyPlanFields, StudyPlanError> {
        let planned_hours = check_hours(self.planned_hours)?;
        let remarks = fields::normalize_optional(self.remarks);
        if let Some(len) = fields::remarks_overflow(remarks.as_deref()) {
            return Err(StudyPlanError::RemarksTooLong(len));
        }
        Ok(StudyPlanFields {
            plan_date: self.plan_date,
            subject: self.subject,
            chapter: self.chapter,
            planned_hours,
            remarks,
        })
    }
}

/// Plan fields that passed validation and are ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPlanFields {
    plan_date: NaiveDate,
    subject: String,
    chapter: String,
    planned_hours: f64,
    remarks: Option<String>,
}

impl StudyPlanFields {
    #[must_use]
    pub fn plan_date(&self) -> NaiveDate {
        self.plan_date
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
    pub fn planned_hours(&self) -> f64 {
        self.planned_hours
    }

    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }
}

/// A planned study session, compared against logged sessions on the same
/// date, subject and chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyPlan {
    id: StudyPlanId,
    #[serde(flatten)]
    fields: StudyPlanFields,
    created_at: DateTime<Utc>,
}

impl StudyPlan {
    #[must_use]
    pub fn new(id: StudyPlanId, fields: StudyPlanFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Rehydrate a stored plan without consulting the catalog.
    ///
    /// # Errors
    ///
    /// Returns `StudyPlanError` if the stored hours or remarks are invalid.
    pub fn from_persisted(
        id: StudyPlanId,
        draft: StudyPlanDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, StudyPlanError> {
        Ok(Self::new(id, draft.validate_values()?, created_at))
    }

    #[must_use]
    pub fn id(&self) -> StudyPlanId {
        self.id
    }

    #[must_use]
    pub fn fields(&self) -> &StudyPlanFields {
        &self.fields
    }

    #[must_use]
    pub fn plan_date(&self) -> NaiveDate {
        self.fields.plan_date
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
    pub fn planned_hours(&self) -> f64 {
        self.fields.planned_hours
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

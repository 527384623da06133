use std::sync::Arc;

use storage::repository::ExamRecordRepository;
use study_core::model::{Catalog, ExamRecord, ExamRecordDraft, ExamRecordId};

use crate::Clock;
use crate::error::ExamServiceError;
use crate::outcome::DeleteOutcome;

/// Stores formal exam results.
#[derive(Clone)]
pub struct ExamService {
    clock: Clock,
    catalog: Arc<Catalog>,
    exams: Arc<dyn ExamRecordRepository>,
}

impl ExamService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, exams: Arc<dyn ExamRecordRepository>) -> Self {
        Self {
            clock,
            catalog,
            exams,
        }
    }

    /// Validate and persist an exam result.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Validation` when the subject or exam type is
    /// unknown or the marks exceed the maximum.
    /// Returns `ExamServiceError::Storage` if persistence fails.
    pub async fn record_exam(&self, draft: ExamRecordDraft) -> Result<ExamRecord, ExamServiceError> {
        let fields = draft.validate(&self.catalog)?;
        let now = self.clock.now();
        let id = self.exams.insert_exam_record(&fields, now).await?;
        tracing::info!(%id, subject = fields.subject(), exam_type = fields.exam_type(), "recorded exam");
        Ok(ExamRecord::new(id, fields, now))
    }

    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` if repository access fails.
    pub async fn list_exams(&self) -> Result<Vec<ExamRecord>, ExamServiceError> {
        Ok(self.exams.list_exam_records().await?)
    }

    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` if the delete fails.
    pub async fn delete_exam(&self, id: ExamRecordId) -> Result<DeleteOutcome, ExamServiceError> {
        let outcome = DeleteOutcome::from_removed(self.exams.delete_exam_record(id).await?);
        if outcome.is_removed() {
            tracing::info!(%id, "deleted exam record");
        } else {
            tracing::warn!(%id, "exam record not found, nothing deleted");
        }
        Ok(outcome)
    }
}

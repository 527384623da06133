use std::sync::Arc;

use storage::repository::StudyRecordRepository;
use study_core::model::{Catalog, StudyRecord, StudyRecordDraft, StudyRecordId};

use crate::Clock;
use crate::error::StudyLogServiceError;
use crate::outcome::DeleteOutcome;

/// Logs, lists and removes study sessions.
#[derive(Clone)]
pub struct StudyLogService {
    clock: Clock,
    catalog: Arc<Catalog>,
    records: Arc<dyn StudyRecordRepository>,
}

impl StudyLogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<Catalog>,
        records: Arc<dyn StudyRecordRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            records,
        }
    }

    /// Validate a session against the catalog and persist it.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `StudyLogServiceError::Validation` for invalid input.
    /// Returns `StudyLogServiceError::Storage` if persistence fails.
    pub async fn log_session(
        &self,
        draft: StudyRecordDraft,
    ) -> Result<StudyRecord, StudyLogServiceError> {
        let fields = draft.validate(&self.catalog)?;
        let now = self.clock.now();
        let id = self.records.insert_study_record(&fields, now).await?;
        tracing::info!(%id, subject = fields.subject(), hours = fields.hours_studied(), "logged study session");
        Ok(StudyRecord::new(id, fields, now))
    }

    /// All sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StudyLogServiceError::Storage` if repository access fails.
    pub async fn list_sessions(&self) -> Result<Vec<StudyRecord>, StudyLogServiceError> {
        Ok(self.records.list_study_records().await?)
    }

    /// # Errors
    ///
    /// Returns `StudyLogServiceError::Storage` if repository access fails.
    pub async fn get_session(
        &self,
        id: StudyRecordId,
    ) -> Result<Option<StudyRecord>, StudyLogServiceError> {
        Ok(self.records.get_study_record(id).await?)
    }

    /// Remove one session by id.
    ///
    /// # Errors
    ///
    /// Returns `StudyLogServiceError::Storage` if the delete fails.
    pub async fn delete_session(
        &self,
        id: StudyRecordId,
    ) -> Result<DeleteOutcome, StudyLogServiceError> {
        let outcome = DeleteOutcome::from_removed(self.records.delete_study_record(id).await?);
        if outcome.is_removed() {
            tracing::info!(%id, "deleted study session");
        } else {
            tracing::warn!(%id, "study session not found, nothing deleted");
        }
        Ok(outcome)
    }
}

//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::model::{ExamRecordError, StudyPlanError, StudyRecordError};

/// Errors emitted by `StudyLogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyLogServiceError {
    #[error(transparent)]
    Validation(#[from] StudyRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyPlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyPlanServiceError {
    #[error(transparent)]
    Validation(#[from] StudyPlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ExamService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamServiceError {
    #[error(transparent)]
    Validation(#[from] ExamRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error("no subject named {0:?} in the catalog or in logged sessions")]
    UnknownSubject(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DemoSeeder`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Domain(#[from] study_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

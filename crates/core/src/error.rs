use thiserror::Error;

use crate::model::{CatalogError, ExamRecordError, StudyPlanError, StudyRecordError};

/// Any domain failure raised by this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    StudyRecord(#[from] StudyRecordError),
    #[error(transparent)]
    StudyPlan(#[from] StudyPlanError),
    #[error(transparent)]
    ExamRecord(#[from] ExamRecordError),
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use study_core::model::{
    ExamRecord, ExamRecordFields, ExamRecordId, StudyPlan, StudyPlanFields, StudyPlanId,
    StudyRecord, StudyRecordFields, StudyRecordId,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for logged study sessions.
///
/// Listing returns the newest study date first; sessions on the same date
/// come back highest id first.
#[async_trait]
pub trait StudyRecordRepository: Send + Sync {
    /// Persist validated fields and return the assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_study_record(
        &self,
        fields: &StudyRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyRecordId, StorageError>;

    /// Fetch one session, `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn get_study_record(
        &self,
        id: StudyRecordId,
    ) -> Result<Option<StudyRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn list_study_records(&self) -> Result<Vec<StudyRecord>, StorageError>;

    /// Remove a session. Returns `false` when no row had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete statement fails.
    async fn delete_study_record(&self, id: StudyRecordId) -> Result<bool, StorageError>;
}

/// Repository contract for study plans, ordered like study records by plan date.
#[async_trait]
pub trait StudyPlanRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_study_plan(
        &self,
        fields: &StudyPlanFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyPlanId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn get_study_plan(&self, id: StudyPlanId) -> Result<Option<StudyPlan>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn list_study_plans(&self) -> Result<Vec<StudyPlan>, StorageError>;

    /// Remove a plan. Returns `false` when no row had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete statement fails.
    async fn delete_study_plan(&self, id: StudyPlanId) -> Result<bool, StorageError>;
}

/// Repository contract for exam results, ordered by exam date.
#[async_trait]
pub trait ExamRecordRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be stored.
    async fn insert_exam_record(
        &self,
        fields: &ExamRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<ExamRecordId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn get_exam_record(
        &self,
        id: ExamRecordId,
    ) -> Result<Option<ExamRecord>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn list_exam_records(&self) -> Result<Vec<ExamRecord>, StorageError>;

    /// Remove an exam result. Returns `false` when no row had that id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the delete statement fails.
    async fn delete_exam_record(&self, id: ExamRecordId) -> Result<bool, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct Tables {
    last_id: u64,
    study_records: BTreeMap<u64, StudyRecord>,
    study_plans: BTreeMap<u64, StudyPlan>,
    exam_records: BTreeMap<u64, ExamRecord>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Ids are drawn from one counter shared by all three kinds, so they are
/// unique per kind as the store contract requires.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

/// Newest first by `date`, ties broken by descending id.
fn newest_first<T, K: Ord>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = rows.collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

#[async_trait]
impl StudyRecordRepository for InMemoryRepository {
    async fn insert_study_record(
        &self,
        fields: &StudyRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyRecordId, StorageError> {
        let mut guard = self.lock()?;
        let id = StudyRecordId::new(guard.next_id());
        guard
            .study_records
            .insert(id.value(), StudyRecord::new(id, fields.clone(), created_at));
        Ok(id)
    }

    async fn get_study_record(
        &self,
        id: StudyRecordId,
    ) -> Result<Option<StudyRecord>, StorageError> {
        Ok(self.lock()?.study_records.get(&id.value()).cloned())
    }

    async fn list_study_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let guard = self.lock()?;
        Ok(newest_first(guard.study_records.values().cloned(), |r| {
            (r.date(), r.id())
        }))
    }

    async fn delete_study_record(&self, id: StudyRecordId) -> Result<bool, StorageError> {
        Ok(self.lock()?.study_records.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl StudyPlanRepository for InMemoryRepository {
    async fn insert_study_plan(
        &self,
        fields: &StudyPlanFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyPlanId, StorageError> {
        let mut guard = self.lock()?;
        let id = StudyPlanId::new(guard.next_id());
        guard
            .study_plans
            .insert(id.value(), StudyPlan::new(id, fields.clone(), created_at));
        Ok(id)
    }

    async fn get_study_plan(&self, id: StudyPlanId) -> Result<Option<StudyPlan>, StorageError> {
        Ok(self.lock()?.study_plans.get(&id.value()).cloned())
    }

    async fn list_study_plans(&self) -> Result<Vec<StudyPlan>, StorageError> {
        let guard = self.lock()?;
        Ok(newest_first(guard.study_plans.values().cloned(), |p| {
            (p.plan_date(), p.id())
        }))
    }

    async fn delete_study_plan(&self, id: StudyPlanId) -> Result<bool, StorageError> {
        Ok(self.lock()?.study_plans.remove(&id.value()).is_some())
    }
}

#[async_trait]
impl ExamRecordRepository for InMemoryRepository {
    async fn insert_exam_record(
        &self,
        fields: &ExamRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<ExamRecordId, StorageError> {
        let mut guard = self.lock()?;
        let id = ExamRecordId::new(guard.next_id());
        guard
            .exam_records
            .insert(id.value(), ExamRecord::new(id, fields.clone(), created_at));
        Ok(id)
    }

    async fn get_exam_record(
        &self,
        id: ExamRecordId,
    ) -> Result<Option<ExamRecord>, StorageError> {
        Ok(self.lock()?.exam_records.get(&id.value()).cloned())
    }

    async fn list_exam_records(&self) -> Result<Vec<ExamRecord>, StorageError> {
        let guard = self.lock()?;
        Ok(newest_first(guard.exam_records.values().cloned(), |e| {
            (e.exam_date(), e.id())
        }))
    }

    async fn delete_exam_record(&self, id: ExamRecordId) -> Result<bool, StorageError> {
        Ok(self.lock()?.exam_records.remove(&id.value()).is_some())
    }
}

/// Aggregates the three record repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub study_records: Arc<dyn StudyRecordRepository>,
    pub study_plans: Arc<dyn StudyPlanRepository>,
    pub exam_records: Arc<dyn ExamRecordRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let study_records: Arc<dyn StudyRecordRepository> = Arc::new(repo.clone());
        let study_plans: Arc<dyn StudyPlanRepository> = Arc::new(repo.clone());
        let exam_records: Arc<dyn ExamRecordRepository> = Arc::new(repo);
        Self {
            study_records,
            study_plans,
            exam_records,
        }
    }
}

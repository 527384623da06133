use chrono::{DateTime, Utc};
use study_core::model::{StudyPlan, StudyPlanFields, StudyPlanId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_study_plan_row, study_plan_id_from_i64};
use crate::repository::{StorageError, StudyPlanRepository};

#[async_trait::async_trait]
impl StudyPlanRepository for SqliteRepository {
    async fn insert_study_plan(
        &self,
        fields: &StudyPlanFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyPlanId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO study_plans (plan_date, subject, chapter, planned_hours, remarks, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(fields.plan_date())
        .bind(fields.subject())
        .bind(fields.chapter())
        .bind(fields.planned_hours())
        .bind(fields.remarks())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        study_plan_id_from_i64(res.last_insert_rowid())
    }

    async fn get_study_plan(&self, id: StudyPlanId) -> Result<Option<StudyPlan>, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, plan_date, subject, chapter, planned_hours, remarks, created_at
            FROM study_plans WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_study_plan_row).transpose()
    }

    async fn list_study_plans(&self) -> Result<Vec<StudyPlan>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_date, subject, chapter, planned_hours, remarks, created_at
            FROM study_plans
            ORDER BY plan_date DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_study_plan_row).collect()
    }

    async fn delete_study_plan(&self, id: StudyPlanId) -> Result<bool, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(false);
        };
        let res = sqlx::query("DELETE FROM study_plans WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }
}

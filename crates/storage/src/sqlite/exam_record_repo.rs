use chrono::{DateTime, Utc};
use study_core::model::{ExamRecord, ExamRecordFields, ExamRecordId};

use super::SqliteRepository;
use super::mapping::{conn, exam_record_id_from_i64, id_to_i64, map_exam_record_row};
use crate::repository::{ExamRecordRepository, StorageError};

#[async_trait::async_trait]
impl ExamRecordRepository for SqliteRepository {
    async fn insert_exam_record(
        &self,
        fields: &ExamRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<ExamRecordId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO exam_records (exam_date, subject, exam_type, maximum_marks, marks_scored, improvements, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(fields.exam_date())
        .bind(fields.subject())
        .bind(fields.exam_type())
        .bind(i64::from(fields.maximum_marks()))
        .bind(i64::from(fields.marks_scored()))
        .bind(fields.improvements())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        exam_record_id_from_i64(res.last_insert_rowid())
    }

    async fn get_exam_record(
        &self,
        id: ExamRecordId,
    ) -> Result<Option<ExamRecord>, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, exam_date, subject, exam_type, maximum_marks, marks_scored, improvements, created_at
            FROM exam_records WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_exam_record_row).transpose()
    }

    async fn list_exam_records(&self) -> Result<Vec<ExamRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, exam_date, subject, exam_type, maximum_marks, marks_scored, improvements, created_at
            FROM exam_records
            ORDER BY exam_date DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_exam_record_row).collect()
    }

    async fn delete_exam_record(&self, id: ExamRecordId) -> Result<bool, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(false);
        };
        let res = sqlx::query("DELETE FROM exam_records WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }
}

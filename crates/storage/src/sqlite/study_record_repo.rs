use chrono::{DateTime, Utc};
use study_core::model::{StudyRecord, StudyRecordFields, StudyRecordId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_study_record_row, study_record_id_from_i64};
use crate::repository::{StorageError, StudyRecordRepository};

#[async_trait::async_trait]
impl StudyRecordRepository for SqliteRepository {
    async fn insert_study_record(
        &self,
        fields: &StudyRecordFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudyRecordId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO study_records (date, subject, chapter, book_material, hours_studied, test_given, marks_scored, remarks, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(fields.date())
        .bind(fields.subject())
        .bind(fields.chapter())
        .bind(fields.book_material())
        .bind(fields.hours_studied())
        .bind(i64::from(fields.test_given()))
        .bind(fields.marks_scored().map(i64::from))
        .bind(fields.remarks())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        study_record_id_from_i64(res.last_insert_rowid())
    }

    async fn get_study_record(
        &self,
        id: StudyRecordId,
    ) -> Result<Option<StudyRecord>, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(None);
        };
        let row = sqlx::query(
            r"
            SELECT id, date, subject, chapter, book_material, hours_studied, test_given, marks_scored, remarks, created_at
            FROM study_records WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_study_record_row).transpose()
    }

    async fn list_study_records(&self) -> Result<Vec<StudyRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, date, subject, chapter, book_material, hours_studied, test_given, marks_scored, remarks, created_at
            FROM study_records
            ORDER BY date DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_study_record_row).collect()
    }

    async fn delete_study_record(&self, id: StudyRecordId) -> Result<bool, StorageError> {
        let Some(id) = id_to_i64(id.value()) else {
            return Ok(false);
        };
        let res = sqlx::query("DELETE FROM study_records WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(res.rows_affected() > 0)
    }
}

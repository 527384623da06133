use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use study_core::model::{
    ExamRecord, ExamRecordDraft, ExamRecordId, StudyPlan, StudyPlanDraft, StudyPlanId,
    StudyRecord, StudyRecordDraft, StudyRecordId,
};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

/// Ids above `i64::MAX` cannot name a stored row.
pub(crate) fn id_to_i64(v: u64) -> Option<i64> {
    i64::try_from(v).ok()
}

pub(crate) fn study_record_id_from_i64(v: i64) -> Result<StudyRecordId, StorageError> {
    Ok(StudyRecordId::new(i64_to_u64("study_record_id", v)?))
}

pub(crate) fn study_plan_id_from_i64(v: i64) -> Result<StudyPlanId, StorageError> {
    Ok(StudyPlanId::new(i64_to_u64("study_plan_id", v)?))
}

pub(crate) fn exam_record_id_from_i64(v: i64) -> Result<ExamRecordId, StorageError> {
    Ok(ExamRecordId::new(i64_to_u64("exam_record_id", v)?))
}

pub(crate) fn map_study_record_row(row: &SqliteRow) -> Result<StudyRecord, StorageError> {
    let marks_scored = row
        .try_get::<Option<i64>, _>("marks_scored")
        .map_err(ser)?
        .map(|m| i64_to_u32("marks_scored", m))
        .transpose()?;

    let draft = StudyRecordDraft {
        date: row.try_get("date").map_err(ser)?,
        subject: row.try_get("subject").map_err(ser)?,
        chapter: row.try_get("chapter").map_err(ser)?,
        book_material: row.try_get("book_material").map_err(ser)?,
        hours_studied: row.try_get("hours_studied").map_err(ser)?,
        test_given: row.try_get::<i64, _>("test_given").map_err(ser)? != 0,
        marks_scored,
        remarks: row.try_get("remarks").map_err(ser)?,
    };

    StudyRecord::from_persisted(
        study_record_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        draft,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_study_plan_row(row: &SqliteRow) -> Result<StudyPlan, StorageError> {
    let draft = StudyPlanDraft {
        plan_date: row.try_get("plan_date").map_err(ser)?,
        subject: row.try_get("subject").map_err(ser)?,
        chapter: row.try_get("chapter").map_err(ser)?,
        planned_hours: row.try_get("planned_hours").map_err(ser)?,
        remarks: row.try_get("remarks").map_err(ser)?,
    };

    StudyPlan::from_persisted(
        study_plan_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        draft,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_exam_record_row(row: &SqliteRow) -> Result<ExamRecord, StorageError> {
    let draft = ExamRecordDraft {
        exam_date: row.try_get("exam_date").map_err(ser)?,
        subject: row.try_get("subject").map_err(ser)?,
        exam_type: row.try_get("exam_type").map_err(ser)?,
        maximum_marks: i64_to_u32(
            "maximum_marks",
            row.try_get::<i64, _>("maximum_marks").map_err(ser)?,
        )?,
        marks_scored: i64_to_u32(
            "marks_scored",
            row.try_get::<i64, _>("marks_scored").map_err(ser)?,
        )?,
        improvements: row.try_get("improvements").map_err(ser)?,
    };

    ExamRecord::from_persisted(
        exam_record_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        draft,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_are_rejected() {
        assert!(matches!(
            study_record_id_from_i64(-1),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(exam_record_id_from_i64(7).unwrap(), ExamRecordId::new(7));
    }

    #[test]
    fn oversized_ids_do_not_wrap() {
        assert_eq!(id_to_i64(u64::MAX), None);
        assert_eq!(id_to_i64(1 << 63), None);
        assert_eq!(id_to_i64(42), Some(42));
    }
}

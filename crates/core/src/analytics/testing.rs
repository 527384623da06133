//! Snapshot builders shared by the analytics tests.

use chrono::NaiveDate;

use crate::model::{
    ExamRecord, ExamRecordDraft, ExamRecordId, StudyPlan, StudyPlanDraft, StudyPlanId,
    StudyRecord, StudyRecordDraft, StudyRecordId,
};
use crate::time::fixed_now;

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn record(
    id: u64,
    date: NaiveDate,
    subject: &str,
    chapter: &str,
    material: &str,
    hours: f64,
) -> StudyRecord {
    tested_record(id, date, subject, chapter, material, hours, false, None)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn tested_record(
    id: u64,
    date: NaiveDate,
    subject: &str,
    chapter: &str,
    material: &str,
    hours: f64,
    test_given: bool,
    marks_scored: Option<u32>,
) -> StudyRecord {
    let draft = StudyRecordDraft {
        date,
        subject: subject.into(),
        chapter: chapter.into(),
        book_material: material.into(),
        hours_studied: hours,
        test_given,
        marks_scored,
        remarks: None,
    };
    StudyRecord::from_persisted(StudyRecordId::new(id), draft, fixed_now()).unwrap()
}

pub(crate) fn plan(id: u64, date: NaiveDate, subject: &str, chapter: &str, hours: f64) -> StudyPlan {
    let draft = StudyPlanDraft {
        plan_date: date,
        subject: subject.into(),
        chapter: chapter.into(),
        planned_hours: hours,
        remarks: None,
    };
    StudyPlan::from_persisted(StudyPlanId::new(id), draft, fixed_now()).unwrap()
}

pub(crate) fn exam(
    id: u64,
    date: NaiveDate,
    subject: &str,
    exam_type: &str,
    maximum_marks: u32,
    marks_scored: u32,
) -> ExamRecord {
    let draft = ExamRecordDraft {
        exam_date: date,
        subject: subject.into(),
        exam_type: exam_type.into(),
        maximum_marks,
        marks_scored,
        improvements: None,
    };
    ExamRecord::from_persisted(ExamRecordId::new(id), draft, fixed_now()).unwrap()
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::StudyRecord;

/// Hours and session count for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRollup {
    pub subject: String,
    pub total_hours: f64,
    pub sessions: usize,
    pub mean_hours: f64,
}

/// Hours and session count for one book or material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRollup {
    pub material: String,
    pub total_hours: f64,
    pub sessions: usize,
}

/// Per-chapter progress within a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterRollup {
    pub chapter: String,
    pub total_hours: f64,
    pub sessions: usize,
    pub tests_taken: usize,
    /// Mean quick-test marks over sessions that recorded marks.
    pub average_marks: Option<f64>,
}

/// Total hours logged on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Default)]
struct Tally {
    hours: f64,
    sessions: usize,
}

fn tally_by<'a, F>(records: &'a [StudyRecord], key: F) -> BTreeMap<&'a str, Tally>
where
    F: Fn(&'a StudyRecord) -> &'a str,
{
    let mut groups: BTreeMap<&str, Tally> = BTreeMap::new();
    for record in records {
        let tally = groups.entry(key(record)).or_default();
        tally.hours += record.hours_studied();
        tally.sessions += 1;
    }
    groups
}

/// Largest total first; equal totals keep name order.
fn by_hours_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: f64, count: usize) -> f64 {
    total / count as f64
}

#[allow(clippy::cast_precision_loss)]
fn mean_marks(sum: u64, count: usize) -> f64 {
    sum as f64 / count as f64
}

/// Sum of `hours_studied` over the snapshot.
#[must_use]
pub fn total_hours(records: &[StudyRecord]) -> f64 {
    records.iter().map(StudyRecord::hours_studied).sum()
}

/// Hours, sessions and mean hours per session for every subject present.
#[must_use]
pub fn subject_rollup(records: &[StudyRecord]) -> Vec<SubjectRollup> {
    let mut rows: Vec<_> = tally_by(records, StudyRecord::subject)
        .into_iter()
        .map(|(subject, tally)| SubjectRollup {
            subject: subject.to_owned(),
            total_hours: tally.hours,
            sessions: tally.sessions,
            mean_hours: mean(tally.hours, tally.sessions),
        })
        .collect();
    rows.sort_by(|a, b| by_hours_desc(a.total_hours, b.total_hours));
    rows
}

/// Hours and sessions per book or material.
#[must_use]
pub fn material_rollup(records: &[StudyRecord]) -> Vec<MaterialRollup> {
    let mut rows: Vec<_> = tally_by(records, StudyRecord::book_material)
        .into_iter()
        .map(|(material, tally)| MaterialRollup {
            material: material.to_owned(),
            total_hours: tally.hours,
            sessions: tally.sessions,
        })
        .collect();
    rows.sort_by(|a, b| by_hours_desc(a.total_hours, b.total_hours));
    rows
}

/// Per-chapter hours, tests taken and average marks for one subject.
///
/// Records of other subjects are ignored. Sessions without marks do not count
/// towards the average.
#[must_use]
pub fn chapter_rollup(records: &[StudyRecord], subject: &str) -> Vec<ChapterRollup> {
    #[derive(Default)]
    struct Acc {
        hours: f64,
        sessions: usize,
        tests: usize,
        marks_sum: u64,
        marks_count: usize,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for record in records.iter().filter(|r| r.subject() == subject) {
        let acc = groups.entry(record.chapter()).or_default();
        acc.hours += record.hours_studied();
        acc.sessions += 1;
        if record.test_given() {
            acc.tests += 1;
        }
        if let Some(marks) = record.marks_scored() {
            acc.marks_sum += u64::from(marks);
            acc.marks_count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(chapter, acc)| ChapterRollup {
            chapter: chapter.to_owned(),
            total_hours: acc.hours,
            sessions: acc.sessions,
            tests_taken: acc.tests,
            average_marks: (acc.marks_count > 0).then(|| mean_marks(acc.marks_sum, acc.marks_count)),
        })
        .collect()
}

/// Total hours per study day, newest first.
#[must_use]
pub fn daily_hours(records: &[StudyRecord]) -> Vec<DailyHours> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *days.entry(record.date()).or_default() += record.hours_studied();
    }
    days.into_iter()
        .rev()
        .map(|(date, hours)| DailyHours { date, hours })
        .collect()
}

//! Aggregation over record snapshots.
//!
//! Everything here is a pure function of the slices passed in: nothing reads
//! storage and nothing mutates its input.

mod exams;
mod filter;
pub mod percent;
mod planned;
mod rollup;

#[cfg(test)]
pub(crate) mod testing;

pub use exams::{ExamSubjectRollup, ExamSummary, exam_percentage, exam_subject_rollup, exam_summary};
pub use filter::{DateRange, ExamFilter, StudyEntry, StudyFilter, filter_by};
pub use percent::{format_percentage, percentage_of};
pub use planned::{PlannedVsActualRow, planned_vs_actual};
pub use rollup::{
    ChapterRollup, DailyHours, MaterialRollup, SubjectRollup, chapter_rollup, daily_hours,
    material_rollup, subject_rollup, total_hours,
};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::percent::percentage_of;
use crate::model::ExamRecord;

/// Score of one exam as a percentage of its maximum, one decimal,
/// rounded half-to-even.
#[must_use]
pub fn exam_percentage(exam: &ExamRecord) -> f64 {
    exam.percentage()
}

/// Totals across a set of exams.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamSummary {
    pub exams: usize,
    pub total_scored: u64,
    pub total_max: u64,
    /// `total_scored / total_max` as a percentage; `0.0` for an empty set.
    pub overall_percentage: f64,
}

/// Exam totals for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamSubjectRollup {
    pub subject: String,
    pub exams: usize,
    pub total_scored: u64,
    pub total_max: u64,
    pub overall_percentage: f64,
    pub best_percentage: f64,
}

#[must_use]
pub fn exam_summary(exams: &[ExamRecord]) -> ExamSummary {
    let total_scored: u64 = exams.iter().map(|e| u64::from(e.marks_scored())).sum();
    let total_max: u64 = exams.iter().map(|e| u64::from(e.maximum_marks())).sum();
    ExamSummary {
        exams: exams.len(),
        total_scored,
        total_max,
        overall_percentage: percentage_of(total_scored, total_max),
    }
}

/// Exam totals grouped by subject, in subject name order.
#[must_use]
pub fn exam_subject_rollup(exams: &[ExamRecord]) -> Vec<ExamSubjectRollup> {
    let mut groups: BTreeMap<&str, Vec<&ExamRecord>> = BTreeMap::new();
    for exam in exams {
        groups.entry(exam.subject()).or_default().push(exam);
    }

    groups
        .into_iter()
        .map(|(subject, group)| {
            let total_scored: u64 = group.iter().map(|e| u64::from(e.marks_scored())).sum();
            let total_max: u64 = group.iter().map(|e| u64::from(e.maximum_marks())).sum();
            let best_percentage = group
                .iter()
                .map(|e| e.percentage())
                .fold(0.0_f64, f64::max);
            ExamSubjectRollup {
                subject: subject.to_owned(),
                exams: group.len(),
                total_scored,
                total_max,
                overall_percentage: percentage_of(total_scored, total_max),
                best_percentage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::testing::{day, exam};

    #[test]
    fn percentage_of_single_exam() {
        let e = exam(1, day(2024, 2, 1), "Math", "Mock Test", 80, 45);
        assert_eq!(exam_percentage(&e), 56.2);
    }

    #[test]
    fn empty_summary_reports_zero() {
        let summary = exam_summary(&[]);
        assert_eq!(summary.exams, 0);
        assert_eq!(summary.total_max, 0);
        assert_eq!(summary.overall_percentage, 0.0);
    }

    #[test]
    fn summary_weights_by_maximum_marks() {
        let exams = [
            exam(1, day(2024, 2, 1), "Math", "Mock Test", 80, 45),
            exam(2, day(2024, 2, 2), "Science", "School Exam", 20, 15),
        ];
        let summary = exam_summary(&exams);
        assert_eq!(summary.total_scored, 60);
        assert_eq!(summary.total_max, 100);
        assert_eq!(summary.overall_percentage, 60.0);
    }

    #[test]
    fn subject_rollup_tracks_best_result() {
        let exams = [
            exam(1, day(2024, 2, 1), "Math", "Mock Test", 80, 45),
            exam(2, day(2024, 2, 5), "Math", "School Exam", 100, 90),
            exam(3, day(2024, 2, 6), "English", "Mock Test", 50, 25),
        ];
        let rollup = exam_subject_rollup(&exams);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].subject, "English");
        assert_eq!(rollup[0].overall_percentage, 50.0);

        let math = &rollup[1];
        assert_eq!(math.exams, 2);
        assert_eq!(math.total_scored, 135);
        assert_eq!(math.total_max, 180);
        assert_eq!(math.overall_percentage, 75.0);
        assert_eq!(math.best_percentage, 90.0);
    }
}

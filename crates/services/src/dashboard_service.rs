use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use storage::repository::{ExamRecordRepository, StudyPlanRepository, StudyRecordRepository};
use study_core::analytics::{
    ChapterRollup, DailyHours, ExamFilter, ExamSubjectRollup, ExamSummary, MaterialRollup,
    PlannedVsActualRow, StudyFilter, SubjectRollup, chapter_rollup, daily_hours,
    exam_subject_rollup, exam_summary, material_rollup, planned_vs_actual, subject_rollup,
    total_hours,
};
use study_core::model::{Catalog, ExamRecord, StudyPlan, StudyRecord};

use crate::error::DashboardError;

//
// ─── VIEWS ─────────────────────────────────────────────────────────────────────
//

/// Values offered by the study dashboard filters.
///
/// Built from everything stored, not from the filtered view, so narrowing one
/// criterion never hides the choices for another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudyFilterOptions {
    pub subjects: Vec<String>,
    pub chapters: Vec<String>,
    pub materials: Vec<String>,
}

impl StudyFilterOptions {
    fn collect(records: &[StudyRecord], plans: &[StudyPlan]) -> Self {
        let subjects: BTreeSet<&str> = records
            .iter()
            .map(StudyRecord::subject)
            .chain(plans.iter().map(StudyPlan::subject))
            .collect();
        let chapters: BTreeSet<&str> = records
            .iter()
            .map(StudyRecord::chapter)
            .chain(plans.iter().map(StudyPlan::chapter))
            .collect();
        let materials: BTreeSet<&str> = records.iter().map(StudyRecord::book_material).collect();

        Self {
            subjects: owned(subjects),
            chapters: owned(chapters),
            materials: owned(materials),
        }
    }
}

fn owned(values: BTreeSet<&str>) -> Vec<String> {
    values.into_iter().map(str::to_owned).collect()
}

/// Study time overview for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyDashboard {
    pub filter: StudyFilter,
    pub records: Vec<StudyRecord>,
    pub plans: Vec<StudyPlan>,
    pub planned_vs_actual: Vec<PlannedVsActualRow>,
    pub subjects: Vec<SubjectRollup>,
    pub materials: Vec<MaterialRollup>,
    pub daily_hours: Vec<DailyHours>,
    pub total_hours: f64,
    pub sessions: usize,
    pub options: StudyFilterOptions,
}

/// Chapter-level progress for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterBreakdown {
    pub subject: String,
    pub chapters: Vec<ChapterRollup>,
    /// Catalog chapters with no matching session.
    pub not_started: Vec<String>,
    pub total_hours: f64,
}

/// One exam with its derived percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamRow {
    #[serde(flatten)]
    pub exam: ExamRecord,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamFilterOptions {
    pub subjects: Vec<String>,
    pub exam_types: Vec<String>,
}

/// Exam results overview for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamDashboard {
    pub filter: ExamFilter,
    pub rows: Vec<ExamRow>,
    pub summary: ExamSummary,
    pub subjects: Vec<ExamSubjectRollup>,
    pub options: ExamFilterOptions,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Loads stored records and turns them into dashboard views.
///
/// Every call reads a fresh snapshot; nothing is cached between calls.
#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<Catalog>,
    records: Arc<dyn StudyRecordRepository>,
    plans: Arc<dyn StudyPlanRepository>,
    exams: Arc<dyn ExamRecordRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        records: Arc<dyn StudyRecordRepository>,
        plans: Arc<dyn StudyPlanRepository>,
        exams: Arc<dyn ExamRecordRepository>,
    ) -> Self {
        Self {
            catalog,
            records,
            plans,
            exams,
        }
    }

    /// Build the study overview for `filter`.
    ///
    /// The material criterion only narrows study records; plans carry no
    /// material and are filtered on subject, chapter and date.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if loading a snapshot fails.
    pub async fn study_dashboard(
        &self,
        filter: StudyFilter,
    ) -> Result<StudyDashboard, DashboardError> {
        let all_records = self.records.list_study_records().await?;
        let all_plans = self.plans.list_study_plans().await?;
        let options = StudyFilterOptions::collect(&all_records, &all_plans);

        let records = filter.apply(&all_records);
        let plans = filter.apply(&all_plans);
        tracing::debug!(
            records = records.len(),
            of_records = all_records.len(),
            plans = plans.len(),
            of_plans = all_plans.len(),
            "building study dashboard"
        );

        Ok(StudyDashboard {
            planned_vs_actual: planned_vs_actual(&plans, &records),
            subjects: subject_rollup(&records),
            materials: material_rollup(&records),
            daily_hours: daily_hours(&records),
            total_hours: total_hours(&records),
            sessions: records.len(),
            options,
            filter,
            records,
            plans,
        })
    }

    /// Per-chapter hours, tests and average marks for `subject`.
    ///
    /// Subjects missing from the catalog are accepted while sessions for them
    /// are still stored.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownSubject` when neither the catalog nor
    /// the stored sessions know the subject.
    /// Returns `DashboardError::Storage` if loading a snapshot fails.
    pub async fn chapter_breakdown(
        &self,
        subject: &str,
        filter: &StudyFilter,
    ) -> Result<ChapterBreakdown, DashboardError> {
        let all_records = self.records.list_study_records().await?;
        let known = self.catalog.has_subject(subject)
            || all_records.iter().any(|r| r.subject() == subject);
        if !known {
            return Err(DashboardError::UnknownSubject(subject.to_owned()));
        }

        let records = filter.apply(&all_records);
        let chapters = chapter_rollup(&records, subject);
        let started: BTreeSet<&str> = chapters.iter().map(|c| c.chapter.as_str()).collect();
        let not_started = self
            .catalog
            .chapters(subject)
            .iter()
            .filter(|c| !started.contains(c.as_str()))
            .cloned()
            .collect();
        let total_hours = chapters.iter().map(|c| c.total_hours).sum();
        tracing::debug!(subject, chapters = chapters.len(), "building chapter breakdown");

        Ok(ChapterBreakdown {
            subject: subject.to_owned(),
            chapters,
            not_started,
            total_hours,
        })
    }

    /// Build the exam overview for `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if loading a snapshot fails.
    pub async fn exam_dashboard(&self, filter: ExamFilter) -> Result<ExamDashboard, DashboardError> {
        let all_exams = self.exams.list_exam_records().await?;
        let options = ExamFilterOptions {
            subjects: owned(all_exams.iter().map(ExamRecord::subject).collect()),
            exam_types: owned(all_exams.iter().map(ExamRecord::exam_type).collect()),
        };

        let exams = filter.apply(&all_exams);
        tracing::debug!(exams = exams.len(), of = all_exams.len(), "building exam dashboard");

        let summary = exam_summary(&exams);
        let subjects = exam_subject_rollup(&exams);
        let rows = exams
            .into_iter()
            .map(|exam| ExamRow {
                percentage: exam.percentage(),
                exam,
            })
            .collect();

        Ok(ExamDashboard {
            filter,
            rows,
            summary,
            subjects,
            options,
        })
    }
}

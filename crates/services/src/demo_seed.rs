use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use storage::repository::Storage;
use study_core::model::{Catalog, ExamRecordDraft, StudyPlanDraft, StudyRecordDraft};

use crate::Clock;
use crate::error::SeedError;

const SESSION_HOURS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
const EXAM_MAXIMUMS: [u32; 4] = [20, 40, 80, 100];
const EXAM_EVERY_DAYS: u64 = 7;

/// Rows written by one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub study_records: usize,
    pub study_plans: usize,
    pub exam_records: usize,
}

/// Fills the store with plausible sessions, plans and exams.
#[derive(Clone)]
pub struct DemoSeeder {
    clock: Clock,
    catalog: Arc<Catalog>,
    storage: Storage,
}

impl DemoSeeder {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, storage: Storage) -> Self {
        Self {
            clock,
            catalog,
            storage,
        }
    }

    /// Seed `days` days of history ending today.
    ///
    /// Pass `seed` to make the generated data reproducible.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Domain` if a generated entry fails validation.
    /// Returns `SeedError::Storage` if a write fails; rows written before the
    /// failure stay stored.
    pub async fn seed(&self, days: u32, seed: Option<u64>) -> Result<SeedSummary, SeedError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let today = self.clock.today();
        let mut summary = SeedSummary::default();

        for offset in (0..u64::from(days)).rev() {
            let Some(date) = today.checked_sub_days(Days::new(offset)) else {
                continue;
            };
            self.seed_day(&mut rng, date, &mut summary).await?;
            if offset % EXAM_EVERY_DAYS == 0 {
                self.seed_exam(&mut rng, date).await?;
                summary.exam_records += 1;
            }
        }

        tracing::info!(
            study_records = summary.study_records,
            study_plans = summary.study_plans,
            exam_records = summary.exam_records,
            "seeded demo data"
        );
        Ok(summary)
    }

    async fn seed_day(
        &self,
        rng: &mut StdRng,
        date: NaiveDate,
        summary: &mut SeedSummary,
    ) -> Result<(), SeedError> {
        let sessions = rng.random_range(1..=3);
        for _ in 0..sessions {
            let (subject, chapter) = self.pick_chapter(rng);
            let hours = SESSION_HOURS[rng.random_range(0..SESSION_HOURS.len())];

            if rng.random_bool(0.8) {
                let planned = SESSION_HOURS[rng.random_range(0..SESSION_HOURS.len())];
                let fields = StudyPlanDraft {
                    plan_date: date,
                    subject: subject.clone(),
                    chapter: chapter.clone(),
                    planned_hours: planned,
                    remarks: None,
                }
                .validate(&self.catalog)
                .map_err(study_core::Error::from)?;
                self.storage
                    .study_plans
                    .insert_study_plan(&fields, self.clock.now())
                    .await?;
                summary.study_plans += 1;
            }

            let test_given = rng.random_bool(0.3);
            let fields = StudyRecordDraft {
                date,
                subject,
                chapter,
                book_material: pick(rng, self.catalog.materials()),
                hours_studied: hours,
                test_given,
                marks_scored: test_given.then(|| rng.random_range(40..=100)),
                remarks: None,
            }
            .validate(&self.catalog)
            .map_err(study_core::Error::from)?;
            self.storage
                .study_records
                .insert_study_record(&fields, self.clock.now())
                .await?;
            summary.study_records += 1;
        }
        Ok(())
    }

    async fn seed_exam(&self, rng: &mut StdRng, date: NaiveDate) -> Result<(), SeedError> {
        let maximum_marks = EXAM_MAXIMUMS[rng.random_range(0..EXAM_MAXIMUMS.len())];
        let fields = ExamRecordDraft {
            exam_date: date,
            subject: self.pick_chapter(rng).0,
            exam_type: pick(rng, self.catalog.exam_types()),
            maximum_marks,
            marks_scored: rng.random_range(maximum_marks / 3..=maximum_marks),
            improvements: None,
        }
        .validate(&self.catalog)
        .map_err(study_core::Error::from)?;
        self.storage
            .exam_records
            .insert_exam_record(&fields, self.clock.now())
            .await?;
        Ok(())
    }

    fn pick_chapter(&self, rng: &mut StdRng) -> (String, String) {
        let entries = self.catalog.subject_entries();
        let entry = &entries[rng.random_range(0..entries.len())];
        (entry.name.clone(), pick(rng, &entry.chapters))
    }
}

fn pick(rng: &mut StdRng, values: &[String]) -> String {
    values.choose(rng).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use study_core::time::{fixed_clock, fixed_now};

    fn seeder(storage: &Storage) -> DemoSeeder {
        DemoSeeder::new(
            fixed_clock(),
            Arc::new(Catalog::builtin().unwrap()),
            storage.clone(),
        )
    }

    #[tokio::test]
    async fn seeded_rows_match_summary_and_stay_in_range() {
        let storage = Storage::in_memory();
        let summary = seeder(&storage).seed(14, Some(7)).await.unwrap();

        let records = storage.study_records.list_study_records().await.unwrap();
        let plans = storage.study_plans.list_study_plans().await.unwrap();
        let exams = storage.exam_records.list_exam_records().await.unwrap();
        assert_eq!(records.len(), summary.study_records);
        assert_eq!(plans.len(), summary.study_plans);
        assert_eq!(exams.len(), summary.exam_records);
        assert_eq!(summary.exam_records, 2);
        assert!(summary.study_records >= 14);

        let today = fixed_now().date_naive();
        let first = today.checked_sub_days(Days::new(13)).unwrap();
        assert!(records.iter().all(|r| (first..=today).contains(&r.date())));
        assert_eq!(records[0].date(), today);
    }

    #[tokio::test]
    async fn same_seed_gives_same_data() {
        let a = Storage::in_memory();
        let b = Storage::in_memory();
        seeder(&a).seed(5, Some(42)).await.unwrap();
        seeder(&b).seed(5, Some(42)).await.unwrap();

        let left = a.study_records.list_study_records().await.unwrap();
        let right = b.study_records.list_study_records().await.unwrap();
        assert_eq!(left, right);
    }

    #[tokio::test]
    async fn zero_days_writes_nothing() {
        let storage = Storage::in_memory();
        let summary = seeder(&storage).seed(0, Some(1)).await.unwrap();
        assert_eq!(summary, SeedSummary::default());
    }
}

use std::sync::Arc;

use storage::repository::Storage;
use study_core::model::Catalog;

use crate::Clock;
use crate::dashboard_service::DashboardService;
use crate::demo_seed::DemoSeeder;
use crate::error::AppServicesError;
use crate::exam_service::ExamService;
use crate::study_log_service::StudyLogService;
use crate::study_plan_service::StudyPlanService;

/// Assembles app-facing services over one storage backend and catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    study_log: Arc<StudyLogService>,
    study_plans: Arc<StudyPlanService>,
    exams: Arc<ExamService>,
    dashboard: Arc<DashboardService>,
    demo_seeder: Arc<DemoSeeder>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Catalog,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, clock, catalog))
    }

    /// Build services over an existing storage aggregate.
    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let study_log = Arc::new(StudyLogService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.study_records),
        ));
        let study_plans = Arc::new(StudyPlanService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.study_plans),
        ));
        let exams = Arc::new(ExamService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.exam_records),
        ));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.study_records),
            Arc::clone(&storage.study_plans),
            Arc::clone(&storage.exam_records),
        ));
        let demo_seeder = Arc::new(DemoSeeder::new(clock, Arc::clone(&catalog), storage));

        Self {
            catalog,
            study_log,
            study_plans,
            exams,
            dashboard,
            demo_seeder,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn study_log(&self) -> Arc<StudyLogService> {
        Arc::clone(&self.study_log)
    }

    #[must_use]
    pub fn study_plans(&self) -> Arc<StudyPlanService> {
        Arc::clone(&self.study_plans)
    }

    #[must_use]
    pub fn exams(&self) -> Arc<ExamService> {
        Arc::clone(&self.exams)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn demo_seeder(&self) -> Arc<DemoSeeder> {
        Arc::clone(&self.demo_seeder)
    }
}

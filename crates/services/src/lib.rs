#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard_service;
pub mod demo_seed;
pub mod error;
pub mod exam_service;
pub mod outcome;
pub mod study_log_service;
pub mod study_plan_service;

pub use study_core::Clock;

pub use app_services::AppServices;
pub use dashboard_service::{
    ChapterBreakdown, DashboardService, ExamDashboard, ExamFilterOptions, ExamRow,
    StudyDashboard, StudyFilterOptions,
};
pub use demo_seed::{DemoSeeder, SeedSummary};
pub use error::{
    AppServicesError, DashboardError, ExamServiceError, SeedError, StudyLogServiceError,
    StudyPlanServiceError,
};
pub use exam_service::ExamService;
pub use outcome::DeleteOutcome;
pub use study_log_service::StudyLogService;
pub use study_plan_service::StudyPlanService;

use std::sync::Arc;

use storage::repository::StudyPlanRepository;
use study_core::model::{Catalog, StudyPlan, StudyPlanDraft, StudyPlanId};

use crate::Clock;
use crate::error::StudyPlanServiceError;
use crate::outcome::DeleteOutcome;

/// Records planned study hours so they can be compared with logged sessions.
#[derive(Clone)]
pub struct StudyPlanService {
    clock: Clock,
    catalog: Arc<Catalog>,
    plans: Arc<dyn StudyPlanRepository>,
}

impl StudyPlanService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, plans: Arc<dyn StudyPlanRepository>) -> Self {
        Self {
            clock,
            catalog,
            plans,
        }
    }

    /// # Errors
    ///
    /// Returns `StudyPlanServiceError::Validation` for invalid input.
    /// Returns `StudyPlanServiceError::Storage` if persistence fails.
    pub async fn add_plan(&self, draft: StudyPlanDraft) -> Result<StudyPlan, StudyPlanServiceError> {
        let fields = draft.validate(&self.catalog)?;
        let now = self.clock.now();
        let id = self.plans.insert_study_plan(&fields, now).await?;
        tracing::info!(%id, date = %fields.plan_date(), "added study plan");
        Ok(StudyPlan::new(id, fields, now))
    }

    /// # Errors
    ///
    /// Returns `StudyPlanServiceError::Storage` if repository access fails.
    pub async fn list_plans(&self) -> Result<Vec<StudyPlan>, StudyPlanServiceError> {
        Ok(self.plans.list_study_plans().await?)
    }

    /// # Errors
    ///
    /// Returns `StudyPlanServiceError::Storage` if the delete fails.
    pub async fn delete_plan(&self, id: StudyPlanId) -> Result<DeleteOutcome, StudyPlanServiceError> {
        let outcome = DeleteOutcome::from_removed(self.plans.delete_study_plan(id).await?);
        if outcome.is_removed() {
            tracing::info!(%id, "deleted study plan");
        } else {
            tracing::warn!(%id, "study plan not found, nothing deleted");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use storage::repository::InMemoryRepository;
    use study_core::model::{HoursError, StudyPlanError};
    use study_core::time::fixed_clock;

    fn service() -> StudyPlanService {
        StudyPlanService::new(
            fixed_clock(),
            Arc::new(Catalog::builtin().unwrap()),
            Arc::new(InMemoryRepository::new()),
        )
    }

    fn draft(hours: f64) -> StudyPlanDraft {
        StudyPlanDraft {
            plan_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            subject: "Science".into(),
            chapter: "Electricity".into(),
            planned_hours: hours,
            remarks: Some("numericals".into()),
        }
    }

    #[tokio::test]
    async fn add_then_delete_plan() {
        let service = service();
        let plan = service.add_plan(draft(2.0)).await.unwrap();
        assert_eq!(service.list_plans().await.unwrap().len(), 1);

        assert!(service.delete_plan(plan.id()).await.unwrap().is_removed());
        assert!(service.list_plans().await.unwrap().is_empty());
        assert_eq!(
            service.delete_plan(plan.id()).await.unwrap(),
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn deleting_a_never_stored_plan_keeps_the_rest() {
        let service = service();
        let kept = service.add_plan(draft(1.5)).await.unwrap();

        assert_eq!(
            service.delete_plan(StudyPlanId::new(42)).await.unwrap(),
            DeleteOutcome::NotFound
        );

        let remaining = service.list_plans().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), kept.id());
    }

    #[tokio::test]
    async fn zero_hours_are_rejected() {
        let err = service().add_plan(draft(0.0)).await.unwrap_err();
        assert!(matches!(
            err,
            StudyPlanServiceError::Validation(StudyPlanError::Hours(HoursError::NotPositive))
        ));
    }
}

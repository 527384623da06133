mod catalog;
mod exam_record;
mod fields;
mod ids;
mod study_plan;
mod study_record;

pub use catalog::{Catalog, CatalogError, SubjectEntry};
pub use exam_record::{
    ExamRecord, ExamRecordDraft, ExamRecordError, ExamRecordFields, MAX_EXAM_MARKS,
};
pub use fields::{HoursError, MAX_HOURS_PER_ENTRY, MAX_REMARKS_CHARS, SelectionError};
pub use ids::{ExamRecordId, ParseIdError, StudyPlanId, StudyRecordId};
pub use study_plan::{StudyPlan, StudyPlanDraft, StudyPlanError, StudyPlanFields};
pub use study_record::{
    MAX_QUICK_TEST_MARKS, StudyRecord, StudyRecordDraft, StudyRecordError, StudyRecordFields,
};

use chrono::NaiveDate;
use study_core::model::{
    Catalog, ExamRecord, ExamRecordDraft, ExamRecordFields, ExamRecordId, StudyPlan,
    StudyPlanDraft, StudyPlanFields, StudyPlanId, StudyRecord, StudyRecordDraft,
    StudyRecordFields, StudyRecordId,
};
use study_core::time::fixed_now;
use storage::repository::{
    ExamRecordRepository, Storage, StudyPlanRepository, StudyRecordRepository,
};
use storage::sqlite::SqliteRepository;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn study_fields(date: NaiveDate, chapter: &str, marks: Option<u32>) -> StudyRecordFields {
    StudyRecordDraft {
        date,
        subject: "Math".into(),
        chapter: chapter.into(),
        book_material: "CBSE Textbook".into(),
        hours_studied: 1.5,
        test_given: marks.is_some(),
        marks_scored: marks,
        remarks: Some("  revise theorems ".into()),
    }
    .validate(&Catalog::builtin().unwrap())
    .unwrap()
}

#[tokio::test]
async fn study_records_round_trip_and_sort() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_study_rt?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let older = repo
        .insert_study_record(&study_fields(day(1), "Circles", Some(72)), fixed_now())
        .await
        .unwrap();
    let newer_a = repo
        .insert_study_record(&study_fields(day(4), "Statistics", None), fixed_now())
        .await
        .unwrap();
    let newer_b = repo
        .insert_study_record(&study_fields(day(4), "Probability", None), fixed_now())
        .await
        .unwrap();

    let listed = repo.list_study_records().await.unwrap();
    let ids: Vec<_> = listed.iter().map(StudyRecord::id).collect();
    assert_eq!(ids, [newer_b, newer_a, older]);

    let fetched = repo.get_study_record(older).await.unwrap().expect("row");
    assert_eq!(fetched.date(), day(1));
    assert_eq!(fetched.chapter(), "Circles");
    assert!(fetched.test_given());
    assert_eq!(fetched.marks_scored(), Some(72));
    assert_eq!(fetched.remarks(), Some("revise theorems"));
    assert_eq!(fetched.hours_studied(), 1.5);
    assert_eq!(fetched.created_at(), fixed_now());
}

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_delete?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = repo
        .insert_study_record(&study_fields(day(2), "Circles", None), fixed_now())
        .await
        .unwrap();
    assert!(repo.delete_study_record(id).await.unwrap());
    assert!(!repo.delete_study_record(id).await.unwrap());
    assert!(repo.list_study_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_wires_plans_and_exams() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    let catalog = Catalog::builtin().unwrap();

    let plan = StudyPlanDraft {
        plan_date: day(10),
        subject: "Science".into(),
        chapter: "Electricity".into(),
        planned_hours: 2.0,
        remarks: None,
    }
    .validate(&catalog)
    .unwrap();
    let plan_id = storage
        .study_plans
        .insert_study_plan(&plan, fixed_now())
        .await
        .unwrap();

    let exam = ExamRecordDraft {
        exam_date: day(11),
        subject: "Science".into(),
        exam_type: "Mock Test".into(),
        maximum_marks: 80,
        marks_scored: 45,
        improvements: None,
    }
    .validate(&catalog)
    .unwrap();
    let exam_id = storage
        .exam_records
        .insert_exam_record(&exam, fixed_now())
        .await
        .unwrap();

    let plans = storage.study_plans.list_study_plans().await.unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id(), plan_id);
    assert_eq!(plans[0].planned_hours(), 2.0);

    let stored = storage
        .exam_records
        .get_exam_record(exam_id)
        .await
        .unwrap()
        .expect("exam");
    assert_eq!(stored.fields(), &exam);
    assert_eq!(stored.percentage(), 56.2);
}

fn plan_fields(date: NaiveDate, chapter: &str) -> StudyPlanFields {
    StudyPlanDraft {
        plan_date: date,
        subject: "Math".into(),
        chapter: chapter.into(),
        planned_hours: 1.0,
        remarks: None,
    }
    .validate(&Catalog::builtin().unwrap())
    .unwrap()
}

fn exam_fields(date: NaiveDate, marks_scored: u32) -> ExamRecordFields {
    ExamRecordDraft {
        exam_date: date,
        subject: "English".into(),
        exam_type: "School Exam".into(),
        maximum_marks: 100,
        marks_scored,
        improvements: None,
    }
    .validate(&Catalog::builtin().unwrap())
    .unwrap()
}

#[tokio::test]
async fn absent_ids_are_a_no_op_for_every_table() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_absent?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let record = repo
        .insert_study_record(&study_fields(day(3), "Circles", None), fixed_now())
        .await
        .unwrap();
    let plan = repo
        .insert_study_plan(&plan_fields(day(3), "Circles"), fixed_now())
        .await
        .unwrap();
    let exam = repo
        .insert_exam_record(&exam_fields(day(3), 60), fixed_now())
        .await
        .unwrap();

    let oversized = 1_u64 << 63;
    for raw in [999, oversized, u64::MAX] {
        assert!(!repo.delete_study_record(StudyRecordId::new(raw)).await.unwrap());
        assert!(!repo.delete_study_plan(StudyPlanId::new(raw)).await.unwrap());
        assert!(!repo.delete_exam_record(ExamRecordId::new(raw)).await.unwrap());
        assert!(repo.get_study_record(StudyRecordId::new(raw)).await.unwrap().is_none());
        assert!(repo.get_study_plan(StudyPlanId::new(raw)).await.unwrap().is_none());
        assert!(repo.get_exam_record(ExamRecordId::new(raw)).await.unwrap().is_none());
    }

    assert_eq!(repo.list_study_records().await.unwrap()[0].id(), record);
    assert_eq!(repo.list_study_plans().await.unwrap()[0].id(), plan);
    assert_eq!(repo.list_exam_records().await.unwrap()[0].id(), exam);

    assert!(repo.delete_study_plan(plan).await.unwrap());
    assert!(!repo.delete_study_plan(plan).await.unwrap());
    assert!(repo.delete_exam_record(exam).await.unwrap());
    assert!(!repo.delete_exam_record(exam).await.unwrap());
    assert!(repo.list_study_plans().await.unwrap().is_empty());
    assert!(repo.list_exam_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn plans_and_exams_list_newest_date_then_highest_id() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_order?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let plan_old = repo
        .insert_study_plan(&plan_fields(day(1), "Circles"), fixed_now())
        .await
        .unwrap();
    let plan_new_a = repo
        .insert_study_plan(&plan_fields(day(5), "Statistics"), fixed_now())
        .await
        .unwrap();
    let plan_mid = repo
        .insert_study_plan(&plan_fields(day(3), "Probability"), fixed_now())
        .await
        .unwrap();
    let plan_new_b = repo
        .insert_study_plan(&plan_fields(day(5), "Polynomials"), fixed_now())
        .await
        .unwrap();
    let plan_ids: Vec<_> = repo
        .list_study_plans()
        .await
        .unwrap()
        .iter()
        .map(StudyPlan::id)
        .collect();
    assert_eq!(plan_ids, [plan_new_b, plan_new_a, plan_mid, plan_old]);

    let exam_mid = repo
        .insert_exam_record(&exam_fields(day(8), 70), fixed_now())
        .await
        .unwrap();
    let exam_old = repo
        .insert_exam_record(&exam_fields(day(2), 55), fixed_now())
        .await
        .unwrap();
    let exam_new_a = repo
        .insert_exam_record(&exam_fields(day(9), 80), fixed_now())
        .await
        .unwrap();
    let exam_new_b = repo
        .insert_exam_record(&exam_fields(day(9), 90), fixed_now())
        .await
        .unwrap();
    let exam_ids: Vec<_> = repo
        .list_exam_records()
        .await
        .unwrap()
        .iter()
        .map(ExamRecord::id)
        .collect();
    assert_eq!(exam_ids, [exam_new_b, exam_new_a, exam_mid, exam_old]);
}

#[tokio::test]
async fn schema_rejects_rows_that_would_not_load_back() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_checks?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let too_many_hours = sqlx::query(
        "INSERT INTO study_records (date, subject, chapter, book_material, hours_studied, test_given, created_at)
         VALUES ('2024-03-01', 'Math', 'Circles', 'CBSE Textbook', 30.0, 0, '2024-03-01T00:00:00Z')",
    )
    .execute(repo.pool())
    .await;
    assert!(too_many_hours.is_err());

    let marks_without_test = sqlx::query(
        "INSERT INTO study_records (date, subject, chapter, book_material, hours_studied, test_given, marks_scored, created_at)
         VALUES ('2024-03-01', 'Math', 'Circles', 'CBSE Textbook', 1.0, 0, 50, '2024-03-01T00:00:00Z')",
    )
    .execute(repo.pool())
    .await;
    assert!(marks_without_test.is_err());

    let plan_too_many_hours = sqlx::query(
        "INSERT INTO study_plans (plan_date, subject, chapter, planned_hours, created_at)
         VALUES ('2024-03-01', 'Math', 'Circles', 25.0, '2024-03-01T00:00:00Z')",
    )
    .execute(repo.pool())
    .await;
    assert!(plan_too_many_hours.is_err());

    let huge_exam = sqlx::query(
        "INSERT INTO exam_records (exam_date, subject, exam_type, maximum_marks, marks_scored, created_at)
         VALUES ('2024-03-01', 'English', 'School Exam', 1001, 10, '2024-03-01T00:00:00Z')",
    )
    .execute(repo.pool())
    .await;
    assert!(huge_exam.is_err());

    assert!(repo.list_study_records().await.unwrap().is_empty());
    assert!(repo.list_study_plans().await.unwrap().is_empty());
    assert!(repo.list_exam_records().await.unwrap().is_empty());
}

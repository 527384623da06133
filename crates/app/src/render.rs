//! Plain-text tables for stdout.

use services::{ChapterBreakdown, ExamDashboard, StudyDashboard};
use study_core::analytics::format_percentage;
use study_core::model::{Catalog, ExamRecord, StudyPlan, StudyRecord};

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(title.len()));
}

pub fn catalog(catalog: &Catalog) {
    for entry in catalog.subject_entries() {
        section(&entry.name);
        for chapter in &entry.chapters {
            println!("  {chapter}");
        }
    }
    section("Materials");
    for material in catalog.materials() {
        println!("  {material}");
    }
    section("Exam types");
    for exam_type in catalog.exam_types() {
        println!("  {exam_type}");
    }
}

pub fn study_records(records: &[StudyRecord]) {
    if records.is_empty() {
        println!("no study sessions");
        return;
    }
    println!(
        "{:>5}  {:<10}  {:<10}  {:<38}  {:<18}  {:>5}  {:>5}  {}",
        "id", "date", "subject", "chapter", "material", "hours", "marks", "remarks"
    );
    for r in records {
        let marks = match (r.test_given(), r.marks_scored()) {
            (_, Some(m)) => m.to_string(),
            (true, None) => "test".to_owned(),
            (false, None) => "-".to_owned(),
        };
        println!(
            "{:>5}  {:<10}  {:<10}  {:<38}  {:<18}  {:>5.1}  {:>5}  {}",
            r.id().value(),
            r.date(),
            r.subject(),
            r.chapter(),
            r.book_material(),
            r.hours_studied(),
            marks,
            or_dash(r.remarks())
        );
    }
}

pub fn study_plans(plans: &[StudyPlan]) {
    if plans.is_empty() {
        println!("no study plans");
        return;
    }
    println!(
        "{:>5}  {:<10}  {:<10}  {:<38}  {:>7}  {}",
        "id", "date", "subject", "chapter", "planned", "remarks"
    );
    for p in plans {
        println!(
            "{:>5}  {:<10}  {:<10}  {:<38}  {:>7.1}  {}",
            p.id().value(),
            p.plan_date(),
            p.subject(),
            p.chapter(),
            p.planned_hours(),
            or_dash(p.remarks())
        );
    }
}

pub fn exam_records(exams: &[ExamRecord]) {
    if exams.is_empty() {
        println!("no exam results");
        return;
    }
    println!(
        "{:>5}  {:<10}  {:<10}  {:<17}  {:>9}  {:>7}  {}",
        "id", "date", "subject", "exam type", "marks", "score", "improvements"
    );
    for e in exams {
        println!(
            "{:>5}  {:<10}  {:<10}  {:<17}  {:>9}  {:>7}  {}",
            e.id().value(),
            e.exam_date(),
            e.subject(),
            e.exam_type(),
            format!("{}/{}", e.marks_scored(), e.maximum_marks()),
            format_percentage(e.percentage()),
            or_dash(e.improvements())
        );
    }
}

pub fn study_dashboard(view: &StudyDashboard) {
    println!(
        "{} sessions, {:.1} hours in total",
        view.sessions, view.total_hours
    );

    section("By subject");
    for s in &view.subjects {
        println!(
            "  {:<12} {:>6.1} h  {:>3} sessions  {:>4.2} h avg",
            s.subject, s.total_hours, s.sessions, s.mean_hours
        );
    }

    section("By material");
    for m in &view.materials {
        println!(
            "  {:<20} {:>6.1} h  {:>3} sessions",
            m.material, m.total_hours, m.sessions
        );
    }

    section("Daily hours");
    for d in &view.daily_hours {
        println!("  {}  {:>5.1}", d.date, d.hours);
    }

    section("Planned vs actual");
    for row in &view.planned_vs_actual {
        println!(
            "  {}  {:<10} {:<38} {:>5.1} planned  {:>5.1} actual  {:>+5.1}",
            row.date,
            row.subject,
            row.chapter,
            row.planned_hours,
            row.actual_hours,
            row.difference
        );
    }
}

pub fn chapter_breakdown(view: &ChapterBreakdown) {
    println!("{}: {:.1} hours", view.subject, view.total_hours);
    println!(
        "  {:<38} {:>6} {:>8} {:>5} {:>9}",
        "chapter", "hours", "sessions", "tests", "avg marks"
    );
    for c in &view.chapters {
        let average = c
            .average_marks
            .map_or_else(|| "-".to_owned(), |m| format!("{m:.1}"));
        println!(
            "  {:<38} {:>6.1} {:>8} {:>5} {:>9}",
            c.chapter, c.total_hours, c.sessions, c.tests_taken, average
        );
    }
    if !view.not_started.is_empty() {
        section("Not started");
        for chapter in &view.not_started {
            println!("  {chapter}");
        }
    }
}

pub fn exam_dashboard(view: &ExamDashboard) {
    let summary = &view.summary;
    println!(
        "{} exams, {}/{} marks, {} overall",
        summary.exams,
        summary.total_scored,
        summary.total_max,
        format_percentage(summary.overall_percentage)
    );

    section("By subject");
    for s in &view.subjects {
        println!(
            "  {:<12} {:>3} exams  {:>7} overall  {:>7} best",
            s.subject,
            s.exams,
            format_percentage(s.overall_percentage),
            format_percentage(s.best_percentage)
        );
    }

    section("Results");
    for row in &view.rows {
        let e = &row.exam;
        println!(
            "  {}  {:<10} {:<17} {:>4}/{:<4} {:>7}",
            e.exam_date(),
            e.subject(),
            e.exam_type(),
            e.marks_scored(),
            e.maximum_marks(),
            format_percentage(row.percentage)
        );
    }
}

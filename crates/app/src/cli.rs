//! Command-line surface of `study-tracker`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use services::{AppServices, Clock, DeleteOutcome};
use study_core::analytics::{ExamFilter, StudyFilter};
use study_core::model::{
    ExamRecordDraft, ExamRecordId, StudyPlanDraft, StudyPlanId, StudyRecordDraft, StudyRecordId,
};

use crate::config::{self, DEFAULT_DB_URL};
use crate::render;

#[derive(Parser)]
#[command(name = "study-tracker")]
#[command(about = "Log study sessions, plans and exam results, and review progress", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database URL or file path
    #[arg(long, global = true, env = "STUDY_DB_URL", default_value = DEFAULT_DB_URL)]
    db: String,

    /// Catalog TOML file (defaults to the bundled CBSE Class 10 catalog)
    #[arg(long, global = true, env = "STUDY_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List subjects, chapters, materials and exam types
    Catalog,
    /// Log and manage study sessions
    Study {
        #[command(subcommand)]
        command: StudyCommand,
    },
    /// Manage study plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Record and manage exam results
    Exam {
        #[command(subcommand)]
        command: ExamCommand,
    },
    /// Summaries over stored data
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Insert demo data for the last few days
    Seed {
        /// Number of days to fill, ending today
        #[arg(long, default_value_t = 30)]
        days: u32,
        /// Fixed random seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum StudyCommand {
    /// Log a study session
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        chapter: String,
        /// Book or material used
        #[arg(long)]
        material: String,
        #[arg(long)]
        hours: f64,
        /// Session date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// A quick test was taken
        #[arg(long)]
        test: bool,
        /// Quick test marks out of 100
        #[arg(long)]
        marks: Option<u32>,
        #[arg(long)]
        remarks: Option<String>,
    },
    /// List study sessions, newest first
    List {
        #[command(flatten)]
        filter: StudyFilterArgs,
    },
    /// Delete a study session by id
    Delete { id: StudyRecordId },
}

#[derive(Subcommand)]
enum PlanCommand {
    /// Plan hours for a chapter
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        chapter: String,
        #[arg(long)]
        hours: f64,
        /// Plan date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        remarks: Option<String>,
    },
    /// List study plans, newest first
    List {
        #[command(flatten)]
        filter: StudyFilterArgs,
    },
    /// Delete a study plan by id
    Delete { id: StudyPlanId },
}

#[derive(Subcommand)]
enum ExamCommand {
    /// Record an exam result
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        exam_type: String,
        #[arg(long)]
        max_marks: u32,
        #[arg(long)]
        marks: u32,
        /// Exam date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Areas to improve
        #[arg(long)]
        improvements: Option<String>,
    },
    /// List exam results, newest first
    List {
        #[command(flatten)]
        filter: ExamFilterArgs,
    },
    /// Delete an exam result by id
    Delete { id: ExamRecordId },
}

#[derive(Subcommand)]
enum DashboardCommand {
    /// Hours, rollups and planned vs actual
    Study {
        #[command(flatten)]
        filter: StudyFilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Per-chapter progress for one subject
    Chapters {
        #[arg(long)]
        subject: String,
        #[arg(long = "material")]
        materials: Vec<String>,
        #[command(flatten)]
        dates: DateArgs,
        #[arg(long)]
        json: bool,
    },
    /// Exam scores and percentages
    Exams {
        #[command(flatten)]
        filter: ExamFilterArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct DateArgs {
    /// First day to include, YYYY-MM-DD
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day to include, YYYY-MM-DD
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Args)]
struct StudyFilterArgs {
    /// Keep only these subjects (repeatable)
    #[arg(long = "subject")]
    subjects: Vec<String>,
    /// Keep only these chapters (repeatable)
    #[arg(long = "chapter")]
    chapters: Vec<String>,
    /// Keep only sessions with these materials (repeatable)
    #[arg(long = "material")]
    materials: Vec<String>,
    #[command(flatten)]
    dates: DateArgs,
}

impl StudyFilterArgs {
    fn into_filter(self) -> StudyFilter {
        StudyFilter::new()
            .with_subjects(self.subjects)
            .with_chapters(self.chapters)
            .with_materials(self.materials)
            .between(self.dates.from, self.dates.to)
    }
}

#[derive(Args)]
struct ExamFilterArgs {
    /// Keep only these subjects (repeatable)
    #[arg(long = "subject")]
    subjects: Vec<String>,
    /// Keep only these exam types (repeatable)
    #[arg(long = "exam-type")]
    exam_types: Vec<String>,
    #[command(flatten)]
    dates: DateArgs,
}

impl ExamFilterArgs {
    fn into_filter(self) -> ExamFilter {
        ExamFilter::new()
            .with_subjects(self.subjects)
            .with_exam_types(self.exam_types)
            .between(self.dates.from, self.dates.to)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_delete(kind: &str, id: impl std::fmt::Display, outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Removed => println!("deleted {kind} {id}"),
        DeleteOutcome::NotFound => println!("no {kind} with id {id}; nothing deleted"),
    }
}

/// Resolve configuration, open storage and run one command.
pub async fn run(cli: Cli) -> Result<()> {
    let catalog = config::load_catalog(cli.catalog.as_deref())?;
    if matches!(cli.command, Command::Catalog) {
        render::catalog(&catalog);
        return Ok(());
    }

    let db_url = config::normalize_sqlite_url(&cli.db);
    config::prepare_sqlite_file(&db_url)?;
    let clock = Clock::default_clock();
    let app = AppServices::new_sqlite(&db_url, clock, catalog).await?;

    match cli.command {
        Command::Catalog => render::catalog(app.catalog()),
        Command::Study { command } => study(&app, clock, command).await?,
        Command::Plan { command } => plan(&app, clock, command).await?,
        Command::Exam { command } => exam(&app, clock, command).await?,
        Command::Dashboard { command } => dashboard(&app, command).await?,
        Command::Seed { days, seed } => {
            let summary = app.demo_seeder().seed(days, seed).await?;
            println!(
                "seeded {} study sessions, {} plans and {} exams",
                summary.study_records, summary.study_plans, summary.exam_records
            );
        }
    }
    Ok(())
}

async fn study(app: &AppServices, clock: Clock, command: StudyCommand) -> Result<()> {
    let service = app.study_log();
    match command {
        StudyCommand::Add {
            subject,
            chapter,
            material,
            hours,
            date,
            test,
            marks,
            remarks,
        } => {
            let draft = StudyRecordDraft {
                date: date.unwrap_or_else(|| clock.today()),
                subject,
                chapter,
                book_material: material,
                hours_studied: hours,
                test_given: test,
                marks_scored: marks,
                remarks,
            };
            let record = service.log_session(draft).await?;
            println!("logged study session {}", record.id());
        }
        StudyCommand::List { filter } => {
            let records = filter.into_filter().apply(&service.list_sessions().await?);
            render::study_records(&records);
        }
        StudyCommand::Delete { id } => {
            report_delete("study session", id, service.delete_session(id).await?);
        }
    }
    Ok(())
}

async fn plan(app: &AppServices, clock: Clock, command: PlanCommand) -> Result<()> {
    let service = app.study_plans();
    match command {
        PlanCommand::Add {
            subject,
            chapter,
            hours,
            date,
            remarks,
        } => {
            let draft = StudyPlanDraft {
                plan_date: date.unwrap_or_else(|| clock.today()),
                subject,
                chapter,
                planned_hours: hours,
                remarks,
            };
            let plan = service.add_plan(draft).await?;
            println!("added study plan {}", plan.id());
        }
        PlanCommand::List { filter } => {
            let plans = filter.into_filter().apply(&service.list_plans().await?);
            render::study_plans(&plans);
        }
        PlanCommand::Delete { id } => {
            report_delete("study plan", id, service.delete_plan(id).await?);
        }
    }
    Ok(())
}

async fn exam(app: &AppServices, clock: Clock, command: ExamCommand) -> Result<()> {
    let service = app.exams();
    match command {
        ExamCommand::Add {
            subject,
            exam_type,
            max_marks,
            marks,
            date,
            improvements,
        } => {
            let draft = ExamRecordDraft {
                exam_date: date.unwrap_or_else(|| clock.today()),
                subject,
                exam_type,
                maximum_marks: max_marks,
                marks_scored: marks,
                improvements,
            };
            let exam = service.record_exam(draft).await?;
            println!(
                "recorded exam {} ({})",
                exam.id(),
                study_core::analytics::format_percentage(exam.percentage())
            );
        }
        ExamCommand::List { filter } => {
            let exams = filter.into_filter().apply(&service.list_exams().await?);
            render::exam_records(&exams);
        }
        ExamCommand::Delete { id } => {
            report_delete("exam record", id, service.delete_exam(id).await?);
        }
    }
    Ok(())
}

async fn dashboard(app: &AppServices, command: DashboardCommand) -> Result<()> {
    let service = app.dashboard();
    match command {
        DashboardCommand::Study { filter, json } => {
            let view = service.study_dashboard(filter.into_filter()).await?;
            if json {
                print_json(&view)?;
            } else {
                render::study_dashboard(&view);
            }
        }
        DashboardCommand::Chapters {
            subject,
            materials,
            dates,
            json,
        } => {
            let filter = StudyFilter::new()
                .with_materials(materials)
                .between(dates.from, dates.to);
            let view = service.chapter_breakdown(&subject, &filter).await?;
            if json {
                print_json(&view)?;
            } else {
                render::chapter_breakdown(&view);
            }
        }
        DashboardCommand::Exams { filter, json } => {
            let view = service.exam_dashboard(filter.into_filter()).await?;
            if json {
                print_json(&view)?;
            } else {
                render::exam_dashboard(&view);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_study_add_with_defaults() {
        let cli = Cli::try_parse_from([
            "study-tracker",
            "--db",
            "sqlite::memory:",
            "study",
            "add",
            "--subject",
            "Math",
            "--chapter",
            "Circles",
            "--material",
            "KS QB",
            "--hours",
            "1.5",
        ])
        .unwrap();
        assert_eq!(cli.db, "sqlite::memory:");
        let Command::Study {
            command: StudyCommand::Add { hours, date, test, marks, .. },
        } = cli.command
        else {
            panic!("expected study add");
        };
        assert_eq!(hours, 1.5);
        assert_eq!(date, None);
        assert!(!test);
        assert_eq!(marks, None);
    }

    #[test]
    fn repeatable_filters_build_a_study_filter() {
        let cli = Cli::try_parse_from([
            "study-tracker",
            "dashboard",
            "study",
            "--subject",
            "Math",
            "--subject",
            "Science",
            "--from",
            "2024-01-01",
            "--json",
        ])
        .unwrap();
        let Command::Dashboard {
            command: DashboardCommand::Study { filter, json },
        } = cli.command
        else {
            panic!("expected dashboard study");
        };
        assert!(json);
        let filter = filter.into_filter();
        assert_eq!(filter.subjects.len(), 2);
        assert_eq!(filter.dates.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.dates.end, None);
    }

    #[test]
    fn delete_takes_a_numeric_id() {
        let cli = Cli::try_parse_from(["study-tracker", "exam", "delete", "42"]).unwrap();
        let Command::Exam {
            command: ExamCommand::Delete { id },
        } = cli.command
        else {
            panic!("expected exam delete");
        };
        assert_eq!(id, ExamRecordId::new(42));
        assert!(Cli::try_parse_from(["study-tracker", "exam", "delete", "abc"]).is_err());
    }
}

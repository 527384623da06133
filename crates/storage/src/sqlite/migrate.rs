use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies pending schema versions.
///
/// Version 1 creates the three record tables and their date indexes. The
/// column checks mirror the validation limits so every stored row loads back.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if is_applied(pool, 1).await? {
        tracing::debug!("schema up to date");
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS study_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                subject TEXT NOT NULL,
                chapter TEXT NOT NULL,
                book_material TEXT NOT NULL,
                hours_studied REAL NOT NULL CHECK (hours_studied > 0 AND hours_studied <= 24),
                test_given INTEGER NOT NULL CHECK (test_given IN (0, 1)),
                marks_scored INTEGER CHECK (marks_scored IS NULL OR (test_given = 1 AND marks_scored BETWEEN 0 AND 100)),
                remarks TEXT CHECK (remarks IS NULL OR length(remarks) <= 250),
                created_at TEXT NOT NULL
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS study_plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                plan_date TEXT NOT NULL,
                subject TEXT NOT NULL,
                chapter TEXT NOT NULL,
                planned_hours REAL NOT NULL CHECK (planned_hours > 0 AND planned_hours <= 24),
                remarks TEXT CHECK (remarks IS NULL OR length(remarks) <= 250),
                created_at TEXT NOT NULL
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS exam_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                exam_date TEXT NOT NULL,
                subject TEXT NOT NULL,
                exam_type TEXT NOT NULL,
                maximum_marks INTEGER NOT NULL CHECK (maximum_marks BETWEEN 1 AND 1000),
                marks_scored INTEGER NOT NULL CHECK (marks_scored BETWEEN 0 AND maximum_marks),
                improvements TEXT,
                created_at TEXT NOT NULL
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_study_records_date ON study_records (date, id);")
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_study_plans_date ON study_plans (plan_date, id);",
    )
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_exam_records_date ON exam_records (exam_date, id);",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r"
            INSERT INTO schema_migrations (version, applied_at)
            VALUES (?1, ?2)
            ON CONFLICT(version) DO NOTHING
        ",
    )
    .bind(1_i64)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(version = 1, "applied schema migration");

    Ok(())
}

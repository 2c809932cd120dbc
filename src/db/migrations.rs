//! Database initialization and table creation.

use crate::domain::SchemaVariant;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Open the SQLite database at `db_path`, configure pragmas, and create the
/// `Earthquake` table for `variant` if it does not exist yet.
pub async fn init_db(
    db_path: &str,
    variant: SchemaVariant,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_migrations(&pool, variant).await?;

    info!(schema = %variant, "Database initialized successfully at {}", db_path);
    Ok(pool)
}

fn schema_sql(variant: SchemaVariant) -> &'static str {
    match variant {
        SchemaVariant::Minimal => include_str!("schema_minimal.sql"),
        SchemaVariant::Extended => include_str!("schema_extended.sql"),
    }
}

/// Create the table and indexes. Safe to run repeatedly.
async fn run_migrations(pool: &SqlitePool, variant: SchemaVariant) -> Result<(), sqlx::Error> {
    info!(schema = %variant, "Running database migrations...");

    for statement in schema_sql(variant).split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    info!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}

use std::path::Path;

use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
#[cfg(test)]
use sea_orm::ConnectOptions;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Minimal schema bootstrap. Each statement is idempotent.
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_company",
        r#"
        CREATE TABLE IF NOT EXISTS a001_company (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            website TEXT,
            comment TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a002_capability",
        r#"
        CREATE TABLE IF NOT EXISTS a002_capability (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    ),
    (
        "a001_company_capability",
        r#"
        CREATE TABLE IF NOT EXISTS a001_company_capability (
            company_id TEXT NOT NULL,
            capability_id TEXT NOT NULL,
            linked_at TEXT NOT NULL,
            PRIMARY KEY (company_id, capability_id)
        );
        "#,
    ),
    (
        "sys_table_config",
        r#"
        CREATE TABLE IF NOT EXISTS sys_table_config (
            table_name TEXT PRIMARY KEY NOT NULL,
            config_json TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in SCHEMA {
        tracing::debug!("Ensuring table {} exists", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create table {}: {}", table, e))?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Fresh in-memory database with the full schema. A single pooled
/// connection keeps every query on the same SQLite memory database.
#[cfg(test)]
pub async fn open_in_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite");
    bootstrap_schema(&conn).await.expect("schema bootstrap");
    conn
}

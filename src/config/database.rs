//! Database configuration module.
//!
//! Resolves the `SQLite` location, opens the `SeaORM` connection and issues the
//! idempotent DDL for the two persisted tables. The DDL is written out by hand
//! so the on-disk layout stays exactly `expenses(.., paymentMethod)` and
//! `categories(.., name UNIQUE, is_built_in DEFAULT 0)`.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Location used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/expenses.sqlite?mode=rwc";

const CREATE_TABLE_STATEMENTS: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS expenses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        amount REAL NOT NULL,
        date TEXT NOT NULL,
        category TEXT NULL,
        paymentMethod TEXT NULL
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        is_built_in INTEGER NOT NULL DEFAULT 0
    )",
];

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database at `database_url`.
///
/// For file-backed URLs the parent directory is created first so a fresh
/// install can open its store without any manual setup.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_path(database_url)
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        debug!("Ensuring database directory {:?} exists", parent);
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::connect(database_url).await?;
    info!("Connected to {}", database_url);
    Ok(db)
}

/// Creates the `expenses` and `categories` tables when they are absent.
///
/// Safe to run against a store that already has them.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    for statement in CREATE_TABLE_STATEMENTS {
        db.execute_unprepared(statement).await?;
    }
    debug!("Expense and category tables ensured");
    Ok(())
}

fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

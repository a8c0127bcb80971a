//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and stores and for inserting
//! fixtures with sensible defaults.

use crate::{
    core::{Store, expense},
    errors::Result,
    models::NewExpenseInput,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with both tables and no seeded categories.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a store over a fresh in-memory database. The schema is not prepared yet,
/// so the first hook call exercises the initializer.
pub async fn setup_test_store() -> Result<Store> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    Store::builder().database(db).build()
}

/// Inserts an expense with no category and the default payment method.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    title: &str,
    amount: f64,
    date: NaiveDate,
) -> Result<i64> {
    let input = NewExpenseInput::new(title, amount, date).normalized();
    expense::insert_expense(db, &input).await
}

/// Shorthand for a calendar date in tests.
///
/// # Panics
/// Panics on an impossible date.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

//! Store handle - a cloneable connection plus its schema readiness.
//!
//! Hooks receive a [`Store`] instead of reaching for a global connection, so the
//! "is the schema ready" state travels with the connection it describes. Clones
//! share both the connection pool and the readiness state.

use crate::{
    config::{AppConfig, categories::default_built_in_categories, database::create_connection},
    core::{category, expense, schema::SchemaState},
    errors::{Error, Result},
    models::{Category, Expense, NewExpenseInput},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Record store bound to one durable store.
#[derive(Debug, Clone)]
pub struct Store {
    database: DatabaseConnection,
    schema: Arc<SchemaState>,
}

impl Store {
    /// Return a builder for `Store`.
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Connects to `config.database_url`. The schema is prepared lazily by [`Store::ensure_ready`].
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let database = create_connection(&config.database_url).await?;
        Self::builder()
            .database(database)
            .built_in_categories(config.built_in_categories.clone())
            .build()
    }

    /// Underlying `SeaORM` connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Runs the schema initializer once for this store.
    pub async fn ensure_ready(&self) -> Result<()> {
        self.schema.ensure_ready(&self.database).await
    }

    /// Whether the schema initializer has completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.schema.is_ready()
    }

    /// See [`expense::insert_expense`].
    pub async fn insert_expense(&self, input: &NewExpenseInput) -> Result<i64> {
        expense::insert_expense(&self.database, input).await
    }

    /// See [`expense::update_expense`].
    pub async fn update_expense(&self, expense: &Expense) -> Result<u64> {
        expense::update_expense(&self.database, expense).await
    }

    /// See [`expense::delete_expense`].
    pub async fn delete_expense(&self, expense_id: i64) -> Result<u64> {
        expense::delete_expense(&self.database, expense_id).await
    }

    /// See [`expense::get_expense_by_id`].
    pub async fn get_expense_by_id(&self, expense_id: i64) -> Result<Option<Expense>> {
        expense::get_expense_by_id(&self.database, expense_id).await
    }

    /// See [`expense::get_expenses_by_date`].
    pub async fn get_expenses_by_date(&self, date: NaiveDate) -> Result<Vec<Expense>> {
        expense::get_expenses_by_date(&self.database, date).await
    }

    /// See [`expense::get_all_expenses`].
    pub async fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        expense::get_all_expenses(&self.database).await
    }

    /// See [`expense::count_expenses`].
    pub async fn count_expenses(&self) -> Result<u64> {
        expense::count_expenses(&self.database).await
    }

    /// See [`category::get_all_categories`].
    pub async fn get_all_categories(&self) -> Result<Vec<Category>> {
        category::get_all_categories(&self.database).await
    }

    /// See [`category::insert_custom_category`].
    pub async fn insert_custom_category(&self, name: &str) -> Result<bool> {
        category::insert_custom_category(&self.database, name).await
    }
}

/// The builder for `Store`
#[derive(Default)]
pub struct StoreBuilder {
    database: Option<DatabaseConnection>,
    built_in_categories: Option<Vec<String>>,
}

impl StoreBuilder {
    /// Pass the required database
    #[must_use]
    pub fn database(mut self, db: DatabaseConnection) -> Self {
        self.database = Some(db);
        self
    }

    /// Override the built-in category names seeded on first initialization
    #[must_use]
    pub fn built_in_categories(mut self, names: Vec<String>) -> Self {
        self.built_in_categories = Some(names);
        self
    }

    /// Construct `Store`
    ///
    /// # Errors
    /// Returns [`Error::Config`] when no database was supplied.
    pub fn build(self) -> Result<Store> {
        let database = self.database.ok_or_else(|| Error::Config {
            message: "Store requires a database connection".to_string(),
        })?;
        let built_ins = self
            .built_in_categories
            .unwrap_or_else(default_built_in_categories);
        Ok(Store {
            database,
            schema: Arc::new(SchemaState::new(built_ins)),
        })
    }
}

//! Schema initializer.
//!
//! Creates the tables and seeds the built-in categories the first time a
//! [`SchemaState`] is asked to become ready. Readiness lives in the state value
//! itself, owned by the [`crate::core::Store`] handle, rather than in a global.
//! Concurrent callers share a single initialization attempt; a failed attempt
//! leaves the state unready so the next call tries again.

use crate::{
    config::database::create_tables,
    core::category::insert_category_if_absent,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

/// Process-scoped readiness of one store.
#[derive(Debug, Default)]
pub struct SchemaState {
    ready: OnceCell<()>,
    built_in_categories: Vec<String>,
}

impl SchemaState {
    /// Unready state that will seed `built_in_categories` on first use.
    #[must_use]
    pub fn new(built_in_categories: Vec<String>) -> Self {
        Self {
            ready: OnceCell::new(),
            built_in_categories,
        }
    }

    /// Whether a successful initialization has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Names this state seeds as built-in.
    #[must_use]
    pub fn built_in_categories(&self) -> &[String] {
        &self.built_in_categories
    }

    /// Creates the tables and seeds built-ins once; later calls return immediately.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if table creation or seeding fails.
    pub async fn ensure_ready<C>(&self, db: &C) -> Result<()>
    where
        C: ConnectionTrait,
    {
        if self.is_ready() {
            return Ok(());
        }
        self.ready
            .get_or_try_init(|| initialize(db, &self.built_in_categories))
            .await
            .map(|_| ())
    }
}

/// Ensures the tables exist and every built-in name is present.
#[instrument(skip(db, built_in_categories))]
pub async fn initialize<C>(db: &C, built_in_categories: &[String]) -> Result<()>
where
    C: ConnectionTrait,
{
    create_tables(db).await.map_err(|e| storage_unavailable(&e))?;

    let mut seeded = 0_usize;
    for name in built_in_categories {
        if insert_category_if_absent(db, name, true)
            .await
            .map_err(|e| storage_unavailable(&e))?
        {
            seeded += 1;
        }
    }
    info!(
        "Schema ready ({} of {} built-in categories newly seeded)",
        seeded,
        built_in_categories.len()
    );
    Ok(())
}

fn storage_unavailable(cause: &Error) -> Error {
    warn!("Schema initialization failed: {}", cause);
    Error::StorageUnavailable {
        message: cause.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::categories::default_built_in_categories;
    use crate::core::category::get_all_categories;
    use sea_orm::{Database, DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_ensure_ready_creates_and_seeds() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        let state = SchemaState::new(default_built_in_categories());
        assert!(!state.is_ready());

        state.ensure_ready(&db).await?;
        assert!(state.is_ready());

        let categories = get_all_categories(&db).await?;
        assert_eq!(categories.len(), 7);
        assert!(categories.iter().all(|c| c.is_built_in));
        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_initialization_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        let state = SchemaState::new(default_built_in_categories());
        state.ensure_ready(&db).await?;
        let once = get_all_categories(&db).await?;

        for _ in 0..3 {
            state.ensure_ready(&db).await?;
        }
        // A fresh state against the same store simulates a process restart.
        for _ in 0..3 {
            SchemaState::new(default_built_in_categories())
                .ensure_ready(&db)
                .await?;
        }

        assert_eq!(get_all_categories(&db).await?, once);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_built_in_names_collapse() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        let names = vec!["Food".to_string(), "Food".to_string(), "food".to_string()];
        SchemaState::new(names).ensure_ready(&db).await?;

        let names: Vec<String> = get_all_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "food"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_leaves_state_unready_and_retries() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Custom("disk unavailable".to_string())])
            .into_connection();
        let state = SchemaState::new(Vec::new());

        let err = state.ensure_ready(&db).await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
        assert!(!state.is_ready());

        // The retry reaches the store again instead of assuming a schema.
        assert!(state.ensure_ready(&db).await.is_err());
        assert_eq!(db.into_transaction_log().len(), 2);
        Ok(())
    }
}

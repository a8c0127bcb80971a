//! Category query hook.

use super::{LoadingGuard, is_loading};
use crate::{core::Store, errors::Result, models::Category};
use std::sync::{Arc, atomic::AtomicUsize};
use tokio::sync::{RwLock, watch};
use tracing::{debug, error, info, instrument};

/// Full category list with custom-category registration.
#[derive(Debug, Clone)]
pub struct CategoryQuery {
    store: Store,
    categories: Arc<RwLock<Vec<Category>>>,
    loading: Arc<AtomicUsize>,
    refreshed: Arc<watch::Sender<u64>>,
}

impl CategoryQuery {
    /// Creates the hook with an empty, not yet loaded list.
    #[must_use]
    pub fn new(store: Store) -> Self {
        let (refreshed, _) = watch::channel(0);
        Self {
            store,
            categories: Arc::new(RwLock::new(Vec::new())),
            loading: Arc::new(AtomicUsize::new(0)),
            refreshed: Arc::new(refreshed),
        }
    }

    /// Creates the hook and performs the initial load.
    pub async fn mount(store: Store) -> Result<Self> {
        let hook = Self::new(store);
        hook.refresh().await?;
        Ok(hook)
    }

    /// True while a reload is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        is_loading(&self.loading)
    }

    /// Receiver that wakes after every completed reload.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.refreshed.subscribe()
    }

    /// The cached list, built-in categories first.
    pub async fn categories(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    /// Just the names, in display order, for pickers.
    pub async fn names(&self) -> Vec<String> {
        self.categories
            .read()
            .await
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Reloads the category list.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let _loading = LoadingGuard::start(&self.loading);

        let result = self.load().await;
        if let Err(e) = &result {
            error!("Failed to load categories: {}", e);
        }
        result
    }

    async fn load(&self) -> Result<()> {
        self.store.ensure_ready().await?;
        let categories = self.store.get_all_categories().await?;
        {
            let mut cache = self.categories.write().await;
            *cache = categories;
            debug!("Category list refreshed with {} items", cache.len());
        }
        self.refreshed.send_modify(|generation| *generation += 1);
        Ok(())
    }

    /// Registers a custom category and reloads.
    ///
    /// Returns the trimmed name so the caller can select it, or `None` when the
    /// name was blank (treated as the user backing out). Adding an existing
    /// name succeeds without creating a second row.
    #[instrument(skip(self))]
    pub async fn add_custom(&self, name: &str) -> Result<Option<String>> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!("Blank category name, nothing to add");
            return Ok(None);
        }

        self.store.ensure_ready().await?;
        if self.store.insert_custom_category(trimmed).await? {
            info!("Registered custom category '{}'", trimmed);
        }
        self.refresh().await?;
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::categories::DEFAULT_BUILT_IN_CATEGORIES;
    use crate::test_utils::*;
    use crate::errors::Error;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_mount_lists_built_ins_alphabetically() -> Result<()> {
        let hook = CategoryQuery::mount(setup_test_store().await?).await?;

        let mut expected: Vec<&str> = DEFAULT_BUILT_IN_CATEGORIES.to_vec();
        expected.sort_unstable();
        assert_eq!(hook.names().await, expected);
        assert!(!hook.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_custom_returns_trimmed_name_and_refreshes() -> Result<()> {
        let hook = CategoryQuery::mount(setup_test_store().await?).await?;

        let added = hook.add_custom("  Petrol ").await?;
        assert_eq!(added.as_deref(), Some("Petrol"));

        let categories = hook.categories().await;
        let last = categories.last().unwrap();
        assert_eq!(last.name, "Petrol");
        assert!(!last.is_built_in);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_custom_twice_keeps_one() -> Result<()> {
        let hook = CategoryQuery::mount(setup_test_store().await?).await?;

        hook.add_custom("Petrol").await?;
        assert_eq!(hook.add_custom("Petrol").await?.as_deref(), Some("Petrol"));

        let count = hook
            .names()
            .await
            .iter()
            .filter(|name| name.as_str() == "Petrol")
            .count();
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_is_a_no_op() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let store = crate::core::Store::builder().database(db).build()?;
        let hook = CategoryQuery::new(store.clone());

        assert_eq!(hook.add_custom("   ").await?, None);
        assert!(hook.categories().await.is_empty());
        assert!(store.connection().clone().into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_initialization_failure_propagates() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Custom("read-only".to_string())])
            .into_connection();
        let store = crate::core::Store::builder().database(db).build()?;
        let hook = CategoryQuery::new(store);

        let err = hook.add_custom("Petrol").await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
        assert!(hook.categories().await.is_empty());
        assert!(!hook.is_loading());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_insert_propagates_and_keeps_cache() -> Result<()> {
        let food = Category {
            id: 1,
            name: "Food".to_string(),
            is_built_in: true,
        };
        // Two table statements succeed, then the category insert fails.
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .append_exec_errors([DbErr::Custom("disk full".to_string())])
            .append_query_results([vec![food.clone()]])
            .into_connection();
        let store = crate::core::Store::builder()
            .database(db)
            .built_in_categories(Vec::new())
            .build()?;
        let hook = CategoryQuery::mount(store).await?;
        assert_eq!(hook.categories().await, vec![food.clone()]);

        let err = hook.add_custom("Petrol").await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(hook.categories().await, vec![food]);
        assert!(!hook.is_loading());
        Ok(())
    }
}

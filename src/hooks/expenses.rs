//! Expense query hook.
//!
//! Caches the expenses of the currently selected date. The cache records which
//! date it was loaded for; whenever that differs from the selected date the
//! list is reloaded before being handed out, so a previous day's rows are never
//! shown for a new selection.

use super::{LoadingGuard, is_loading};
use crate::{
    context::SelectedDate,
    core::Store,
    errors::Result,
    models::{Expense, NewExpenseInput, UpdateExpenseInput, normalize_expense, validate_expense},
};
use chrono::NaiveDate;
use std::sync::{Arc, atomic::AtomicUsize};
use tokio::{
    sync::{RwLock, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument, warn};

/// The cached list together with the date it was loaded for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopedExpenses {
    /// Date the list was loaded for; `None` before the first load
    pub date: Option<NaiveDate>,
    /// Expenses on `date`, most recently added first
    pub expenses: Vec<Expense>,
}

/// Date-scoped expense list with write-then-refresh mutations.
#[derive(Debug, Clone)]
pub struct ExpenseQuery {
    selected_date: SelectedDate,
    scope: ExpenseScope,
}

/// Everything a reload needs, without the date sender. Background tasks hold
/// this so they stop once every [`SelectedDate`] handle is gone.
#[derive(Debug, Clone)]
struct ExpenseScope {
    store: Store,
    view: Arc<RwLock<ScopedExpenses>>,
    loading: Arc<AtomicUsize>,
    refreshed: Arc<watch::Sender<u64>>,
}

impl ExpenseScope {
    #[instrument(skip(self))]
    async fn refresh(&self, date: NaiveDate) -> Result<()> {
        let _loading = LoadingGuard::start(&self.loading);

        let result = self.load(date).await;
        if let Err(e) = &result {
            error!("Failed to load expenses for {}: {}", date, e);
        }
        result
    }

    async fn load(&self, date: NaiveDate) -> Result<()> {
        self.store.ensure_ready().await?;
        let expenses = self.store.get_expenses_by_date(date).await?;
        {
            let mut view = self.view.write().await;
            *view = ScopedExpenses {
                date: Some(date),
                expenses,
            };
            debug!("Expense view now holds {} item(s) for {}", view.expenses.len(), date);
        }
        self.refreshed.send_modify(|generation| *generation += 1);
        Ok(())
    }
}

impl ExpenseQuery {
    /// Creates the hook with an empty, not yet loaded view.
    #[must_use]
    pub fn new(store: Store, selected_date: SelectedDate) -> Self {
        let (refreshed, _) = watch::channel(0);
        Self {
            selected_date,
            scope: ExpenseScope {
                store,
                view: Arc::new(RwLock::new(ScopedExpenses::default())),
                loading: Arc::new(AtomicUsize::new(0)),
                refreshed: Arc::new(refreshed),
            },
        }
    }

    /// Creates the hook and performs the initial load.
    pub async fn mount(store: Store, selected_date: SelectedDate) -> Result<Self> {
        let hook = Self::new(store, selected_date);
        hook.refresh().await?;
        Ok(hook)
    }

    /// True while a reload is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        is_loading(&self.scope.loading)
    }

    /// The date context this hook is scoped by.
    #[must_use]
    pub const fn selected_date(&self) -> &SelectedDate {
        &self.selected_date
    }

    /// Receiver that wakes after every completed reload.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.scope.refreshed.subscribe()
    }

    /// The cached view as last loaded, without touching the store.
    pub async fn snapshot(&self) -> ScopedExpenses {
        self.scope.view.read().await.clone()
    }

    /// Expenses for the selected date, reloading first if the cache is for another date.
    pub async fn expenses(&self) -> Result<Vec<Expense>> {
        let selected = self.selected_date.get();
        {
            let view = self.scope.view.read().await;
            if view.date == Some(selected) {
                return Ok(view.expenses.clone());
            }
            debug!(
                "Cached expenses are for {:?}, reloading for {}",
                view.date, selected
            );
        }
        self.refresh().await?;
        Ok(self.scope.view.read().await.expenses.clone())
    }

    /// Sum of the cached amounts.
    pub async fn total(&self) -> f64 {
        self.scope
            .view
            .read()
            .await
            .expenses
            .iter()
            .map(|e| e.amount)
            .sum()
    }

    /// Reloads the list for the currently selected date.
    pub async fn refresh(&self) -> Result<()> {
        self.scope.refresh(self.selected_date.get()).await
    }

    /// Validates, inserts, then reloads. Returns the new expense's identifier.
    ///
    /// # Errors
    /// Invalid input is rejected with a validation error before the store is touched.
    #[instrument(skip(self, input))]
    pub async fn add(&self, input: NewExpenseInput) -> Result<i64> {
        input.validate()?;
        let input = input.normalized();

        let store = &self.scope.store;
        store.ensure_ready().await?;
        let id = store.insert_expense(&input).await?;
        info!("Added expense {} on {}", id, input.date);
        self.refresh().await?;
        Ok(id)
    }

    /// Validates, replaces the stored record, then reloads.
    ///
    /// An unknown id is not an error; use [`ExpenseQuery::get_by_id`] first if that matters.
    #[instrument(skip(self, expense), fields(id = expense.id))]
    pub async fn update(&self, expense: UpdateExpenseInput) -> Result<()> {
        validate_expense(&expense)?;
        let expense = normalize_expense(expense);

        let store = &self.scope.store;
        store.ensure_ready().await?;
        let affected = store.update_expense(&expense).await?;
        if affected == 0 {
            warn!("No expense with id {} to update", expense.id);
        }
        self.refresh().await
    }

    /// Deletes, then reloads. Deleting an unknown id succeeds without effect.
    #[instrument(skip(self))]
    pub async fn remove(&self, expense_id: i64) -> Result<()> {
        let store = &self.scope.store;
        store.ensure_ready().await?;
        store.delete_expense(expense_id).await?;
        self.refresh().await
    }

    /// Looks an expense up in the store; the cached list is left alone.
    pub async fn get_by_id(&self, expense_id: i64) -> Result<Option<Expense>> {
        let store = &self.scope.store;
        store.ensure_ready().await?;
        store.get_expense_by_id(expense_id).await
    }

    /// Reloads in the background every time the selected date changes.
    ///
    /// The task ends once every [`SelectedDate`] handle has been dropped, or
    /// earlier if the returned handle is aborted.
    pub fn spawn_rescoper(&self) -> JoinHandle<()> {
        let scope = self.scope.clone();
        let mut dates = self.selected_date.subscribe();
        tokio::spawn(async move {
            while dates.changed().await.is_ok() {
                let date = *dates.borrow_and_update();
                debug!("Selected date moved to {}, re-scoping expenses", date);
                if let Err(e) = scope.refresh(date).await {
                    warn!("Re-scoping to {} failed: {}", date, e);
                }
            }
            debug!("Selected date dropped, re-scoping stopped");
        })
    }
}

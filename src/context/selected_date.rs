//! Selected-date context.
//!
//! Holds the calendar day the UI is looking at. Starts at today's local date,
//! is never persisted, and notifies every subscriber when it changes. Range
//! checks such as "not in the future" belong to the date picker, not here.

use crate::errors::Result;
use crate::models::parse_iso_date;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Shared, observable selected date. Clones observe and mutate the same value.
#[derive(Debug, Clone)]
pub struct SelectedDate {
    sender: Arc<watch::Sender<NaiveDate>>,
}

impl Default for SelectedDate {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectedDate {
    /// Starts at today's local calendar date.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(today())
    }

    /// Starts at `date`.
    #[must_use]
    pub fn starting_at(date: NaiveDate) -> Self {
        let (sender, _) = watch::channel(date);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> NaiveDate {
        *self.sender.borrow()
    }

    /// Selects `date`. Subscribers are notified only when the value actually changes.
    pub fn set(&self, date: NaiveDate) -> bool {
        let changed = self.sender.send_if_modified(|current| {
            if *current == date {
                false
            } else {
                *current = date;
                true
            }
        });
        if changed {
            info!("Selected date changed to {}", date);
        }
        changed
    }

    /// Selects the `YYYY-MM-DD` date in `text`.
    ///
    /// # Errors
    /// Returns a validation error when `text` is not an ISO date.
    pub fn set_iso(&self, text: &str) -> Result<bool> {
        Ok(self.set(parse_iso_date(text)?))
    }

    /// A receiver that wakes on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NaiveDate> {
        self.sender.subscribe()
    }

    /// The value as `YYYY-MM-DD`.
    #[must_use]
    pub fn iso(&self) -> String {
        self.get().format("%Y-%m-%d").to_string()
    }

    /// Whether the selection is today's local date.
    #[must_use]
    pub fn is_today(&self) -> bool {
        self.get() == today()
    }

    /// Screen heading: "Today", or a date such as "1 May 2024".
    #[must_use]
    pub fn heading(&self) -> String {
        if self.is_today() {
            "Today".to_string()
        } else {
            self.get().format("%-d %b %Y").to_string()
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

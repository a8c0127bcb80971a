//! Query hooks - in-memory views the UI renders from.
//!
//! Each hook keeps a read-through cache of one query. Every mutation writes to
//! the store first and then reloads the cache before returning, so once a call
//! resolves the cached view matches what is on disk.

/// Category list and custom category registration
pub mod categories;
/// Date-scoped expense list and expense mutations
pub mod expenses;

pub use categories::CategoryQuery;
pub use expenses::{ExpenseQuery, ScopedExpenses};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts one in-flight reload for its lifetime, on success or failure alike.
///
/// The counter is shared by overlapping reloads, so the hook reports loading
/// until the last of them finishes.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn is_loading(in_flight: &AtomicUsize) -> bool {
    in_flight.load(Ordering::SeqCst) > 0
}

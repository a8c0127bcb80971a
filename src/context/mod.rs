//! Process-wide UI state shared between hooks.

/// Currently viewed calendar day
pub mod selected_date;

pub use selected_date::SelectedDate;

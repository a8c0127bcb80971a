//! Entity module - `SeaORM` entity definitions for the two persisted tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod expense;

pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};

//! Core persistence layer - schema setup, record store operations and the store handle.

/// Category CRUD
pub mod category;
/// Expense CRUD
pub mod expense;
/// Idempotent schema initializer
pub mod schema;
/// Dependency-injected store handle
pub mod store;

pub use schema::SchemaState;
pub use store::{Store, StoreBuilder};

//! Expense entity - one spending record on one calendar day.
//!
//! `category` is a weak reference: it stores a category *name*, not a foreign key.
//! An expense may name a category that does not exist in the `categories` table,
//! and nothing in the store enforces or repairs that association.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Store-assigned identifier, increasing in insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money was spent on
    pub title: String,
    /// Positive amount
    pub amount: f64,
    /// Calendar day, stored as `YYYY-MM-DD` text
    pub date: Date,
    /// Category name, if any (weak reference)
    pub category: Option<String>,
    /// Free text payment label such as "Cash" or "UPI"
    #[sea_orm(column_name = "paymentMethod")]
    pub payment_method: Option<String>,
}

/// Expenses have no enforced relations; see the module docs on `category`.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Label for the category column, falling back to "Uncategorized".
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

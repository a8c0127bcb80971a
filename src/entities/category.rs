//! Category entity - the normalized category taxonomy.
//!
//! Built-in categories are seeded once when the schema is first prepared.
//! Custom categories are appended by the user. Neither kind is ever renamed or
//! removed through this crate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Store-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Case-sensitive, globally unique name
    #[sea_orm(unique)]
    pub name: String,
    /// True for the seeded categories
    pub is_built_in: bool,
}

/// `Category` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

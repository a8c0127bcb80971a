//! Category record store.
//!
//! Names are unique and case-sensitive. Inserting a name that already exists is
//! a silent no-op, which makes both seeding and custom additions idempotent.

use crate::{
    entities::{Category, category},
    errors::Result,
};
use sea_orm::{QueryOrder, Statement, prelude::*};
use tracing::{debug, info, instrument};

/// Every category, built-in ones first, then alphabetically by name.
#[instrument(skip(db))]
pub async fn get_all_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    let categories = Category::find()
        .order_by_desc(category::Column::IsBuiltIn)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;
    debug!("Loaded {} categories", categories.len());
    Ok(categories)
}

/// Registers a user-defined category.
///
/// Returns `false` when a category with exactly this name already existed.
#[instrument(skip(db))]
pub async fn insert_custom_category<C>(db: &C, name: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let inserted = insert_category_if_absent(db, name, false).await?;
    if inserted {
        info!("Added custom category '{}'", name);
    } else {
        debug!("Category '{}' already exists, nothing inserted", name);
    }
    Ok(inserted)
}

/// Inserts `name` unless a category with that exact name is already stored.
pub(crate) async fn insert_category_if_absent<C>(db: &C, name: &str, built_in: bool) -> Result<bool>
where
    C: ConnectionTrait,
{
    let statement = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT OR IGNORE INTO categories (name, is_built_in) VALUES (?, ?)",
        [name.into(), i32::from(built_in).into()],
    );
    let result = db.execute(statement).await?;
    Ok(result.rows_affected() == 1)
}

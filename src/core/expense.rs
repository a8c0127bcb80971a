//! Expense record store - typed CRUD over the `expenses` table.
//!
//! None of these functions validate their input; callers are expected to have
//! run [`crate::models::NewExpenseInput::validate`] or
//! [`crate::models::validate_expense`] first. Missing identifiers are not
//! errors: lookups return `None` and update/delete report zero affected rows.

use crate::{
    entities::{Expense, expense},
    errors::Result,
    models::NewExpenseInput,
};
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Appends a new expense and returns the identifier the store assigned to it.
#[instrument(skip(db, input), fields(date = %input.date))]
pub async fn insert_expense<C>(db: &C, input: &NewExpenseInput) -> Result<i64>
where
    C: ConnectionTrait,
{
    let model = expense::ActiveModel {
        title: Set(input.title.clone()),
        amount: Set(input.amount),
        date: Set(input.date),
        category: Set(input.category.clone()),
        payment_method: Set(input.payment_method.clone()),
        ..Default::default()
    };

    let id = Expense::insert(model).exec(db).await?.last_insert_id;
    info!("Inserted expense {} (amount={:.2})", id, input.amount);
    Ok(id)
}

/// Replaces every mutable field of the expense with `expense.id`.
///
/// Returns the number of rows affected, which is `0` when the id does not exist.
#[instrument(skip(db, expense), fields(id = expense.id))]
pub async fn update_expense<C>(db: &C, expense: &expense::Model) -> Result<u64>
where
    C: ConnectionTrait,
{
    let changes = expense::ActiveModel {
        title: Set(expense.title.clone()),
        amount: Set(expense.amount),
        date: Set(expense.date),
        category: Set(expense.category.clone()),
        payment_method: Set(expense.payment_method.clone()),
        ..Default::default()
    };

    let result = Expense::update_many()
        .set(changes)
        .filter(expense::Column::Id.eq(expense.id))
        .exec(db)
        .await?;
    info!(
        "Updated expense {} ({} row(s) affected)",
        expense.id, result.rows_affected
    );
    Ok(result.rows_affected)
}

/// Removes the expense. Returns the number of rows affected.
#[instrument(skip(db))]
pub async fn delete_expense<C>(db: &C, expense_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    info!(
        "Deleted expense {} ({} row(s) affected)",
        expense_id, result.rows_affected
    );
    Ok(result.rows_affected)
}

/// Finds an expense by its identifier.
#[instrument(skip(db))]
pub async fn get_expense_by_id<C>(db: &C, expense_id: i64) -> Result<Option<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All expenses recorded on exactly `date`, most recently inserted first.
#[instrument(skip(db))]
pub async fn get_expenses_by_date<C>(db: &C, date: NaiveDate) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    let expenses = Expense::find()
        .filter(expense::Column::Date.eq(date))
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;
    debug!("Loaded {} expense(s) for {}", expenses.len(), date);
    Ok(expenses)
}

/// Every expense, newest date first and most recently inserted first within a date.
#[instrument(skip(db))]
pub async fn get_all_expenses<C>(db: &C) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of stored expenses.
pub async fn count_expenses<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Expense::find().count(db).await.map_err(Into::into)
}

//! Boundary types exchanged with the UI layer, plus the client-side validation
//! that must run before anything reaches the store.

use crate::entities::{CategoryModel, ExpenseModel};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An expense as read back from the store.
pub type Expense = ExpenseModel;

/// A category as read back from the store.
pub type Category = CategoryModel;

/// Updates carry the full record, identifier included.
pub type UpdateExpenseInput = Expense;

/// Payment label applied when a new expense does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Payment labels offered by the entry forms. The column itself is free text.
pub const PAYMENT_METHODS: [&str; 4] = ["Cash", "Debit Card", "Credit Card", "UPI"];

/// Fields for a new expense; the identifier is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpenseInput {
    /// What the money was spent on
    pub title: String,
    /// Positive amount
    pub amount: f64,
    /// Calendar day of the expense
    pub date: NaiveDate,
    /// Optional category name
    pub category: Option<String>,
    /// Optional payment label; defaults to [`DEFAULT_PAYMENT_METHOD`]
    pub payment_method: Option<String>,
}

impl NewExpenseInput {
    /// Starts an input with no category and the default payment method.
    pub fn new(title: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            amount,
            date,
            category: None,
            payment_method: None,
        }
    }

    /// Sets the category name.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the payment label.
    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    /// Rejects blank titles and non-positive or non-finite amounts.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, self.amount)
    }

    /// Trims text fields, drops blank optionals and fills in the default payment method.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            amount: self.amount,
            date: self.date,
            category: non_blank(self.category),
            payment_method: non_blank(self.payment_method)
                .or_else(|| Some(DEFAULT_PAYMENT_METHOD.to_string())),
        }
    }
}

/// Same rules as [`NewExpenseInput::validate`] for a full record.
pub fn validate_expense(expense: &UpdateExpenseInput) -> Result<()> {
    validate_fields(&expense.title, expense.amount)
}

/// Trims the title and drops blank optionals. The payment method is not defaulted on edit.
#[must_use]
pub fn normalize_expense(expense: UpdateExpenseInput) -> UpdateExpenseInput {
    Expense {
        title: expense.title.trim().to_string(),
        category: non_blank(expense.category),
        payment_method: non_blank(expense.payment_method),
        ..expense
    }
}

fn validate_fields(title: &str, amount: f64) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("Title is required."));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation("Amount must be a positive number."));
    }
    Ok(())
}

/// Parses amount text as typed into a form field.
///
/// # Errors
/// Returns [`Error::Validation`] for empty, non-numeric, non-finite or non-positive input.
pub fn parse_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Title and amount are required."));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| Error::validation("Amount must be a positive number."))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation("Amount must be a positive number."));
    }
    Ok(amount)
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`Error::Validation`] when the text is not an ISO calendar date.
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| Error::validation(format!("'{text}' is not a YYYY-MM-DD date: {e}")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let input = NewExpenseInput::new("   ", 10.0, may_first());
        let err = input.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let input = NewExpenseInput::new("Coffee", amount, may_first());
            assert!(input.validate().is_err(), "amount {amount} should be rejected");
        }
        assert!(NewExpenseInput::new("Coffee", 0.01, may_first()).validate().is_ok());
    }

    #[test]
    fn test_normalized_defaults_payment_method_and_trims() {
        let input = NewExpenseInput::new("  Coffee ", 150.0, may_first())
            .with_category("  ")
            .normalized();
        assert_eq!(input.title, "Coffee");
        assert_eq!(input.category, None);
        assert_eq!(input.payment_method.as_deref(), Some(DEFAULT_PAYMENT_METHOD));

        let input = NewExpenseInput::new("Taxi", 80.0, may_first())
            .with_category("Travel")
            .with_payment_method("UPI")
            .normalized();
        assert_eq!(input.category.as_deref(), Some("Travel"));
        assert_eq!(input.payment_method.as_deref(), Some("UPI"));
    }

    #[test]
    fn test_normalize_expense_keeps_absent_payment_method() {
        let expense = Expense {
            id: 3,
            title: " Rent ".to_string(),
            amount: 900.0,
            date: may_first(),
            category: Some(String::new()),
            payment_method: None,
        };
        let normalized = normalize_expense(expense);
        assert_eq!(normalized.id, 3);
        assert_eq!(normalized.title, "Rent");
        assert_eq!(normalized.category, None);
        assert_eq!(normalized.payment_method, None);
    }

    #[test]
    fn test_default_payment_method_is_offered() {
        assert!(PAYMENT_METHODS.contains(&DEFAULT_PAYMENT_METHOD));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 150 ").unwrap(), 150.0);
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert!(parse_amount("-5").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("").unwrap_err().is_validation());
        assert!(parse_amount("inf").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-05-01").unwrap(), may_first());
        assert!(parse_iso_date("01/05/2024").is_err());
        assert!(parse_iso_date("2024-02-30").is_err());
    }

    #[test]
    fn test_category_label_falls_back() {
        let mut expense = Expense {
            id: 1,
            title: "Snack".to_string(),
            amount: 20.0,
            date: may_first(),
            category: None,
            payment_method: Some("Cash".to_string()),
        };
        assert_eq!(expense.category_label(), "Uncategorized");
        expense.category = Some("Food".to_string());
        assert_eq!(expense.category_label(), "Food");
    }
}

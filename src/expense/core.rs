//! Defines the expense record and its field validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{Error, month::ActiveMonth};

/// The opaque identifier assigned to an expense when it is created.
///
/// Ids are UUID v7 strings: a millisecond timestamp plus random bits, so a
/// collision between two ids created on the same machine is astronomically
/// unlikely without being formally prevented. The id is immutable and is
/// only ever used as a deletion key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged spending event.
///
/// Records are never edited after creation, only appended to the stored
/// list or removed from it by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The id of the expense, unique across the stored list.
    pub id: ExpenseId,
    /// When the money was spent.
    pub date: Date,
    /// The amount of money spent, always finite and greater than zero.
    pub amount: f64,
    /// A short label grouping the expense, e.g. "Groceries".
    pub category: String,
    /// Free-text detail, empty when the user left the field blank.
    #[serde(default)]
    pub note: String,
}

impl Expense {
    /// Create a new expense with a freshly generated id.
    ///
    /// `note` is trimmed; an all-whitespace note becomes the empty string.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is not finite or not greater than zero,
    /// - or [Error::EmptyCategory] if `category` is the empty string.
    pub fn new(date: Date, amount: f64, category: &str, note: &str) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            id: ExpenseId::generate(),
            date,
            amount,
            category: category.to_owned(),
            note: note.trim().to_owned(),
        })
    }

    /// Whether this expense falls in `month`.
    pub fn matches_month(&self, month: ActiveMonth) -> bool {
        month.contains(self.date)
    }
}

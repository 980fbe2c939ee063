//! Shared view-model structs for the expenses page.

use time::Date;

use crate::{endpoints, expense::Expense, month::ActiveMonth};

/// Renders one expense as a table row.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct ExpenseRow {
    /// When the money was spent.
    pub(crate) date: Date,
    /// The category label of the expense.
    pub(crate) category: String,
    /// The free-text note, possibly empty.
    pub(crate) note: String,
    /// The amount of money spent.
    pub(crate) amount: f64,
    /// The API path to delete this expense.
    pub(crate) delete_url: String,
}

impl ExpenseRow {
    /// Build a row for `expense` on the page filtered to `month`.
    ///
    /// The delete URL carries the month so the client lands back on the
    /// same filtered view after the row is removed.
    pub(crate) fn new_from_expense(expense: Expense, month: ActiveMonth) -> Self {
        let delete_url = format!(
            "{}?month={month}",
            endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id.as_str())
        );

        Self {
            date: expense.date,
            category: expense.category,
            note: expense.note,
            amount: expense.amount,
            delete_url,
        }
    }
}

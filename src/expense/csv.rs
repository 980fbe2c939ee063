//! CSV serialization for the month export.
//!
//! The format is fixed: `Category` and `Note` are always double-quoted with
//! internal quotes doubled, while `Date` and `Amount` are emitted bare, so
//! the writer builds each line directly rather than going through a generic
//! CSV writer with uniform quoting.

use crate::{expense::Expense, month::ActiveMonth};

const HEADER: &str = "Date,Category,Note,Amount";

/// Serialize `expenses` as CSV text.
///
/// Rows are joined with `\n` and the text carries no trailing newline.
pub(crate) fn to_csv(expenses: &[Expense]) -> String {
    let mut lines = Vec::with_capacity(expenses.len() + 1);
    lines.push(HEADER.to_owned());

    for expense in expenses {
        lines.push(format!(
            "{},{},{},{}",
            expense.date,
            quote(&expense.category),
            quote(&expense.note),
            expense.amount,
        ));
    }

    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// The download file name for a month's export, e.g. "expenses-2024-05.csv".
pub(crate) fn export_filename(month: ActiveMonth) -> String {
    format!("expenses-{month}.csv")
}

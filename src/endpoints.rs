//! The application's route URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}',
//! use [format_endpoint].

use crate::month::ActiveMonth;

/// The root route which redirects to the expenses page.
pub const ROOT: &str = "/";
/// The page displaying the expense list for a month.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The route for downloading a month's expenses as CSV.
pub const EXPORT_CSV: &str = "/expenses/export";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create an expense.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to delete a single expense.
pub const DELETE_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to delete the entire stored expense list.
pub const CLEAR_EXPENSES: &str = "/api/expenses/clear";

/// The URL of the expenses page filtered to `month`.
pub fn expenses_month_url(month: ActiveMonth) -> String {
    format!("{EXPENSES_VIEW}?month={month}")
}

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/{expense_id}',
/// '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

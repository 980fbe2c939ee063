//! Defines the endpoint for deleting a single expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    expense::{Expense, ExpenseStore},
    month::ActiveMonth,
};

use super::expenses_page::MonthQuery;

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The repository that owns the persisted expense list.
    pub store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting an expense by id, redirects back to the
/// expenses page for the month in the query string.
///
/// Deletion always operates on the full stored list, not the filtered view
/// the delete button was rendered in.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let redirect_url = match query.month.as_deref().map(str::parse::<ActiveMonth>) {
        Some(Ok(month)) => endpoints::expenses_month_url(month),
        _ => endpoints::EXPENSES_VIEW.to_owned(),
    };

    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    let expenses = store.load();
    let remaining: Vec<Expense> = expenses
        .iter()
        .filter(|expense| expense.id.as_str() != expense_id)
        .cloned()
        .collect();

    if remaining.len() == expenses.len() {
        tracing::debug!("tried to delete missing expense {expense_id}");
        return Error::DeleteMissingExpense.into_alert_response();
    }

    if let Err(error) = store.save(&remaining) {
        tracing::error!("could not save the expense list: {error}");
        return error.into_alert_response();
    }

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

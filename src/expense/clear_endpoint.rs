//! Defines the endpoint for deleting the entire stored expense list.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, endpoints, expense::ExpenseStore};

/// The state needed to clear the expense list.
#[derive(Debug, Clone)]
pub struct ClearExpensesState {
    /// The repository that owns the persisted expense list.
    pub store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for ClearExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that deletes the data file and redirects back to the
/// expenses page, which then shows the empty state for any month.
///
/// The confirmation prompt lives on the client: the clear-all button only
/// fires this request after the user confirms.
pub async fn clear_expenses_endpoint(State(state): State<ClearExpensesState>) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire the store lock: {error}");
            return Error::StoreLock.into_alert_response();
        }
    };

    if let Err(error) = store.clear_all() {
        tracing::error!("could not clear the expense list: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

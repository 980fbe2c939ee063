//! Defines the endpoint for downloading a month's expenses as CSV.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseStore},
    month::ActiveMonth,
    timezone::get_local_offset,
};

use super::{
    csv::{export_filename, to_csv},
    expenses_page::MonthQuery,
};

/// The state needed to export a month of expenses.
#[derive(Debug, Clone)]
pub struct ExportCsvState {
    /// The repository that owns the persisted expense list.
    pub store: Arc<Mutex<ExpenseStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that serves the active month's expenses as a CSV
/// download.
///
/// The month is re-filtered from the stored list here, independently of
/// whatever the page last rendered, so the export always reflects the
/// latest persisted state.
pub async fn export_csv_endpoint(
    State(state): State<ExportCsvState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let month = match query.month.as_deref().map(str::parse::<ActiveMonth>) {
        Some(Ok(month)) => month,
        _ => {
            let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
                tracing::error!("Invalid timezone {}", state.local_timezone);
                Error::InvalidTimezone(state.local_timezone.clone())
            })?;
            ActiveMonth::current(local_offset)
        }
    };

    let expenses = {
        let store = state
            .store
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire the store lock: {error}"))
            .map_err(|_| Error::StoreLock)?;
        store.load()
    };

    let in_month: Vec<Expense> = expenses
        .into_iter()
        .filter(|expense| expense.matches_month(month))
        .collect();

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export_filename(month)),
        ),
    ];

    Ok((headers, to_csv(&in_month)).into_response())
}

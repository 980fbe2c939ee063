//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    expense::{Expense, ExpenseStore},
    month::ActiveMonth,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The repository that owns the persisted expense list.
    pub store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for creating an expense.
///
/// The amount arrives as text so that non-numeric input surfaces the same
/// validation alert as a missing or non-positive amount, rather than a bare
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The date when the money was spent.
    #[serde(default)]
    pub date: Option<Date>,
    /// The value of the expense in dollars, as submitted.
    #[serde(default)]
    pub amount: Option<String>,
    /// A short label grouping the expense.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-text detail about the expense.
    #[serde(default)]
    pub note: Option<String>,
    /// The month filter that was active when the form was submitted.
    #[serde(default)]
    pub month: Option<String>,
}

/// Validate the form and build the expense record to persist.
fn expense_from_form(form: &ExpenseForm) -> Result<Expense, Error> {
    let Some(date) = form.date else {
        return Err(Error::MissingDate);
    };

    let amount_text = form.amount.as_deref().unwrap_or_default();
    let amount: f64 = amount_text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(amount_text.to_owned()))?;

    let category = form.category.as_deref().ok_or(Error::EmptyCategory)?;
    let note = form.note.as_deref().unwrap_or_default();

    Expense::new(date, amount, category, note)
}

/// A route handler for creating a new expense, redirects back to the
/// expenses page on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let expense = match expense_from_form(&form) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("rejected expense submission: {error}");
            return error.into_alert_response();
        }
    };

    // Land back on the submitted month's view; the bare page URL
    // normalizes to the current month if the field was absent.
    let redirect_url = match form.month.as_deref().map(str::parse::<ActiveMonth>) {
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

    let mut expenses = store.load();
    expenses.push(expense);

    if let Err(error) = store.save(&expenses) {
        tracing::error!("could not save the expense list: {error}");
        return error.into_alert_response();
    }

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

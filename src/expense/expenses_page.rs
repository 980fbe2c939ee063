//! Defines the route handler for the page that displays expenses as a table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    expense::{Expense, ExpenseStore},
    month::ActiveMonth,
    timezone::get_local_offset,
};

use super::{models::ExpenseRow, view::expenses_view};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The repository that owns the persisted expense list.
    store: Arc<Mutex<ExpenseStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month filter query parameter shared by the page, the export, and the
/// mutation endpoints' redirects.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// The selected month in `YYYY-MM` form, if any.
    pub month: Option<String>,
}

enum MonthDecision {
    Active(ActiveMonth),
    Redirect(String),
}

/// Resolve the month query parameter against today's date.
///
/// A missing or malformed parameter redirects to the canonical URL for the
/// current month, so the page URL always names the month it displays.
fn resolve_month(param: Option<&str>, today: Date) -> MonthDecision {
    match param.map(str::parse::<ActiveMonth>) {
        Some(Ok(month)) => MonthDecision::Active(month),
        _ => MonthDecision::Redirect(endpoints::expenses_month_url(ActiveMonth::from_date(today))),
    }
}

/// Build the table rows for `month`: in-month expenses sorted by date
/// descending. The sort is stable, so expenses sharing a date keep the
/// stored list's order.
fn build_rows(expenses: Vec<Expense>, month: ActiveMonth) -> Vec<ExpenseRow> {
    let mut in_month: Vec<Expense> = expenses
        .into_iter()
        .filter(|expense| expense.matches_month(month))
        .collect();
    in_month.sort_by(|a, b| b.date.cmp(&a.date));

    in_month
        .into_iter()
        .map(|expense| ExpenseRow::new_from_expense(expense, month))
        .collect()
}

/// Render the expense list, month filter, and total for the active month.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezone(state.local_timezone.clone())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let month = match resolve_month(query.month.as_deref(), today) {
        MonthDecision::Active(month) => month,
        MonthDecision::Redirect(redirect_url) => {
            return Ok(Redirect::to(&redirect_url).into_response());
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

    let rows = build_rows(expenses, month);
    let total = rows.iter().map(|row| row.amount).sum();

    Ok(expenses_view(month, today, &rows, total).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::Response,
    };
    use scraper::{ElementRef, Html, Selector};
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        endpoints,
        expense::{Expense, ExpenseStore},
    };

    use super::{ExpensesPageState, MonthQuery, get_expenses_page};

    fn get_test_state() -> (TempDir, ExpensesPageState) {
        let temp_dir = TempDir::new().unwrap();
        let state = ExpensesPageState {
            store: Arc::new(Mutex::new(
                ExpenseStore::new(temp_dir.path().join("expenses.json")),
            )),
            local_timezone: "Etc/UTC".to_owned(),
        };

        (temp_dir, state)
    }

    async fn get_page(state: ExpensesPageState, month: &str) -> Response {
        get_expenses_page(
            State(state),
            Query(MonthQuery {
                month: Some(month.to_owned()),
            }),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn page_displays_month_rows_and_total() {
        let (_temp_dir, state) = get_test_state();
        {
            let store = state.store.lock().unwrap();
            store
                .save(&[
                    Expense::new(date!(2024 - 05 - 01), 84.5, "Groceries", "Weekly shop").unwrap(),
                    Expense::new(date!(2024 - 05 - 20), 15.5, "Transport", "").unwrap(),
                    Expense::new(date!(2024 - 04 - 30), 999.0, "Rent", "").unwrap(),
                ])
                .unwrap();
        }

        let response = get_page(state, "2024-05").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let rows = expense_rows(&html);
        assert_eq!(rows.len(), 2, "want 2 rows for 2024-05, got {}", rows.len());
        assert_month_total(&html, "$100.00");
    }

    #[tokio::test]
    async fn page_sorts_rows_by_date_descending() {
        let (_temp_dir, state) = get_test_state();
        {
            let store = state.store.lock().unwrap();
            store
                .save(&[
                    Expense::new(date!(2024 - 05 - 01), 1.0, "First", "").unwrap(),
                    Expense::new(date!(2024 - 05 - 20), 2.0, "Latest", "").unwrap(),
                    Expense::new(date!(2024 - 05 - 10), 3.0, "Middle", "").unwrap(),
                ])
                .unwrap();
        }

        let response = get_page(state, "2024-05").await;
        let html = parse_html(response).await;

        let dates: Vec<String> = expense_rows(&html)
            .iter()
            .map(|row| cell_text(row, 0))
            .collect();
        assert_eq!(dates, vec!["2024-05-20", "2024-05-10", "2024-05-01"]);
    }

    #[tokio::test]
    async fn page_keeps_stored_order_for_equal_dates() {
        let (_temp_dir, state) = get_test_state();
        {
            let store = state.store.lock().unwrap();
            store
                .save(&[
                    Expense::new(date!(2024 - 05 - 10), 1.0, "Added first", "").unwrap(),
                    Expense::new(date!(2024 - 05 - 10), 2.0, "Added second", "").unwrap(),
                ])
                .unwrap();
        }

        let response = get_page(state, "2024-05").await;
        let html = parse_html(response).await;

        let categories: Vec<String> = expense_rows(&html)
            .iter()
            .map(|row| cell_text(row, 1))
            .collect();
        assert_eq!(categories, vec!["Added first", "Added second"]);
    }

    #[tokio::test]
    async fn page_shows_empty_state_and_zero_total_for_empty_month() {
        let (_temp_dir, state) = get_test_state();
        {
            let store = state.store.lock().unwrap();
            store
                .save(&[Expense::new(date!(2024 - 04 - 30), 999.0, "Rent", "").unwrap()])
                .unwrap();
        }

        let response = get_page(state, "2024-05").await;
        let html = parse_html(response).await;

        assert_empty_state_present(&html);
        assert_month_total(&html, "$0.00");
    }

    #[tokio::test]
    async fn page_redirects_to_current_month_when_month_missing() {
        let (_temp_dir, state) = get_test_state();

        let response = get_expenses_page(State(state), Query(MonthQuery { month: None }))
            .await
            .unwrap();

        assert_redirects_to_month_url(response);
    }

    #[tokio::test]
    async fn page_redirects_to_current_month_when_month_malformed() {
        let (_temp_dir, state) = get_test_state();

        let response = get_page(state, "not-a-month").await;

        assert_redirects_to_month_url(response);
    }

    #[tokio::test]
    async fn page_contains_create_form_and_controls() {
        let (_temp_dir, state) = get_test_state();

        let response = get_page(state, "2024-05").await;
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let form = html
            .select(&Selector::parse("form").unwrap())
            .next()
            .expect("No form found");
        assert_eq!(
            form.value().attr("hx-post"),
            Some(endpoints::EXPENSES_API),
            "form should post to the expenses API"
        );
        let hidden_month = form
            .select(&Selector::parse("input[type=hidden][name=month]").unwrap())
            .next()
            .expect("No hidden month input in form");
        assert_eq!(hidden_month.value().attr("value"), Some("2024-05"));

        let month_input = html
            .select(&Selector::parse("input[type=month][name=month]").unwrap())
            .next()
            .expect("No month filter input found");
        assert_eq!(month_input.value().attr("value"), Some("2024-05"));
        assert_eq!(
            month_input.value().attr("hx-get"),
            Some(endpoints::EXPENSES_VIEW)
        );

        let export_link = html
            .select(&Selector::parse("a").unwrap())
            .find(|link| link.text().collect::<String>().trim() == "Export CSV")
            .expect("No export link found");
        assert_eq!(
            export_link.value().attr("href"),
            Some(format!("{}?month=2024-05", endpoints::EXPORT_CSV).as_str())
        );

        let clear_button = html
            .select(&Selector::parse("button[hx-post]").unwrap())
            .find(|button| button.value().attr("hx-post") == Some(endpoints::CLEAR_EXPENSES))
            .expect("No clear-all button found");
        assert!(
            clear_button.value().attr("hx-confirm").is_some(),
            "clear-all button must be guarded by a confirmation prompt"
        );
    }

    #[tokio::test]
    async fn page_rows_include_delete_buttons_with_ids() {
        let (_temp_dir, state) = get_test_state();
        let expense = Expense::new(date!(2024 - 05 - 01), 84.5, "Groceries", "").unwrap();
        let expense_id = expense.id.clone();
        {
            let store = state.store.lock().unwrap();
            store.save(&[expense]).unwrap();
        }

        let response = get_page(state, "2024-05").await;
        let html = parse_html(response).await;

        let rows = expense_rows(&html);
        let delete_button = rows[0]
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .expect("No delete button in row");
        let want_url = format!(
            "{}?month=2024-05",
            endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense_id.as_str())
        );
        assert_eq!(delete_button.value().attr("hx-delete"), Some(want_url.as_str()));
    }

    #[track_caller]
    fn assert_redirects_to_month_url(response: Response) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get("location")
            .expect("Missing redirect location header")
            .to_str()
            .unwrap();
        assert!(
            location.starts_with(&format!("{}?month=", endpoints::EXPENSES_VIEW)),
            "want redirect to a canonical month URL, got {location}"
        );
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    fn expense_rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("tbody tr[data-expense-row='true']").unwrap())
            .collect()
    }

    fn cell_text(row: &ElementRef, index: usize) -> String {
        let cells: Vec<ElementRef> = row.select(&Selector::parse("td").unwrap()).collect();
        cells[index].text().collect::<String>().trim().to_owned()
    }

    #[track_caller]
    fn assert_month_total(html: &Html, want: &str) {
        let total = html
            .select(&Selector::parse("span#month-total").unwrap())
            .next()
            .expect("No month total found");
        let text = total.text().collect::<String>();
        assert_eq!(text.trim(), want);
    }

    #[track_caller]
    fn assert_empty_state_present(html: &Html) {
        let empty_row_selector = Selector::parse("tbody tr td[data-empty-state='true']").unwrap();
        let empty_row = html
            .select(&empty_row_selector)
            .next()
            .expect("No empty-state row found");
        let colspan = empty_row
            .value()
            .attr("colspan")
            .expect("Empty-state cell missing colspan attribute");
        assert_eq!(colspan, "5", "Empty-state cell should span 5 columns");
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}

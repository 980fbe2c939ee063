//! Spendlog is a locally-hosted web app for logging personal expenses.
//!
//! This library provides an HTTP server that directly serves HTML pages.
//! All state lives in a single JSON file on the local filesystem; every
//! page render re-reads that file, and every mutation overwrites it in
//! full.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod month;
mod not_found;
mod routing;
mod timezone;

pub use app_state::AppState;
pub use expense::ExpenseStore;
pub use routing::build_router;

use crate::{
    alert::{AlertTemplate, render},
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The submitted expense form did not include a date.
    #[error("a date is required")]
    MissingDate,

    /// The submitted expense form did not include a category.
    #[error("a category is required")]
    EmptyCategory,

    /// The submitted amount was missing, not a number, not finite, or not
    /// greater than zero.
    ///
    /// Callers should pass in the text the user submitted so it can be
    /// echoed back in the validation message.
    #[error("{0:?} is not a valid amount")]
    InvalidAmount(String),

    /// A month string could not be parsed as `YYYY-MM`.
    #[error("could not parse {0:?} as a month in YYYY-MM form")]
    InvalidMonth(String),

    /// Tried to delete an expense that is not in the stored list.
    #[error("tried to delete an expense that is not in the stored list")]
    DeleteMissingExpense,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the expense store lock.
    #[error("could not acquire the expense store lock")]
    StoreLock,

    /// The expense file could not be written or deleted.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error message.
    #[error("could not update the expense file: {0}")]
    StoreWrite(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => {
                render_internal_server_error(InternalServerErrorPage {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check the --timezone \
                        argument is a valid, canonical timezone string."
                    ),
                })
            }
            Error::StoreLock => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingDate => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Invalid expense", "Enter a date for the expense."),
            ),
            Error::EmptyCategory => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Invalid expense", "Enter a category for the expense."),
            ),
            Error::InvalidAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid expense",
                    &format!(
                        "\"{amount}\" is not a valid amount. Enter a number greater than zero."
                    ),
                ),
            ),
            Error::DeleteMissingExpense => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete expense",
                    "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted.",
                ),
            ),
            Error::InvalidTimezone(timezone) => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Invalid Timezone Settings",
                    &format!(
                        "Could not get local timezone \"{timezone}\". Check the --timezone \
                        argument is a valid, canonical timezone string."
                    ),
                ),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}

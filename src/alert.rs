//! Alert fragments for displaying error messages to users.
//!
//! Alerts are swapped into the page's fixed alert container by the htmx
//! response-targets extension, replacing whatever alert was shown before.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Renders `template` as an HTML response with `status_code`.
#[inline]
pub fn render(status_code: StatusCode, template: AlertTemplate) -> Response {
    (status_code, template.into_markup()).into_response()
}

/// Renders an error message with appropriate styling.
pub struct AlertTemplate<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert as the page's alert container, so swapping it in
    /// with `outerHTML` keeps the container's id and position.
    pub fn into_markup(self) -> Markup {
        html! {
            div
                id="alert-container"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class="rounded border border-red-300 bg-red-50 px-4 py-3 \
                        text-sm text-red-800 shadow \
                        dark:border-red-800 dark:bg-gray-800 dark:text-red-400"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }
            }
        }
    }
}

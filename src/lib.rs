//! Pocketbook is a web app for recording and reviewing personal spending.
//!
//! This library provides a JSON REST API for expense transactions alongside
//! server-rendered HTML pages for entering expenses and viewing spending
//! summaries.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod html;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;
mod validation;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::{alert::render_alert, html::error_page, not_found::get_404_not_found_response};

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
    /// A required field was absent or empty in a write request.
    ///
    /// Callers should resubmit the request with the named field filled in.
    #[error("the field '{0}' is required")]
    MissingField(&'static str),

    /// The amount in a write request could not be read as a finite number.
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    /// The date in a write request could not be parsed as a calendar date.
    ///
    /// Dates are expected in the ISO format YYYY-MM-DD.
    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The category in a write request is not one of the fixed expense
    /// categories.
    ///
    /// Free-form category labels are never accepted. Client code must pick
    /// from the category registry.
    #[error("'{0}' is not a valid category")]
    InvalidCategory(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether this error was caused by a bad write request rather than a
    /// server-side fault.
    fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDate(_)
                | Error::InvalidCategory(_)
        )
    }

    /// Convert the error into a JSON response for the REST API.
    ///
    /// Validation errors map to 400, missing resources to 404, and anything
    /// unexpected to a generic 500 whose details are only logged.
    pub(crate) fn into_api_response(self) -> Response {
        if self.is_validation_error() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response();
        }

        match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Transaction not found" })),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Something went wrong" })),
                )
                    .into_response()
            }
        }
    }

    /// Convert the error into an HTMX alert fragment for form endpoints.
    pub(crate) fn into_alert_response(self) -> Response {
        if self.is_validation_error() {
            return render_alert(
                StatusCode::BAD_REQUEST,
                "Invalid transaction",
                &self.to_string(),
            );
        }

        match self {
            Error::NotFound => render_alert(
                StatusCode::NOT_FOUND,
                "Not found",
                "The transaction could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_alert(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_page()
            }
        }
    }
}

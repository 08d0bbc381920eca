//! Defines the endpoint that deletes an expense from the transactions table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::render_alert,
    transaction::core::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// On success the response is an empty 200 so HTMX swaps the table row out.
/// An unknown ID renders an alert with a 404 status, never a silent success.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(_) => StatusCode::OK.into_response(),
        Err(Error::NotFound) => render_alert(
            StatusCode::NOT_FOUND,
            "Could not delete transaction",
            "The transaction could not be found. \
            Try refreshing the page to see if it has already been deleted.",
        ),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not delete transaction",
                "An unexpected error occurred. Try again later or check the logs on the server.",
            )
        }
    }
}

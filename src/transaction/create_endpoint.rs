//! Defines the endpoint that records a new expense from the browser form.

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
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    transaction::core::create_transaction,
    validation::{TransactionInput, validate_create},
};

/// The state needed to record a new expense.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a new expense, redirects to the transactions
/// view on success.
///
/// The form submits a positive magnitude. Expenses are stored as negative
/// amounts, so the magnitude is negated before it is persisted. Validation
/// failures render an alert fragment instead of redirecting.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(input): Form<TransactionInput>,
) -> Response {
    let mut validated = match validate_create(input) {
        Ok(validated) => validated,
        Err(error) => return error.into_alert_response(),
    };

    validated.amount = -validated.amount.abs();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(validated, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

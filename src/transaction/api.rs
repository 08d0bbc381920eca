//! The JSON REST API for transactions.
//!
//! Mirrors the browser-facing pages but speaks JSON: list and create at
//! `/api/transactions`, update and delete at `/api/transactions/{id}`.
//! Validation errors map to 400, unknown IDs to 404, and anything unexpected
//! to a generic 500 whose details only reach the server logs.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::core::{
        self, TransactionId,
    },
    validation::{TransactionInput, validate_create, validate_update},
};

/// How many transactions the list endpoint returns at most.
const RECENT_TRANSACTION_LIMIT: u32 = 50;

/// The state needed by the transaction API handlers.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List the 50 most recent transactions, newest first.
pub async fn list_transactions(State(state): State<TransactionApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match core::get_recent_transactions(RECENT_TRANSACTION_LIMIT, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_api_response(),
    }
}

/// Create a transaction from a JSON body.
///
/// The body must contain a registry category, a non-empty description, a
/// finite amount and a YYYY-MM-DD date. Sign convention is the caller's
/// responsibility: clients submit expenses as negated magnitudes.
pub async fn create_transaction(
    State(state): State<TransactionApiState>,
    Json(input): Json<TransactionInput>,
) -> Response {
    let validated = match validate_create(input) {
        Ok(validated) => validated,
        Err(error) => return error.into_api_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match core::create_transaction(validated, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_api_response(),
    }
}

/// Apply a partial update to the transaction with the given ID.
///
/// Fields present in the body are validated with the same rules as creation;
/// absent fields keep their stored values. The update is rejected wholesale
/// if any present field is invalid.
pub async fn update_transaction(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
    Json(input): Json<TransactionInput>,
) -> Response {
    let patch = match validate_update(input) {
        Ok(patch) => patch,
        Err(error) => return error.into_api_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match core::update_transaction(transaction_id, patch, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_api_response(),
    }
}

/// Delete the transaction with the given ID.
///
/// Deleting an unknown ID responds with 404, never a silent success.
pub async fn delete_transaction(
    State(state): State<TransactionApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match core::delete_transaction(transaction_id, &connection) {
        Ok(_) => Json(json!({
            "message": "Transaction deleted successfully",
            "id": transaction_id,
        }))
        .into_response(),
        Err(error) => error.into_api_response(),
    }
}

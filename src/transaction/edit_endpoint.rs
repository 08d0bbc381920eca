//! Defines the endpoint that saves edits to a stored expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
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
    transaction::core::{TransactionId, update_transaction},
    validation::{TransactionInput, TransactionPatch, validate_create},
};

/// The state needed to save edits to a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for saving edits to a transaction, redirects to the
/// transactions view on success.
///
/// The edit form submits every field, so the whole submission is validated
/// with the same rules as creation. The amount arrives as a positive
/// magnitude and is negated before it is persisted.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(input): Form<TransactionInput>,
) -> Response {
    let validated = match validate_create(input) {
        Ok(validated) => validated,
        Err(error) => return error.into_alert_response(),
    };

    let patch = TransactionPatch {
        amount: Some(-validated.amount.abs()),
        date: Some(validated.date),
        description: Some(validated.description),
        category: Some(validated.category),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_transaction(transaction_id, patch, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::core::{create_transaction, get_transaction},
        validation::{RawAmount, TransactionInput, ValidatedTransaction},
    };

    use super::{EditTransactionState, edit_transaction_endpoint};

    fn new_test_state() -> EditTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn seed_transaction(state: &EditTransactionState) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            ValidatedTransaction {
                amount: -42.5,
                date: date!(2024 - 03 - 15),
                description: "Weekly groceries".to_owned(),
                category: "Food & Dining".to_owned(),
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn saves_all_fields_and_negates_magnitude() {
        let state = new_test_state();
        seed_transaction(&state);

        let form = TransactionInput {
            amount: Some(RawAmount::Text("10.00".to_owned())),
            description: Some("Takeaways".to_owned()),
            category: Some("Entertainment".to_owned()),
            date: Some("2024-03-20".to_owned()),
        };

        let response =
            edit_transaction_endpoint(State(state.clone()), Path(1), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            "/transactions"
        );

        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, -10.0);
        assert_eq!(transaction.description, "Takeaways");
        assert_eq!(transaction.category, "Entertainment");
        assert_eq!(transaction.date, date!(2024 - 03 - 20));
    }

    #[tokio::test]
    async fn rejects_missing_description_with_alert() {
        let state = new_test_state();
        seed_transaction(&state);

        let form = TransactionInput {
            amount: Some(RawAmount::Text("10.00".to_owned())),
            description: Some(String::new()),
            category: Some("Entertainment".to_owned()),
            date: Some("2024-03-20".to_owned()),
        };

        let response =
            edit_transaction_endpoint(State(state.clone()), Path(1), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The stored transaction must be untouched.
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.description, "Weekly groceries");
    }

    #[tokio::test]
    async fn unknown_id_responds_with_not_found() {
        let state = new_test_state();

        let form = TransactionInput {
            amount: Some(RawAmount::Text("10.00".to_owned())),
            description: Some("Takeaways".to_owned()),
            category: Some("Entertainment".to_owned()),
            date: Some("2024-03-20".to_owned()),
        };

        let response = edit_transaction_endpoint(State(state), Path(42), Form(form)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

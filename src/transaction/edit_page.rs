//! Defines the route handler for the page that edits a stored expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    endpoints::format_endpoint,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        core::{TransactionId, get_transaction},
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed to render the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the edit form pre-filled with a stored transaction.
///
/// Responds with the 404 page when the ID does not refer to a stored
/// transaction.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_transaction(transaction_id, &connection) {
            Ok(transaction) => transaction,
            Err(error) => return error.into_response(),
        }
    };

    let today = local_today(&state.local_timezone)
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let defaults = TransactionFormDefaults {
        amount: Some(transaction.amount),
        date: transaction.date,
        description: Some(&transaction.description),
        category: &transaction.category,
        max_date: today,
    };

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h1 class="mb-4 text-2xl font-bold" { "Edit Expense" }

                form
                    hx-put=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction_id))
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    (transaction_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
                }
            }
        }
    };

    base("Edit Expense", &[], &content).into_response()
}

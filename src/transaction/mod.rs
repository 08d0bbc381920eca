//! Everything for recording and managing expense transactions.
//!
//! The `core` module owns the data model and database functions, `api` the
//! JSON endpoints, and the remaining modules the browser-facing pages and
//! form endpoints.

pub mod api;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod new_transaction_page;
mod transactions_page;

pub use self::core::{
    Transaction, TransactionId, create_transaction, create_transaction_table,
    delete_transaction, get_recent_transactions, get_transaction, update_transaction,
};
pub use create_endpoint::{CreateTransactionState, create_transaction_endpoint};
pub use delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint};
pub use edit_endpoint::{EditTransactionState, edit_transaction_endpoint};
pub use edit_page::{EditTransactionPageState, get_edit_transaction_page};
pub use new_transaction_page::{NewTransactionPageState, get_new_transaction_page};
pub use transactions_page::{TransactionsPageState, get_transactions_page};

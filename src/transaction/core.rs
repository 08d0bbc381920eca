//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    validation::{TransactionPatch, ValidatedTransaction},
};

/// Alias for the integer type used for transaction IDs in the database.
pub type TransactionId = i64;

// ============================================================================
// MODEL
// ============================================================================

/// A recorded expense, i.e. an event where money was spent.
///
/// The ID and both timestamps are assigned by the database and never come
/// from the client. Expense amounts are stored as negated magnitudes by
/// convention, but the model itself does not constrain the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent in this transaction.
    pub amount: f64,
    /// When the expense happened. Distinct from when it was recorded.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The expense category, always a member of the category registry.
    pub category: String,
    /// When the record was created. Owned by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last modified. Owned by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from validated input.
///
/// The ID, `created_at` and `updated_at` are assigned here.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    validated: ValidatedTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, description, category, created_at, updated_at",
        )?
        .query_row(
            (
                validated.amount,
                validated.date,
                validated.description,
                validated.category,
                now,
                now,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, description, category, created_at, updated_at
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Apply a validated partial update to the transaction with `id`.
///
/// Fields absent from the patch keep their stored values. The `updated_at`
/// timestamp is refreshed on every successful update, `created_at` is left
/// alone.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    patch: TransactionPatch,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let existing = get_transaction(id, connection)?;

    let amount = patch.amount.unwrap_or(existing.amount);
    let date = patch.date.unwrap_or(existing.date);
    let description = patch.description.unwrap_or(existing.description);
    let category = patch.category.unwrap_or(existing.category);

    let transaction = connection
        .prepare(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING id, amount, date, description, category, created_at, updated_at",
        )?
        .query_row(
            (
                amount,
                date,
                description,
                category,
                OffsetDateTime::now_utc(),
                id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Delete the transaction with `id` and return the deleted record.
///
/// Deleting an ID that does not exist is an error, never a silent success.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "DELETE FROM \"transaction\" WHERE id = :id
             RETURNING id, amount, date, description, category, created_at, updated_at",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get up to `limit` transactions, most recent first.
///
/// Transactions are ordered by their expense date descending, with the ID as
/// a deterministic tie break (newest record first).
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_recent_transactions(
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category, created_at, updated_at
             FROM \"transaction\"
             ORDER BY date DESC, id DESC
             LIMIT :limit",
        )?
        .query_map(&[(":limit", &limit)], map_transaction_row)?
        .map(|row| row.map_err(|error| error.into()))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the recent-transactions query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::core::{
            create_transaction, delete_transaction, get_recent_transactions, get_transaction,
            update_transaction,
        },
        validation::{TransactionPatch, ValidatedTransaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn sample_expense(amount: f64, date: time::Date) -> ValidatedTransaction {
        ValidatedTransaction {
            amount,
            date,
            description: "Lunch".to_owned(),
            category: "Food & Dining".to_owned(),
        }
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let conn = get_test_connection();

        let transaction =
            create_transaction(sample_expense(-12.5, date!(2024 - 03 - 15)), &conn).unwrap();

        assert_eq!(transaction.id, 1);
        assert_eq!(transaction.created_at, transaction.updated_at);
    }

    #[test]
    fn create_preserves_validated_fields_exactly() {
        let conn = get_test_connection();
        let validated = sample_expense(-42.0, date!(2024 - 01 - 31));

        let created = create_transaction(validated.clone(), &conn).unwrap();
        let fetched = get_transaction(created.id, &conn).unwrap();

        assert_eq!(fetched.amount, validated.amount);
        assert_eq!(fetched.date, validated.date);
        assert_eq!(fetched.description, validated.description);
        assert_eq!(fetched.category, validated.category);
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_transaction_fails() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn update_merges_partial_fields() {
        let conn = get_test_connection();
        let created =
            create_transaction(sample_expense(-10.0, date!(2024 - 02 - 10)), &conn).unwrap();

        let patch = TransactionPatch {
            amount: Some(-25.0),
            category: Some("Shopping".to_owned()),
            ..Default::default()
        };
        let updated = update_transaction(created.id, patch, &conn).unwrap();

        assert_eq!(updated.amount, -25.0);
        assert_eq!(updated.category, "Shopping");
        // Untouched fields keep their stored values.
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = update_transaction(7, TransactionPatch::default(), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_returns_the_deleted_record() {
        let conn = get_test_connection();
        let created =
            create_transaction(sample_expense(-5.0, date!(2024 - 04 - 01)), &conn).unwrap();

        let deleted = delete_transaction(created.id, &conn).unwrap();

        assert_eq!(deleted, created);
        assert_eq!(get_transaction(created.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let conn = get_test_connection();

        assert_eq!(delete_transaction(99, &conn), Err(Error::NotFound));
    }

    #[test]
    fn recent_transactions_are_ordered_and_limited() {
        let conn = get_test_connection();
        create_transaction(sample_expense(-1.0, date!(2024 - 01 - 01)), &conn).unwrap();
        create_transaction(sample_expense(-2.0, date!(2024 - 03 - 01)), &conn).unwrap();
        create_transaction(sample_expense(-3.0, date!(2024 - 02 - 01)), &conn).unwrap();

        let recent = get_recent_transactions(2, &conn).unwrap();

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, date!(2024 - 03 - 01));
        assert_eq!(recent[1].date, date!(2024 - 02 - 01));
    }

    #[test]
    fn recent_transactions_tie_break_on_id() {
        let conn = get_test_connection();
        let first = create_transaction(sample_expense(-1.0, date!(2024 - 05 - 05)), &conn).unwrap();
        let second =
            create_transaction(sample_expense(-2.0, date!(2024 - 05 - 05)), &conn).unwrap();

        let recent = get_recent_transactions(10, &conn).unwrap();

        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].id, first.id);
    }
}

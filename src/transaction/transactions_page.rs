//! Defines the route handler for the page that lists recent expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{MonthBucket, group_by_month, total_magnitude},
    category::{category_color, category_icon},
    endpoints,
    endpoints::format_endpoint,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::core::{Transaction, get_recent_transactions},
};

/// How many transactions the page shows at most.
const RECENT_TRANSACTION_LIMIT: u32 = 50;

/// The state needed to render the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the 50 most recent expenses grouped by month, newest month first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
) -> Response {
    let transactions = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_recent_transactions(RECENT_TRANSACTION_LIMIT, &connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_response(),
        }
    };

    let total = total_magnitude(&transactions);
    let months = group_by_month(&transactions);

    let content = html! {
        (NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl"
            {
                div class="flex items-center justify-between mb-4"
                {
                    h1 class="text-2xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Expense"
                    }
                }

                @if transactions.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No expenses recorded yet. Add your first expense to get started."
                    }
                } @else {
                    p class="mb-6 text-gray-700 dark:text-gray-300"
                    {
                        "Total spent: "
                        span class="font-semibold" { (format_currency(total)) }
                    }

                    // Months come out of the grouping oldest first, the page
                    // wants the most recent month at the top.
                    @for month in months.iter().rev() {
                        (month_section(month))
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content).into_response()
}

fn month_section(month: &MonthBucket) -> Markup {
    html! {
        section class="mb-8"
        {
            div class="flex items-center justify-between mb-2"
            {
                h2 class="text-lg font-semibold" { (month.label) }

                span class="text-gray-500 dark:text-gray-400"
                {
                    (format_currency(month.total))
                }
            }

            table class="w-full text-left"
            {
                thead
                {
                    tr
                    {
                        th class=(TABLE_HEADER_STYLE) { "Date" }
                        th class=(TABLE_HEADER_STYLE) { "Description" }
                        th class=(TABLE_HEADER_STYLE) { "Category" }
                        th class=(TABLE_HEADER_STYLE) { "Amount" }
                        th class=(TABLE_HEADER_STYLE) { "" }
                    }
                }

                tbody
                {
                    @for transaction in &month.transactions {
                        (transaction_row(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class=(TABLE_CELL_STYLE)
            {
                span
                    class=(CATEGORY_BADGE_STYLE)
                    style=(format!("background-color: {}", category_color(&transaction.category)))
                {
                    (category_icon(&transaction.category))
                    " "
                    (transaction.category)
                }
            }

            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount.abs())) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-2"
                {
                    a
                        href=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                        class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    button
                        hx-delete=(format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id))
                        hx-target="closest tr"
                        hx-swap="outerHTML"
                        hx-confirm="Delete this expense?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::core::create_transaction,
        validation::ValidatedTransaction,
    };

    use super::{TransactionsPageState, get_transactions_page};

    fn new_test_state() -> TransactionsPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionsPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    async fn render(state: TransactionsPageState) -> Html {
        let response = get_transactions_page(State(state)).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn shows_empty_state_without_transactions() {
        let document = render(new_test_state()).await;

        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("No expenses recorded yet"));
    }

    #[tokio::test]
    async fn groups_transactions_by_month_newest_first() {
        let state = new_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (amount, date, description) in [
                (-10.0, date!(2024 - 02 - 10), "February expense"),
                (-20.0, date!(2024 - 03 - 05), "March expense"),
            ] {
                create_transaction(
                    ValidatedTransaction {
                        amount,
                        date,
                        description: description.to_owned(),
                        category: "Shopping".to_owned(),
                    },
                    &connection,
                )
                .unwrap();
            }
        }

        let document = render(state).await;

        let heading_selector = Selector::parse("section h2").unwrap();
        let headings: Vec<String> = document
            .select(&heading_selector)
            .map(|heading| heading.text().collect())
            .collect();
        assert_eq!(headings, vec!["Mar 2024", "Feb 2024"]);

        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("$30.00"));
    }

    #[tokio::test]
    async fn rows_have_edit_links_and_delete_buttons() {
        let state = new_test_state();
        {
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

        let document = render(state).await;

        let edit = document
            .select(&Selector::parse("a[href='/transactions/1/edit']").unwrap())
            .next();
        assert!(edit.is_some(), "missing edit link");

        let delete = document
            .select(&Selector::parse("button[hx-delete='/transactions/1']").unwrap())
            .next();
        assert!(delete.is_some(), "missing delete button");
    }
}

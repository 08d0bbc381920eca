//! Defines the route handler for the page that records a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, category, endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::local_today,
    transaction::form::{TransactionFormDefaults, transaction_form_fields},
};

/// The state needed to render the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the form for recording a new expense.
///
/// The date field defaults to today in the configured timezone and the
/// category to the registry's default.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
) -> Response {
    let today = local_today(&state.local_timezone)
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let defaults = TransactionFormDefaults {
        amount: None,
        date: today,
        description: None,
        category: category::default_category(),
        max_date: today,
    };

    let content = html! {
        (NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h1 class="mb-4 text-2xl font-bold" { "Add Expense" }

                form
                    hx-post=(endpoints::TRANSACTIONS_VIEW)
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    (transaction_form_fields(&defaults))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
                }
            }
        }
    };

    base("Add Expense", &[], &content).into_response()
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use scraper::{Html, Selector};

    use crate::{endpoints, transaction::new_transaction_page::NewTransactionPageState};

    use super::get_new_transaction_page;

    #[tokio::test]
    async fn page_contains_form_posting_to_transactions() {
        let state = NewTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_new_transaction_page(State(state)).await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().expect("no form");
        assert_eq!(form.attr("hx-post"), Some(endpoints::TRANSACTIONS_VIEW));

        for field in ["amount", "date", "description", "category"] {
            let selector = Selector::parse(&format!("[name={field}]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "missing field {field}"
            );
        }
    }
}

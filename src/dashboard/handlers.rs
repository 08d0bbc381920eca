//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains the route handler for displaying the dashboard and
//! the HTML view functions for rendering its charts and summary cards.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{
        cards::{recent_activity_card, total_spending_card},
        charts::{
            DashboardChart, category_breakdown_chart, charts_script, monthly_expenses_chart,
            weekly_spending_chart,
        },
    },
    endpoints,
    html::{HeadElement, LINK_STYLE, base},
    navigation::NavBar,
    transaction::{Transaction, get_recent_transactions},
};

/// How many transactions the dashboard aggregates over.
const DASHBOARD_TRANSACTION_LIMIT: u32 = 50;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with an overview of recent spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_recent_transactions(DASHBOARD_TRANSACTION_LIMIT, &connection)
        .inspect_err(|error| {
            tracing::error!("could not get transactions for dashboard: {error}")
        })?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let charts = build_dashboard_charts(&transactions);

    Ok(dashboard_view(nav_bar, &transactions, &charts).into_response())
}

/// Creates the array of dashboard charts from transaction data.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(transactions: &[Transaction]) -> [DashboardChart; 3] {
    [
        DashboardChart {
            id: "weekly-spending-chart",
            options: weekly_spending_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(transactions).to_string(),
        },
        DashboardChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(transactions).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some expenses. "

                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Add your first expense"
                }

                "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with summary cards and charts.
fn dashboard_view(
    nav_bar: NavBar<'_>,
    transactions: &[Transaction],
    charts: &[DashboardChart],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            section
                id="summary"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    (total_spending_card(transactions))
                    (recent_activity_card(transactions))
                }
            }

            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for chart in charts {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    }
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

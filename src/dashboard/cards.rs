//! Summary cards shown alongside the dashboard charts.

use maud::{Markup, html};

use crate::{
    aggregation::{most_recent, total_magnitude},
    category::category_icon,
    html::{CARD_STYLE, format_currency},
    transaction::Transaction,
};

/// How many transactions the recent activity card shows.
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// A card with the total spent across the given transactions.
pub(super) fn total_spending_card(transactions: &[Transaction]) -> Markup {
    let total = total_magnitude(transactions);

    html! {
        div class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400"
            {
                "Total Spent"
            }

            p class="text-3xl font-bold" { (format_currency(total)) }

            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                (transactions.len()) " expenses"
            }
        }
    }
}

/// A card listing the most recent expenses, newest first.
pub(super) fn recent_activity_card(transactions: &[Transaction]) -> Markup {
    let recent = most_recent(transactions, RECENT_ACTIVITY_LIMIT);

    html! {
        div class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400 mb-2"
            {
                "Recent Activity"
            }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in &recent {
                    li class="flex items-center justify-between py-2"
                    {
                        span
                        {
                            (category_icon(&transaction.category))
                            " "
                            (transaction.description)
                        }

                        span class="text-gray-500 dark:text-gray-400"
                        {
                            (format_currency(transaction.amount.abs()))
                        }
                    }
                }
            }
        }
    }
}

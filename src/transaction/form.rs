//! The shared form fields for creating and editing a transaction.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::EXPENSE_CATEGORIES,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values a transaction form is pre-filled with.
///
/// The create page uses defaults (today's date, the first registry category),
/// the edit page uses the stored transaction.
pub struct TransactionFormDefaults<'a> {
    /// The expense magnitude to show, if any.
    pub amount: Option<f64>,
    /// The date to pre-select.
    pub date: Date,
    /// The description to pre-fill, if any.
    pub description: Option<&'a str>,
    /// The category to pre-select.
    pub category: &'a str,
    /// The latest date the form accepts.
    pub max_date: Date,
}

/// Render the amount, date, description and category fields.
///
/// The category `<select>` only offers registry entries, which is the
/// client-side half of category enforcement. The server-side validator
/// remains the authoritative gate.
pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.abs()));

    html! {
        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                value=[amount_str.as_deref()]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=(defaults.max_date)
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in EXPENSE_CATEGORIES {
                    option
                        value=(category)
                        selected[category == defaults.category]
                    {
                        (category)
                    }
                }
            }
        }
    }
}

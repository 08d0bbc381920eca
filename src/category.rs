//! The fixed registry of expense categories.
//!
//! Categories are a closed set: every persisted transaction must use one of
//! the labels below, and the validator rejects anything else. The order is
//! significant only for display and for choosing the default selection in
//! forms, never for correctness.

/// The valid expense category labels, in display order.
///
/// The first entry is the default selection for new transactions.
pub const EXPENSE_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Bills & Utilities",
    "Entertainment",
    "Health & Medical",
    "Travel",
    "Education",
    "Personal Care",
    "Home",
    "Other",
];

/// The category pre-selected in the new transaction form.
pub fn default_category() -> &'static str {
    EXPENSE_CATEGORIES[0]
}

/// Whether `label` is a member of the category registry.
pub fn is_valid_category(label: &str) -> bool {
    EXPENSE_CATEGORIES.contains(&label)
}

/// The color used for a category in charts and badges, as a CSS color string.
///
/// Unknown labels get the "Other" color.
pub fn category_color(label: &str) -> &'static str {
    match label {
        "Food & Dining" => "hsl(0, 70%, 50%)",
        "Shopping" => "hsl(30, 70%, 50%)",
        "Transportation" => "hsl(60, 70%, 50%)",
        "Bills & Utilities" => "hsl(90, 70%, 50%)",
        "Entertainment" => "hsl(120, 70%, 50%)",
        "Health & Medical" => "hsl(150, 70%, 50%)",
        "Travel" => "hsl(180, 70%, 50%)",
        "Education" => "hsl(210, 70%, 50%)",
        "Personal Care" => "hsl(240, 70%, 50%)",
        "Home" => "hsl(270, 70%, 50%)",
        _ => "hsl(300, 70%, 50%)",
    }
}

/// The emoji shown next to a category in transaction listings.
pub fn category_icon(label: &str) -> &'static str {
    match label {
        "Food & Dining" => "🍽️",
        "Shopping" => "🛍️",
        "Transportation" => "🚗",
        "Bills & Utilities" => "📱",
        "Entertainment" => "🎮",
        "Health & Medical" => "🏥",
        "Travel" => "✈️",
        "Education" => "📚",
        "Personal Care" => "💅",
        "Home" => "🏠",
        _ => "📦",
    }
}

/// A compact label for use on chart axes and legends where the full label
/// would not fit.
pub fn category_short_name(label: &str) -> &'static str {
    match label {
        "Food & Dining" => "Food",
        "Shopping" => "Shop",
        "Transportation" => "Transport",
        "Bills & Utilities" => "Bills",
        "Entertainment" => "Fun",
        "Health & Medical" => "Health",
        "Travel" => "Travel",
        "Education" => "Edu",
        "Personal Care" => "Personal",
        "Home" => "Home",
        _ => "Other",
    }
}

//! Alert fragments shown when a form submission fails.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Render an error alert fragment with the given status code.
///
/// Forms target `#alert-container` for error responses via the htmx
/// response-targets extension, so the fragment replaces any previous alert.
pub fn render_alert(status_code: StatusCode, title: &str, message: &str) -> Response {
    (status_code, alert_view(title, message)).into_response()
}

fn alert_view(title: &str, message: &str) -> Markup {
    html! {
        div
            role="alert"
            class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 border border-red-300 \
                dark:border-red-800 shadow"
        {
            p class="font-medium" { (title) }
            p { (message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{alert_view, render_alert};

    #[test]
    fn alert_contains_title_and_message() {
        let markup = alert_view("Invalid transaction", "'Snacks' is not a valid category");

        let rendered = markup.into_string();
        assert!(rendered.contains("Invalid transaction"));
        assert!(rendered.contains("not a valid category"));
    }

    #[test]
    fn render_alert_sets_status_code() {
        let response = render_alert(StatusCode::BAD_REQUEST, "Oops", "Bad input");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

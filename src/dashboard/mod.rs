//! The dashboard page summarising recent spending with charts and cards.

mod cards;
mod charts;
mod handlers;

pub use handlers::{DashboardState, get_dashboard_page};

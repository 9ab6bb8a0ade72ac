//! Dashboard module
//!
//! Provides the page for browsing sales: a filter bar, summary stats and a
//! paged table of the matching sales.

mod filter_bar;
mod handlers;
mod tables;

pub use handlers::{DashboardState, get_dashboard_page};

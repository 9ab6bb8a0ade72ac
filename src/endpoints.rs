//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the filter bar, stats and sales table.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The API health check.
pub const API_ROOT: &str = "/api";
/// The route for the filtered, sorted and paged sales listing.
pub const SALES_API: &str = "/api/sales";
/// The route for the stats of the filtered sales.
pub const STATS_API: &str = "/api/stats";
/// The route for the values each multi-select filter can take.
pub const FILTER_OPTIONS_API: &str = "/api/filters";

//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for the page and the htmx content partial
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        filter_bar::filter_bar_view,
        tables::{pagination_view, sales_table, stats_cards},
    },
    endpoints,
    filter::{FilterCriteria, FormFilterParams, to_form_pairs},
    html::{PAGE_CONTAINER_STYLE, base},
    pagination::{PageRequest, PaginationConfig},
    sales::{FilterOptions, SalesPage, get_filter_options, get_sales_page},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for querying sales.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of sales.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config,
        }
    }
}

/// The paging query parameters, read alongside [FormFilterParams].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Display the filter bar, stats and a page of sales.
///
/// htmx requests only receive the content below the filter bar.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(filters): Query<FormFilterParams>,
    Query(page_params): Query<PageParams>,
) -> Result<Response, Error> {
    let criteria = FilterCriteria::from(filters);
    let page_request = PageRequest::from_query(
        page_params.page.as_deref(),
        page_params.limit.as_deref(),
        &state.pagination_config,
    );

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let sales_page = get_sales_page(&criteria, page_request, &connection)?;

    // Carry an explicit page size through the page links.
    let limit = page_params
        .limit
        .as_deref()
        .map(|_| page_request.limit.to_string());
    let content = dashboard_content(
        &criteria,
        &sales_page,
        limit.as_deref(),
        state.pagination_config.max_pages,
    );

    if is_htmx_request {
        return Ok(content.into_response());
    }

    let options = get_filter_options(&connection)?;

    Ok(dashboard_view(&criteria, &options, &content).into_response())
}

fn dashboard_view(criteria: &FilterCriteria, options: &FilterOptions, content: &Markup) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-4" { "Sales Management System" }

                (filter_bar_view(criteria, options))

                div id="dashboard-content" class="w-full"
                {
                    (content)
                }
            }
        }
    );

    base("Dashboard", &content)
}

fn dashboard_content(
    criteria: &FilterCriteria,
    sales_page: &SalesPage,
    limit: Option<&str>,
    max_pages: u64,
) -> Markup {
    let mut filter_pairs = to_form_pairs(criteria);
    if let Some(limit) = limit {
        filter_pairs.push(("limit", limit.to_owned()));
    }

    let page_link = |page: u64| {
        let mut pairs = filter_pairs.clone();
        pairs.push(("page", page.to_string()));
        format_dashboard_link(&pairs)
    };

    html!(
        (stats_cards(&sales_page.stats))
        (sales_table(&sales_page.rows))
        (pagination_view(&sales_page.pagination, max_pages, page_link))
    )
}

fn format_dashboard_link(pairs: &[(&'static str, String)]) -> String {
    match serde_urlencoded::to_string(pairs) {
        Ok(query) if query.is_empty() => endpoints::DASHBOARD_VIEW.to_owned(),
        Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_VIEW),
        Err(error) => {
            tracing::error!("could not encode dashboard link: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

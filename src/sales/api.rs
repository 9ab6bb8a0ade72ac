//! JSON endpoints for the sales listing, stats and filter options.
//!
//! Multi-select filters are sent as JSON encoded arrays and the date filter
//! as a JSON encoded object, e.g. `?gender=["Female"]&dateRange={"quickSelect":["today"]}`.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    AppState, Error,
    filter::{EncodedFilterParams, FilterCriteria},
    pagination::{PageRequest, PaginationConfig},
    sales::{
        FilterOptions, Pagination, SaleRow, SalesStats,
        db::{get_filter_options, get_filtered_stats, get_sales_page},
    },
};

/// The state needed by the sales API.
#[derive(Debug, Clone)]
pub struct SalesApiState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for SalesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config,
        }
    }
}

/// The query parameters for the sales listing.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    #[serde(flatten)]
    pub filters: EncodedFilterParams,
    /// Non-numeric values are treated as missing.
    pub page: Option<String>,
    /// Non-numeric values are treated as missing.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub success: bool,
    pub data: Vec<SaleRow>,
    pub stats: SalesStats,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: &'static str,
    error: String,
}

/// An [Error] rendered as a JSON response.
///
/// Client errors (bad filters) get a 400 with the validation message, any
/// other error gets a 500 whose details are only logged. Server errors are
/// logged here and nowhere else.
#[derive(Debug)]
pub struct ApiError {
    pub error: Error,
    /// What the request was trying to do, shown to the client.
    pub message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            let body = ErrorBody {
                success: false,
                message: "Invalid filter parameters",
                error: self.error.to_string(),
            };

            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        tracing::error!("{}: {}", self.message, self.error);

        let body = ErrorBody {
            success: false,
            message: self.message,
            error: "An internal server error occurred".to_owned(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Get a page of sales with the stats and pagination of every matching sale.
pub async fn get_sales_endpoint(
    State(state): State<SalesApiState>,
    Query(query): Query<SalesQuery>,
) -> Response {
    match get_sales_response(&state, query) {
        Ok(response) => Json(response).into_response(),
        Err(error) => ApiError {
            error,
            message: "Failed to fetch sales data",
        }
        .into_response(),
    }
}

/// Get the stats of every sale matching the filters.
///
/// Sorting and paging parameters are ignored.
pub async fn get_stats_endpoint(
    State(state): State<SalesApiState>,
    Query(filters): Query<EncodedFilterParams>,
) -> Response {
    let stats = filters
        .decode()
        .map_err(Error::from)
        .and_then(|criteria| {
            let connection = lock_connection(&state)?;
            get_filtered_stats(&criteria, &connection)
        });

    match stats {
        Ok(stats) => Json(DataResponse {
            success: true,
            data: stats,
        })
        .into_response(),
        Err(error) => ApiError {
            error,
            message: "Failed to fetch statistics",
        }
        .into_response(),
    }
}

/// Get the values that can be chosen in each multi-select filter.
pub async fn get_filter_options_endpoint(State(state): State<SalesApiState>) -> Response {
    let options = lock_connection(&state).and_then(|connection| get_filter_options(&connection));

    match options {
        Ok(options) => Json(DataResponse::<FilterOptions> {
            success: true,
            data: options,
        })
        .into_response(),
        Err(error) => ApiError {
            error,
            message: "Failed to fetch filter options",
        }
        .into_response(),
    }
}

/// Check that the API is up.
pub async fn get_health() -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .inspect_err(|error| tracing::error!("could not format timestamp: {error}"))
        .unwrap_or_default();

    Json(HealthResponse {
        message: "Sales Management API is running!",
        status: "OK",
        timestamp,
    })
}

fn get_sales_response(state: &SalesApiState, query: SalesQuery) -> Result<SalesResponse, Error> {
    let criteria: FilterCriteria = query.filters.decode()?;
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        &state.pagination_config,
    );

    let connection = lock_connection(state)?;
    let sales_page = get_sales_page(&criteria, page, &connection)?;

    Ok(SalesResponse {
        success: true,
        data: sales_page.rows,
        stats: sales_page.stats,
        pagination: sales_page.pagination,
    })
}

fn lock_connection(
    state: &SalesApiState,
) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)
}

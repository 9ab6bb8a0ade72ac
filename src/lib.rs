//! Sales Dashboard is a web app for browsing, filtering and summarising sales
//! transactions.
//!
//! This library provides a JSON API for sales listings and statistics, and a
//! dashboard page that serves HTML directly. Both are built on the same filter
//! compiler, see [filter].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod csv_import;
mod dashboard;
mod db;
mod endpoints;
pub mod filter;
mod html;
mod internal_server_error;
mod not_found;
mod pagination;
mod routing;
mod sales;

pub use app_state::AppState;
pub use csv_import::parse_sales_csv;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use sales::{SaleRecord, insert_sale_record};

use crate::{
    filter::{DecodeError, ValidationError},
    html::error_view,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A filter value was decoded but is not valid, e.g. a malformed age
    /// range or custom date.
    ///
    /// The client should correct the named field and try again.
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] ValidationError),

    /// A query parameter could not be decoded, e.g. a multi-select filter
    /// that is not a JSON array.
    #[error("{0}")]
    InvalidQueryParameter(#[from] DecodeError),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error from the database.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl Error {
    /// Whether the error was caused by the client's request rather than the
    /// server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFilter(_) | Error::InvalidQueryParameter(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidFilter(ref error) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Invalid Filter",
                    "400",
                    &format!("The {} filter is not valid", error.field()),
                    &self.to_string(),
                ),
            )
                .into_response(),
            Error::InvalidQueryParameter(ref error) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Invalid Filter",
                    "400",
                    &format!("Could not read the {} filter", error.parameter),
                    &error.reason,
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

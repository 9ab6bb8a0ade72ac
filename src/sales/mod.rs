//! Sales transactions: storage, queries and the JSON API.
//!
//! This module contains:
//! - The row, stats and pagination shapes returned to clients
//! - The table definitions and the filtered listing, count and stats queries
//! - Route handlers for the JSON API

mod api;
mod db;
mod models;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{
    SalesApiState, get_filter_options_endpoint, get_health, get_sales_endpoint,
    get_stats_endpoint,
};
pub use db::{
    create_customer_table, create_product_table, create_product_tag_table,
    create_sales_transaction_table, create_salesperson_table, get_filter_options,
    get_sales_page, insert_sale_record,
};
pub use models::{FilterOptions, Pagination, SaleRecord, SaleRow, SalesPage, SalesStats};

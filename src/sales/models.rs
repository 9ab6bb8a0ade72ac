//! The shapes of sales data read from and written to the database.

use serde::Serialize;
use time::Date;

/// A sales transaction together with the customer, product and salesperson
/// it refers to, as it is imported from a sales export.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// Unique ID of the transaction.
    pub transaction_id: i64,
    /// The day of the sale.
    pub date: Date,
    /// Customers sharing an ID are stored once.
    pub customer_id: String,
    /// Customer name.
    pub customer_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Gender.
    pub gender: String,
    /// Age in years.
    pub age: i64,
    /// Customer region.
    pub customer_region: String,
    /// Products sharing an ID are stored once.
    pub product_id: String,
    /// Product name.
    pub product_name: String,
    /// Product category.
    pub product_category: String,
    /// Tags of the product, e.g. "organic".
    pub tags: Vec<String>,
    /// Number of units sold.
    pub quantity: i64,
    /// Price per unit.
    pub price_per_unit: f64,
    /// Zero when no discount was given.
    pub discount_percentage: f64,
    /// The amount before discount.
    pub total_amount: f64,
    /// The amount after discount.
    pub final_amount: f64,
    /// Payment method.
    pub payment_method: String,
    /// Order status.
    pub order_status: String,
    /// `None` for sales without a salesperson.
    pub salesperson_id: Option<String>,
    /// The name of the salesperson.
    pub employee_name: Option<String>,
}

/// One row of the sales table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRow {
    pub transaction_id: i64,
    pub date: Date,
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i64,
    pub customer_region: String,
    pub product_category: String,
    pub product_id: String,
    pub quantity: i64,
    pub final_amount: f64,
    /// Transactions without a salesperson have no employee name.
    pub employee_name: Option<String>,
    pub payment_method: String,
    pub order_status: String,
}

/// Totals over every transaction that matches a filter.
///
/// All values are zero when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    /// The sum of the quantity of each transaction.
    pub total_units: i64,
    /// The sum of the final (discounted) amounts.
    pub total_amount: f64,
    /// The sum of the difference between the total and final amounts.
    pub total_discount: f64,
    /// The number of distinct transactions.
    pub total_orders: i64,
    /// The number of distinct transactions with a non-zero discount.
    pub discount_orders: i64,
}

/// Where a page of sales sits within the full filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    /// `ceil(total_records / limit)`, zero when there are no records.
    pub total_pages: u64,
    pub total_records: u64,
    pub limit: u64,
}

/// A page of sales rows with the stats and pagination of the whole filtered
/// set.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesPage {
    pub rows: Vec<SaleRow>,
    pub stats: SalesStats,
    pub pagination: Pagination,
}

/// The values that can be chosen in each multi-select filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub customer_regions: Vec<String>,
    pub genders: Vec<String>,
    pub age_ranges: Vec<String>,
    pub product_categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
}

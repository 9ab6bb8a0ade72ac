//! Parsing of sales CSV exports into records that can be inserted into the
//! database.
//!
//! The expected header row is:
//!
//! ```text
//! Transaction ID,Date,Customer ID,Customer Name,Phone Number,Gender,Age,
//! Customer Region,Product ID,Product Name,Product Category,Tags,Quantity,
//! Price per Unit,Discount Percentage,Total Amount,Final Amount,Payment Method,
//! Order Status,Salesperson ID,Employee Name
//! ```

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, sales::SaleRecord};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// One line of the CSV export, before the date and tags are parsed.
#[derive(Debug, Deserialize)]
struct CsvSaleRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: i64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Customer Region")]
    customer_region: String,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Product Category")]
    product_category: String,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Price per Unit")]
    price_per_unit: f64,
    #[serde(rename = "Discount Percentage")]
    discount_percentage: f64,
    #[serde(rename = "Total Amount")]
    total_amount: f64,
    #[serde(rename = "Final Amount")]
    final_amount: f64,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Order Status")]
    order_status: String,
    #[serde(rename = "Salesperson ID", default)]
    salesperson_id: Option<String>,
    #[serde(rename = "Employee Name", default)]
    employee_name: Option<String>,
}

/// Parse the sales in a CSV export.
///
/// Expects `text` to start with the header row. Dates must be in the
/// `YYYY-MM-DD` format and tags are a comma separated list inside one field.
/// Empty salesperson columns mean the sale has no salesperson.
///
/// # Errors
/// Returns an [Error::InvalidCSV] naming the line of the first sale that
/// could not be parsed.
pub fn parse_sales_csv(text: &str) -> Result<Vec<SaleRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<CsvSaleRow>().enumerate() {
        // The header is line 1.
        let line_number = index + 2;

        let row = row.map_err(|error| {
            Error::InvalidCSV(format!("could not read line {line_number}: {error}"))
        })?;

        records.push(parse_row(row, line_number)?);
    }

    Ok(records)
}

fn parse_row(row: CsvSaleRow, line_number: usize) -> Result<SaleRecord, Error> {
    let date = Date::parse(&row.date, DATE_FORMAT).map_err(|error| {
        Error::InvalidCSV(format!(
            "could not parse '{}' as a date on line {line_number}: {error}",
            row.date
        ))
    })?;

    let tags = row
        .tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect();

    Ok(SaleRecord {
        transaction_id: row.transaction_id,
        date,
        customer_id: row.customer_id,
        customer_name: row.customer_name,
        phone_number: row.phone_number,
        gender: row.gender,
        age: row.age,
        customer_region: row.customer_region,
        product_id: row.product_id,
        product_name: row.product_name,
        product_category: row.product_category,
        tags,
        quantity: row.quantity,
        price_per_unit: row.price_per_unit,
        discount_percentage: row.discount_percentage,
        total_amount: row.total_amount,
        final_amount: row.final_amount,
        payment_method: row.payment_method,
        order_status: row.order_status,
        salesperson_id: non_empty(row.salesperson_id),
        employee_name: non_empty(row.employee_name),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

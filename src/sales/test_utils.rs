use rusqlite::Connection;
use time::macros::date;

use crate::{db::initialize, sales::SaleRecord};

use super::insert_sale_record;

pub fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

/// A sale with plausible values for every field, unique to `transaction_id`.
pub fn sample_record(transaction_id: i64) -> SaleRecord {
    SaleRecord {
        transaction_id,
        date: date!(2023 - 03 - 15),
        customer_id: format!("CUST-{transaction_id}"),
        customer_name: format!("Customer {transaction_id}"),
        phone_number: format!("98765{transaction_id:05}"),
        gender: "Male".to_owned(),
        age: 30,
        customer_region: "North".to_owned(),
        product_id: format!("PROD-{transaction_id}"),
        product_name: "Cotton Shirt".to_owned(),
        product_category: "Clothing".to_owned(),
        tags: vec!["Regular".to_owned()],
        quantity: 2,
        price_per_unit: 500.0,
        discount_percentage: 10.0,
        total_amount: 1000.0,
        final_amount: 900.0,
        payment_method: "Cash".to_owned(),
        order_status: "Completed".to_owned(),
        salesperson_id: Some("EMP-1".to_owned()),
        employee_name: Some("Harsh Agarwal".to_owned()),
    }
}

#[track_caller]
pub fn insert_records(records: &[SaleRecord], connection: &Connection) {
    for record in records {
        insert_sale_record(record, connection).unwrap();
    }
}

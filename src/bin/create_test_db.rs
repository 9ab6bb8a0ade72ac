use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use sales_dashboard::{SaleRecord, initialize_db, insert_sale_record, parse_sales_csv};

/// A utility for creating a test database for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// A CSV export of sales to fill the database with.
    ///
    /// Generated sales are used when not given.
    #[arg(long, short)]
    csv_path: Option<String>,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let records = match &args.csv_path {
        Some(csv_path) => {
            println!("Reading sales from {csv_path:#?}...");
            let text = fs::read_to_string(csv_path)?;
            parse_sales_csv(&text)?
        }
        None => {
            println!("Generating sales...");
            generate_sales(500)
        }
    };

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Inserting {} sales...", records.len());

    let transaction = conn.transaction()?;
    for record in &records {
        insert_sale_record(record, &transaction)?;
    }
    transaction.commit()?;

    println!("Success!");

    Ok(())
}

const CUSTOMERS: [(&str, &str, i64, &str); 8] = [
    ("Neha Khan", "Female", 22, "South"),
    ("Arjun Rao", "Male", 41, "East"),
    ("Priya Sharma", "Female", 33, "North"),
    ("Vikram Singh", "Male", 58, "West"),
    ("Ananya Iyer", "Female", 64, "Central"),
    ("Rohan Mehta", "Male", 27, "North"),
    ("Sam Fernandes", "Other", 45, "West"),
    ("Kavya Nair", "Female", 19, "South"),
];

const PRODUCTS: [(&str, &str, f64, &[&str]); 6] = [
    ("Cotton Kurta", "Clothing", 899.0, &["cotton", "casual"]),
    ("Denim Jacket", "Clothing", 2499.0, &["fashion"]),
    ("Bluetooth Speaker", "Electronics", 1999.0, &["wireless", "gadgets"]),
    ("Smart Watch", "Electronics", 4999.0, &["gadgets", "smart"]),
    ("Face Serum", "Beauty", 649.0, &["skincare", "organic"]),
    ("Lipstick", "Beauty", 399.0, &["makeup"]),
];

const PAYMENT_METHODS: [&str; 5] = ["Cash", "UPI", "Credit Card", "Debit Card", "Net Banking"];
const ORDER_STATUSES: [&str; 3] = ["Completed", "Pending", "Returned"];
const SALESPEOPLE: [(&str, &str); 3] = [
    ("EMP-1", "Harsh Agarwal"),
    ("EMP-2", "Meera Joshi"),
    ("EMP-3", "Kabir Das"),
];

/// Deterministic sales spread over the last year, so the quick-select date
/// filters have something to match.
fn generate_sales(count: usize) -> Vec<SaleRecord> {
    let today = OffsetDateTime::now_utc().date();

    (0..count)
        .map(|index| {
            let (customer_name, gender, age, region) = CUSTOMERS[index % CUSTOMERS.len()];
            let product_index = (index * 7) % PRODUCTS.len();
            let (product_name, category, price_per_unit, tags) = PRODUCTS[product_index];
            let quantity = (index % 4 + 1) as i64;
            let discount_percentage = [0.0, 5.0, 10.0, 20.0][index % 4];
            let total_amount = price_per_unit * quantity as f64;
            let final_amount = total_amount * (1.0 - discount_percentage / 100.0);
            // Every fifth sale was made online without a salesperson.
            let salesperson = (index % 5 != 0).then(|| SALESPEOPLE[index % SALESPEOPLE.len()]);

            SaleRecord {
                transaction_id: index as i64 + 1,
                date: today.saturating_sub(Duration::days((index * 3 % 365) as i64)),
                customer_id: format!("CUST-{:03}", index % CUSTOMERS.len() + 1),
                customer_name: customer_name.to_owned(),
                phone_number: format!("98{:08}", (index % CUSTOMERS.len()) * 1_234_567),
                gender: gender.to_owned(),
                age,
                customer_region: region.to_owned(),
                product_id: format!("PROD-{:03}", product_index + 1),
                product_name: product_name.to_owned(),
                product_category: category.to_owned(),
                tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
                quantity,
                price_per_unit,
                discount_percentage,
                total_amount,
                final_amount,
                payment_method: PAYMENT_METHODS[index % PAYMENT_METHODS.len()].to_owned(),
                order_status: ORDER_STATUSES[index % ORDER_STATUSES.len()].to_owned(),
                salesperson_id: salesperson.map(|(id, _)| id.to_owned()),
                employee_name: salesperson.map(|(_, name)| name.to_owned()),
            }
        })
        .collect()
}

//! Sales tables and the queries behind the sales listing, count and stats.
//!
//! The listing, count and stats queries all embed the same compiled `WHERE`
//! clause and bind the same parameters, so the totals always describe the
//! rows being listed.

use rusqlite::{Connection, Row, params, params_from_iter};

use crate::{
    Error,
    filter::{
        AGE_RANGE_OPTIONS, CompiledPredicate, FilterColumns, FilterCriteria, FilterQueryCompiler,
        SqlParam, compile_filters,
    },
    pagination::PageRequest,
    sales::{FilterOptions, Pagination, SaleRecord, SaleRow, SalesPage, SalesStats},
};

/// The joins shared by the listing and count queries.
///
/// The tag join may produce one row per tag, so queries over it must count or
/// select distinct transactions.
const SALES_FROM: &str = "FROM sales_transaction t \
    INNER JOIN customer c ON t.customer_id = c.customer_id \
    INNER JOIN product p ON t.product_id = p.product_id \
    LEFT JOIN salesperson s ON t.salesperson_id = s.salesperson_id \
    LEFT JOIN product_tag pt ON p.product_id = pt.product_id";

/// The joins for the stats query, which does not need the salesperson.
const STATS_FROM: &str = "FROM sales_transaction t \
    INNER JOIN customer c ON t.customer_id = c.customer_id \
    INNER JOIN product p ON t.product_id = p.product_id \
    LEFT JOIN product_tag pt ON p.product_id = pt.product_id";

pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS customer (
            customer_id TEXT PRIMARY KEY,
            customer_name TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            gender TEXT NOT NULL,
            age INTEGER NOT NULL,
            customer_region TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_customer_name ON customer(customer_name);",
    )?;

    Ok(())
}

pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product (
            product_id TEXT PRIMARY KEY,
            product_name TEXT NOT NULL,
            product_category TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn create_product_tag_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product_tag (
            product_id TEXT NOT NULL,
            tag TEXT NOT NULL,
            PRIMARY KEY (product_id, tag),
            FOREIGN KEY(product_id) REFERENCES product(product_id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_product_tag_tag ON product_tag(tag);",
    )?;

    Ok(())
}

pub fn create_salesperson_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS salesperson (
            salesperson_id TEXT PRIMARY KEY,
            employee_name TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

pub fn create_sales_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS sales_transaction (
            transaction_id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            customer_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            salesperson_id TEXT,
            quantity INTEGER NOT NULL,
            price_per_unit REAL NOT NULL,
            discount_percentage REAL NOT NULL DEFAULT 0,
            total_amount REAL NOT NULL,
            final_amount REAL NOT NULL,
            payment_method TEXT NOT NULL,
            order_status TEXT NOT NULL,
            FOREIGN KEY(customer_id) REFERENCES customer(customer_id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(product_id) REFERENCES product(product_id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(salesperson_id) REFERENCES salesperson(salesperson_id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sales_transaction_date ON sales_transaction(date);
        CREATE INDEX IF NOT EXISTS idx_sales_transaction_customer ON sales_transaction(customer_id);
        CREATE INDEX IF NOT EXISTS idx_sales_transaction_product ON sales_transaction(product_id);",
    )?;

    Ok(())
}

/// Insert a sale and the customer, product, tags and salesperson it refers to.
///
/// Customers, products, tags and salespeople that already exist are left
/// unchanged, so records sharing them can be inserted one after the other.
///
/// # Errors
/// Returns an [Error::SqlError] if the transaction ID already exists or there
/// is some other SQL error.
pub fn insert_sale_record(record: &SaleRecord, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT OR IGNORE INTO customer
            (customer_id, customer_name, phone_number, gender, age, customer_region)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.customer_id,
            record.customer_name,
            record.phone_number,
            record.gender,
            record.age,
            record.customer_region,
        ],
    )?;

    connection.execute(
        "INSERT OR IGNORE INTO product (product_id, product_name, product_category)
        VALUES (?1, ?2, ?3)",
        params![
            record.product_id,
            record.product_name,
            record.product_category
        ],
    )?;

    for tag in &record.tags {
        connection.execute(
            "INSERT OR IGNORE INTO product_tag (product_id, tag) VALUES (?1, ?2)",
            params![record.product_id, tag],
        )?;
    }

    if let (Some(salesperson_id), Some(employee_name)) =
        (&record.salesperson_id, &record.employee_name)
    {
        connection.execute(
            "INSERT OR IGNORE INTO salesperson (salesperson_id, employee_name) VALUES (?1, ?2)",
            params![salesperson_id, employee_name],
        )?;
    }

    connection.execute(
        "INSERT INTO sales_transaction
            (transaction_id, date, customer_id, product_id, salesperson_id, quantity,
            price_per_unit, discount_percentage, total_amount, final_amount,
            payment_method, order_status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            record.transaction_id,
            record.date,
            record.customer_id,
            record.product_id,
            record.salesperson_id,
            record.quantity,
            record.price_per_unit,
            record.discount_percentage,
            record.total_amount,
            record.final_amount,
            record.payment_method,
            record.order_status,
        ],
    )?;

    Ok(())
}

/// Get one page of the sales matching `criteria` along with the stats and
/// pagination of every matching sale.
///
/// The filters are compiled once and the same predicate is used for the
/// listing, count and stats queries.
///
/// # Errors
/// Returns [Error::InvalidFilter] if an age range or custom date in
/// `criteria` is malformed, or [Error::SqlError] if a query fails.
pub fn get_sales_page(
    criteria: &FilterCriteria,
    page: PageRequest,
    connection: &Connection,
) -> Result<SalesPage, Error> {
    let predicate = compile_filters(criteria, &FilterColumns::SALES)?;
    let order_by = FilterQueryCompiler::build_order_by_clause(criteria.sort_by.as_deref());

    let total_records = count_sales(&predicate, connection)?;
    let rows = get_sales_rows(&predicate, order_by, page, connection)?;
    let stats = get_sales_stats(&predicate, connection)?;

    Ok(SalesPage {
        rows,
        stats,
        pagination: Pagination {
            current_page: page.page,
            total_pages: page.total_pages(total_records),
            total_records,
            limit: page.limit,
        },
    })
}

/// Get the stats of every sale matching `criteria`.
///
/// # Errors
/// Returns [Error::InvalidFilter] if an age range or custom date in
/// `criteria` is malformed, or [Error::SqlError] if the query fails.
pub fn get_filtered_stats(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<SalesStats, Error> {
    let predicate = compile_filters(criteria, &FilterColumns::SALES)?;

    get_sales_stats(&predicate, connection)
}

/// Count the distinct transactions matching `predicate`.
pub fn count_sales(predicate: &CompiledPredicate, connection: &Connection) -> Result<u64, Error> {
    let query = format!(
        "SELECT COUNT(DISTINCT t.transaction_id) {SALES_FROM} {}",
        predicate.clause
    );

    let count: i64 = connection.query_row(&query, params_from_iter(&predicate.parameters), |row| {
        row.get(0)
    })?;

    Ok(count as u64)
}

/// Get a page of the sales matching `predicate`, sorted by `order_by`.
///
/// Ties are broken by transaction ID so that paging is stable.
pub fn get_sales_rows(
    predicate: &CompiledPredicate,
    order_by: &str,
    page: PageRequest,
    connection: &Connection,
) -> Result<Vec<SaleRow>, Error> {
    let query = format!(
        "SELECT DISTINCT t.transaction_id, t.date, c.customer_id, c.customer_name, \
        c.phone_number, c.gender, c.age, c.customer_region, p.product_category, p.product_id, \
        t.quantity, t.final_amount, s.employee_name, t.payment_method, t.order_status \
        {SALES_FROM} {} \
        ORDER BY {order_by}, t.transaction_id ASC \
        LIMIT ? OFFSET ?",
        predicate.clause
    );

    // SQLite treats a negative offset as zero, so huge offsets must not wrap.
    let mut parameters = predicate.parameters.clone();
    parameters.push(SqlParam::Integer(
        i64::try_from(page.limit).unwrap_or(i64::MAX),
    ));
    parameters.push(SqlParam::Integer(
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    ));

    connection
        .prepare(&query)?
        .query_map(params_from_iter(&parameters), map_sale_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect()
}

/// Sum the sales matching `predicate`.
///
/// The sums run over the distinct matching transactions, so a product with
/// several tags is only counted once.
pub fn get_sales_stats(
    predicate: &CompiledPredicate,
    connection: &Connection,
) -> Result<SalesStats, Error> {
    let query = format!(
        "SELECT \
            COALESCE(SUM(quantity), 0), \
            COALESCE(SUM(final_amount), 0.0), \
            COALESCE(SUM(total_amount - final_amount), 0.0), \
            COUNT(transaction_id), \
            COUNT(CASE WHEN discount_percentage > 0 THEN transaction_id END) \
        FROM sales_transaction \
        WHERE transaction_id IN (SELECT t.transaction_id {STATS_FROM} {})",
        predicate.clause
    );

    let stats = connection.query_row(&query, params_from_iter(&predicate.parameters), |row| {
        Ok(SalesStats {
            total_units: row.get(0)?,
            total_amount: row.get(1)?,
            total_discount: row.get(2)?,
            total_orders: row.get(3)?,
            discount_orders: row.get(4)?,
        })
    })?;

    Ok(stats)
}

/// Get the distinct values stored for each multi-select filter.
///
/// Age ranges are fixed buckets rather than stored values.
pub fn get_filter_options(connection: &Connection) -> Result<FilterOptions, Error> {
    Ok(FilterOptions {
        customer_regions: get_distinct_values("customer_region", "customer", connection)?,
        genders: get_distinct_values("gender", "customer", connection)?,
        age_ranges: AGE_RANGE_OPTIONS.iter().map(|&range| range.to_owned()).collect(),
        product_categories: get_distinct_values("product_category", "product", connection)?,
        tags: get_distinct_values("tag", "product_tag", connection)?,
        payment_methods: get_distinct_values("payment_method", "sales_transaction", connection)?,
    })
}

fn get_distinct_values(
    column: &str,
    table: &str,
    connection: &Connection,
) -> Result<Vec<String>, Error> {
    connection
        .prepare(&format!(
            "SELECT DISTINCT {column} FROM {table} WHERE {column} <> '' ORDER BY {column} ASC"
        ))?
        .query_map([], |row| row.get(0))?
        .map(|value_result| value_result.map_err(Error::SqlError))
        .collect()
}

fn map_sale_row(row: &Row) -> Result<SaleRow, rusqlite::Error> {
    Ok(SaleRow {
        transaction_id: row.get(0)?,
        date: row.get(1)?,
        customer_id: row.get(2)?,
        customer_name: row.get(3)?,
        phone_number: row.get(4)?,
        gender: row.get(5)?,
        age: row.get(6)?,
        customer_region: row.get(7)?,
        product_category: row.get(8)?,
        product_id: row.get(9)?,
        quantity: row.get(10)?,
        final_amount: row.get(11)?,
        employee_name: row.get(12)?,
        payment_method: row.get(13)?,
        order_status: row.get(14)?,
    })
}

#[cfg(test)]
mod tests {
    use time::{Date, Duration, OffsetDateTime, macros::date};

    use crate::{
        Error,
        filter::{
            DateFilter, FilterColumns, FilterCriteria, QuickSelect, RelativeRange,
            ValidationError, compile_filters,
        },
        pagination::{PageRequest, PaginationConfig},
        sales::{
            SaleRecord, SalesStats,
            test_utils::{get_test_connection, insert_records, sample_record},
        },
    };

    use super::{
        count_sales, get_filter_options, get_filtered_stats, get_sales_page, get_sales_stats,
        insert_sale_record,
    };

    fn first_page() -> PageRequest {
        PageRequest { page: 1, limit: 10 }
    }

    fn transaction_ids(criteria: &FilterCriteria, conn: &rusqlite::Connection) -> Vec<i64> {
        get_sales_page(criteria, first_page(), conn)
            .unwrap()
            .rows
            .iter()
            .map(|row| row.transaction_id)
            .collect()
    }

    #[test]
    fn insert_shares_customers_and_products() {
        let conn = get_test_connection();
        let first = sample_record(1);
        let second = SaleRecord {
            transaction_id: 2,
            ..first.clone()
        };

        insert_records(&[first, second], &conn);

        let customers: i64 = conn
            .query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))
            .unwrap();
        let products: i64 = conn
            .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))
            .unwrap();
        assert_eq!(customers, 1);
        assert_eq!(products, 1);
    }

    #[test]
    fn insert_duplicate_transaction_fails() {
        let conn = get_test_connection();
        insert_records(&[sample_record(1)], &conn);

        let result = insert_sale_record(&sample_record(1), &conn);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
    }

    #[test]
    fn no_filters_returns_everything_newest_first() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    date: date!(2023 - 01 - 01),
                    ..sample_record(1)
                },
                SaleRecord {
                    date: date!(2023 - 06 - 01),
                    ..sample_record(2)
                },
                SaleRecord {
                    date: date!(2023 - 03 - 01),
                    ..sample_record(3)
                },
            ],
            &conn,
        );

        let got = transaction_ids(&FilterCriteria::default(), &conn);

        assert_eq!(got, vec![2, 3, 1]);
    }

    #[test]
    fn filters_by_gender_age_and_search() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    customer_name: "Neha Rao".to_owned(),
                    gender: "Female".to_owned(),
                    age: 28,
                    ..sample_record(1)
                },
                SaleRecord {
                    customer_name: "Priya Rao".to_owned(),
                    gender: "Female".to_owned(),
                    age: 50,
                    ..sample_record(2)
                },
                SaleRecord {
                    customer_name: "Arjun Rao".to_owned(),
                    gender: "Male".to_owned(),
                    age: 30,
                    ..sample_record(3)
                },
                SaleRecord {
                    customer_name: "Kavya Singh".to_owned(),
                    gender: "Female".to_owned(),
                    age: 31,
                    ..sample_record(4)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            gender: vec!["Female".to_owned()],
            age_range: vec!["26-35".to_owned()],
            search: Some("Rao".to_owned()),
            ..Default::default()
        };

        let got = get_sales_page(&criteria, first_page(), &conn).unwrap();

        assert_eq!(got.rows.len(), 1);
        assert_eq!(got.rows[0].customer_name, "Neha Rao");
        assert_eq!(got.pagination.total_records, 1);
        assert_eq!(got.stats.total_orders, 1);
    }

    #[test]
    fn search_matches_phone_number() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    phone_number: "9123456789".to_owned(),
                    ..sample_record(1)
                },
                sample_record(2),
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            search: Some("  912345 ".to_owned()),
            ..Default::default()
        };

        assert_eq!(transaction_ids(&criteria, &conn), vec![1]);
    }

    #[test]
    fn tag_join_does_not_duplicate_rows_or_totals() {
        let conn = get_test_connection();
        insert_records(
            &[SaleRecord {
                tags: vec!["VIP".to_owned(), "Premium".to_owned(), "New".to_owned()],
                quantity: 3,
                total_amount: 1000.0,
                final_amount: 800.0,
                discount_percentage: 20.0,
                ..sample_record(1)
            }],
            &conn,
        );
        let criteria = FilterCriteria {
            tags: vec!["VIP".to_owned(), "Premium".to_owned()],
            ..Default::default()
        };

        let got = get_sales_page(&criteria, first_page(), &conn).unwrap();

        assert_eq!(got.rows.len(), 1);
        assert_eq!(got.pagination.total_records, 1);
        assert_eq!(
            got.stats,
            SalesStats {
                total_units: 3,
                total_amount: 800.0,
                total_discount: 200.0,
                total_orders: 1,
                discount_orders: 1,
            }
        );
    }

    #[test]
    fn stats_sum_matching_sales() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    quantity: 1,
                    total_amount: 100.0,
                    final_amount: 100.0,
                    discount_percentage: 0.0,
                    ..sample_record(1)
                },
                SaleRecord {
                    quantity: 4,
                    total_amount: 400.0,
                    final_amount: 300.0,
                    discount_percentage: 25.0,
                    ..sample_record(2)
                },
                SaleRecord {
                    customer_region: "South".to_owned(),
                    ..sample_record(3)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            customer_region: vec!["North".to_owned()],
            ..Default::default()
        };

        let got = get_filtered_stats(&criteria, &conn).unwrap();

        assert_eq!(
            got,
            SalesStats {
                total_units: 5,
                total_amount: 400.0,
                total_discount: 100.0,
                total_orders: 2,
                discount_orders: 1,
            }
        );
    }

    #[test]
    fn stats_are_zero_when_nothing_matches() {
        let conn = get_test_connection();
        insert_records(&[sample_record(1)], &conn);
        let criteria = FilterCriteria {
            payment_method: vec!["Wallet".to_owned()],
            ..Default::default()
        };

        let got = get_filtered_stats(&criteria, &conn).unwrap();

        assert_eq!(got, SalesStats::default());
    }

    #[test]
    fn count_and_stats_share_the_listing_predicate() {
        let conn = get_test_connection();
        insert_records(
            &(1..=12)
                .map(|id| SaleRecord {
                    gender: if id % 3 == 0 { "Female" } else { "Male" }.to_owned(),
                    ..sample_record(id)
                })
                .collect::<Vec<_>>(),
            &conn,
        );
        let criteria = FilterCriteria {
            gender: vec!["Male".to_owned()],
            ..Default::default()
        };
        let predicate = compile_filters(&criteria, &FilterColumns::SALES).unwrap();

        let page = get_sales_page(&criteria, first_page(), &conn).unwrap();

        assert_eq!(count_sales(&predicate, &conn).unwrap(), 8);
        assert_eq!(page.pagination.total_records, 8);
        assert_eq!(get_sales_stats(&predicate, &conn).unwrap().total_orders, 8);
    }

    #[test]
    fn pages_through_results() {
        let conn = get_test_connection();
        insert_records(
            &(1..=25).map(sample_record).collect::<Vec<_>>(),
            &conn,
        );

        let got = get_sales_page(
            &FilterCriteria::default(),
            PageRequest { page: 3, limit: 10 },
            &conn,
        )
        .unwrap();

        assert_eq!(got.rows.len(), 5);
        assert_eq!(got.pagination.current_page, 3);
        assert_eq!(got.pagination.total_pages, 3);
        assert_eq!(got.pagination.total_records, 25);
        assert_eq!(got.pagination.limit, 10);
        // All dates are equal so the tie-break on ID decides the order.
        assert_eq!(got.rows[0].transaction_id, 21);
    }

    #[test]
    fn page_far_past_the_end_has_no_rows() {
        let conn = get_test_connection();
        insert_records(&[sample_record(1), sample_record(2)], &conn);
        let page = PageRequest::from_query(
            Some("9223372036854775807"),
            Some("10"),
            &PaginationConfig::default(),
        );

        let got = get_sales_page(&FilterCriteria::default(), page, &conn).unwrap();

        assert!(got.rows.is_empty(), "want no rows, got {:?}", got.rows);
        assert_eq!(got.pagination.total_records, 2);
        assert_eq!(got.pagination.current_page, 9_223_372_036_854_775_807);
    }

    #[test]
    fn sorts_by_customer_name() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    customer_name: "Charlie".to_owned(),
                    ..sample_record(1)
                },
                SaleRecord {
                    customer_name: "Alice".to_owned(),
                    ..sample_record(2)
                },
                SaleRecord {
                    customer_name: "Bob".to_owned(),
                    ..sample_record(3)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            sort_by: Some("name-asc".to_owned()),
            ..Default::default()
        };

        assert_eq!(transaction_ids(&criteria, &conn), vec![2, 3, 1]);
    }

    #[test]
    fn sorts_by_amount_descending() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    final_amount: 10.0,
                    ..sample_record(1)
                },
                SaleRecord {
                    final_amount: 30.0,
                    ..sample_record(2)
                },
                SaleRecord {
                    final_amount: 20.0,
                    ..sample_record(3)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            sort_by: Some("amount-desc".to_owned()),
            ..Default::default()
        };

        assert_eq!(transaction_ids(&criteria, &conn), vec![2, 3, 1]);
    }

    #[test]
    fn quick_select_today_matches_only_today() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        insert_records(
            &[
                SaleRecord {
                    date: today,
                    ..sample_record(1)
                },
                SaleRecord {
                    date: today - Duration::days(10),
                    ..sample_record(2)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            date_range: Some(DateFilter {
                quick_select: vec![QuickSelect::Range(RelativeRange::Today)],
                custom_date: None,
            }),
            ..Default::default()
        };

        assert_eq!(transaction_ids(&criteria, &conn), vec![1]);
    }

    /// Sales on the first of this month (1), the last day of last month (2),
    /// the first of last month (3) and yesterday (4).
    fn month_boundary_records(today: Date) -> Vec<SaleRecord> {
        let this_month_start = today.replace_day(1).unwrap();
        let last_month_end = this_month_start - Duration::days(1);
        let last_month_start = last_month_end.replace_day(1).unwrap();

        [
            this_month_start,
            last_month_end,
            last_month_start,
            today - Duration::days(1),
        ]
        .into_iter()
        .zip(1..)
        .map(|(date, id)| SaleRecord {
            date,
            ..sample_record(id)
        })
        .collect()
    }

    fn ids_in_range(range: RelativeRange, conn: &rusqlite::Connection) -> Vec<i64> {
        let criteria = FilterCriteria {
            date_range: Some(DateFilter {
                quick_select: vec![QuickSelect::Range(range)],
                custom_date: None,
            }),
            ..Default::default()
        };

        let mut ids = transaction_ids(&criteria, conn);
        ids.sort();
        ids
    }

    fn ids_where(records: &[SaleRecord], predicate: impl Fn(Date) -> bool) -> Vec<i64> {
        records
            .iter()
            .filter(|record| predicate(record.date))
            .map(|record| record.transaction_id)
            .collect()
    }

    #[test]
    fn this_month_matches_the_current_calendar_month() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let records = month_boundary_records(today);
        insert_records(&records, &conn);

        let got = ids_in_range(RelativeRange::ThisMonth, &conn);

        assert!(got.contains(&1));
        assert!(!got.contains(&2) && !got.contains(&3));
        assert_eq!(
            got,
            ids_where(&records, |date| date.month() == today.month()
                && date.year() == today.year())
        );
    }

    #[test]
    fn last_month_matches_the_whole_previous_month() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let records = month_boundary_records(today);
        insert_records(&records, &conn);
        let last_month_end = today.replace_day(1).unwrap() - Duration::days(1);

        let got = ids_in_range(RelativeRange::LastMonth, &conn);

        assert!(got.contains(&2) && got.contains(&3));
        assert!(!got.contains(&1));
        assert_eq!(
            got,
            ids_where(&records, |date| date.month() == last_month_end.month()
                && date.year() == last_month_end.year())
        );
    }

    #[test]
    fn yesterday_matches_only_the_previous_day() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let records = month_boundary_records(today);
        insert_records(&records, &conn);
        let yesterday = today - Duration::days(1);

        let got = ids_in_range(RelativeRange::Yesterday, &conn);

        assert!(got.contains(&4));
        assert_eq!(got, ids_where(&records, |date| date == yesterday));
    }

    #[test]
    fn last_7_days_excludes_older_month_boundaries() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        let records = month_boundary_records(today);
        insert_records(&records, &conn);
        let week_ago = today - Duration::days(7);

        let got = ids_in_range(RelativeRange::Last7Days, &conn);

        assert!(got.contains(&4));
        assert!(!got.contains(&3));
        assert_eq!(got, ids_where(&records, |date| date >= week_ago));
    }

    #[test]
    fn last_30_days_includes_recent_sales() {
        let conn = get_test_connection();
        let today = OffsetDateTime::now_utc().date();
        insert_records(
            &[
                SaleRecord {
                    date: today - Duration::days(5),
                    ..sample_record(1)
                },
                SaleRecord {
                    date: today - Duration::days(60),
                    ..sample_record(2)
                },
            ],
            &conn,
        );
        let criteria = FilterCriteria {
            date_range: Some(DateFilter {
                quick_select: vec![QuickSelect::Range(RelativeRange::Last30Days)],
                custom_date: None,
            }),
            ..Default::default()
        };

        assert_eq!(transaction_ids(&criteria, &conn), vec![1]);
    }

    #[test]
    fn custom_date_in_either_format_matches_the_day() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    date: date!(2025 - 12 - 09),
                    ..sample_record(1)
                },
                SaleRecord {
                    date: date!(2025 - 12 - 10),
                    ..sample_record(2)
                },
            ],
            &conn,
        );

        for custom_date in ["2025-12-09", "9/december/2025", "09/12/2025"] {
            let criteria = FilterCriteria {
                date_range: Some(DateFilter {
                    quick_select: vec![QuickSelect::Custom],
                    custom_date: Some(custom_date.to_owned()),
                }),
                ..Default::default()
            };

            assert_eq!(
                transaction_ids(&criteria, &conn),
                vec![1],
                "custom date {custom_date:?}"
            );
        }
    }

    #[test]
    fn invalid_age_range_is_rejected() {
        let conn = get_test_connection();
        let criteria = FilterCriteria {
            age_range: vec!["old".to_owned()],
            ..Default::default()
        };

        let got = get_sales_page(&criteria, first_page(), &conn);

        assert_eq!(
            got,
            Err(Error::InvalidFilter(ValidationError::InvalidAgeRange {
                value: "old".to_owned()
            }))
        );
    }

    #[test]
    fn missing_salesperson_has_no_employee_name() {
        let conn = get_test_connection();
        insert_records(
            &[SaleRecord {
                salesperson_id: None,
                employee_name: None,
                ..sample_record(1)
            }],
            &conn,
        );

        let got = get_sales_page(&FilterCriteria::default(), first_page(), &conn).unwrap();

        assert_eq!(got.rows[0].employee_name, None);
    }

    #[test]
    fn filter_options_are_distinct_and_sorted() {
        let conn = get_test_connection();
        insert_records(
            &[
                SaleRecord {
                    customer_region: "West".to_owned(),
                    tags: vec!["VIP".to_owned(), "New".to_owned()],
                    ..sample_record(1)
                },
                SaleRecord {
                    customer_region: "East".to_owned(),
                    payment_method: "UPI".to_owned(),
                    ..sample_record(2)
                },
                SaleRecord {
                    customer_region: "West".to_owned(),
                    ..sample_record(3)
                },
            ],
            &conn,
        );

        let got = get_filter_options(&conn).unwrap();

        assert_eq!(got.customer_regions, vec!["East", "West"]);
        assert_eq!(got.genders, vec!["Male"]);
        assert_eq!(got.tags, vec!["New", "Regular", "VIP"]);
        assert_eq!(got.payment_methods, vec!["Cash", "UPI"]);
        assert_eq!(got.product_categories, vec!["Clothing"]);
        assert_eq!(got.age_ranges, vec!["18-25", "26-35", "36-45", "46-60", "60+"]);
    }
}

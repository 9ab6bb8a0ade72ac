//! Database schema set up.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::sales::{
    create_customer_table, create_product_table, create_product_tag_table,
    create_sales_transaction_table, create_salesperson_table,
};

/// Create all of the database tables for the application.
///
/// Tables are only created if they do not already exist, so this is safe to
/// call on an existing database.
///
/// # Errors
/// This function may return a [rusqlite::Error] if something went wrong creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_customer_table(&transaction)?;
    create_product_table(&transaction)?;
    create_product_tag_table(&transaction)?;
    create_salesperson_table(&transaction)?;
    create_sales_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let mut tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        tables.sort();

        assert_eq!(
            tables,
            [
                "customer",
                "product",
                "product_tag",
                "sales_transaction",
                "salesperson"
            ]
        );
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        assert_eq!(initialize(&conn), Ok(()));
    }
}

//! Persists the tracker's collections as JSON text in named slots.
//!
//! Each slot holds one serialized collection, the same way a browser keeps
//! values in local storage. The slots live in a single SQLite table so that
//! both collections can be overwritten in one SQL transaction.

use rusqlite::{Connection, OptionalExtension};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    category::{Category, default_categories},
    transaction::Transaction,
};

/// The slot holding the transaction list.
pub const TRANSACTIONS_SLOT: &str = "transactions";
/// The slot holding the category list.
pub const CATEGORIES_SLOT: &str = "categories";

/// The collections read from storage at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl Default for TrackerData {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
        }
    }
}

/// Create the slot table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_slot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS slot (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Read the raw text stored under `name`, or `None` if the slot is empty.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_slot(name: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .prepare("SELECT value FROM slot WHERE name = :name")?
        .query_row(&[(":name", name)], |row| row.get(0))
        .optional()
        .map_err(|error| error.into())
}

/// Overwrite every slot in `slots` within a single SQL transaction.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error,
/// in which case none of the slots are changed.
pub fn set_slots(slots: &[(&str, &str)], connection: &Connection) -> Result<(), Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO slot (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
        )?;

        for (name, value) in slots {
            statement.execute((name, value))?;
        }
    }

    sql_transaction.commit()?;

    Ok(())
}

/// Read both collections from storage.
///
/// A slot that is missing or does not contain valid JSON is treated as
/// empty: transactions fall back to an empty list and categories fall back
/// to [default_categories].
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn load(connection: &Connection) -> Result<TrackerData, Error> {
    let transactions = read_collection(TRANSACTIONS_SLOT, connection)?.unwrap_or_default();
    let categories =
        read_collection(CATEGORIES_SLOT, connection)?.unwrap_or_else(default_categories);

    Ok(TrackerData {
        transactions,
        categories,
    })
}

/// Overwrite both slots with the full contents of both collections.
///
/// # Errors
/// This function will return a:
/// - [Error::JSONSerializationError] if a collection cannot be serialized,
/// - or [Error::SqlError] if there is an SQL error.
pub fn save(
    transactions: &[Transaction],
    categories: &[Category],
    connection: &Connection,
) -> Result<(), Error> {
    let transactions_json = to_json(transactions)?;
    let categories_json = to_json(categories)?;

    set_slots(
        &[
            (TRANSACTIONS_SLOT, &transactions_json),
            (CATEGORIES_SLOT, &categories_json),
        ],
        connection,
    )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|error| Error::JSONSerializationError(error.to_string()))
}

fn read_collection<T: DeserializeOwned>(
    slot: &str,
    connection: &Connection,
) -> Result<Option<Vec<T>>, Error> {
    let Some(text) = get_slot(slot, connection)? else {
        return Ok(None);
    };

    match serde_json::from_str(&text) {
        Ok(collection) => Ok(Some(collection)),
        Err(error) => {
            tracing::warn!("ignoring malformed data in the {slot} slot: {error}");
            Ok(None)
        }
    }
}

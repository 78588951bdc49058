use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::ledger::Ledger;

/// A ledger backed by an in-memory database, seeded with the default categories.
pub(crate) fn get_test_ledger() -> Arc<Mutex<Ledger>> {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    let ledger = Ledger::open(connection).expect("Could not open ledger");

    Arc::new(Mutex::new(ledger))
}

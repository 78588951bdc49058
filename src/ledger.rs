//! The in-memory transaction and category stores.
//!
//! Every mutation is written through to storage in full before it returns.

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryName},
    record_id::RecordId,
    storage::{self, TrackerData, create_slot_table},
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// Holds the transactions and categories for the lifetime of the app.
#[derive(Debug)]
pub struct Ledger {
    connection: Connection,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl Ledger {
    /// Open a ledger backed by `connection`, reading any previously saved data.
    ///
    /// # Errors
    /// Returns an error if the storage table cannot be created or read.
    pub fn open(connection: Connection) -> Result<Self, Error> {
        create_slot_table(&connection)?;

        let TrackerData {
            transactions,
            categories,
        } = storage::load(&connection)?;

        tracing::info!(
            "Loaded {} transactions and {} categories",
            transactions.len(),
            categories.len()
        );

        Ok(Self {
            connection,
            transactions,
            categories,
        })
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All categories in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Assign an ID to `new_transaction` and append it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is negative or not a number,
    /// - or an error if the transactions could not be saved, in which case the
    ///   ledger is left unchanged.
    pub fn add_transaction(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let id = RecordId::generate(|id| self.transactions.iter().any(|t| &t.id == id));
        let transaction = new_transaction.finalize(id)?;

        self.transactions.push(transaction.clone());

        if let Err(error) = self.persist() {
            self.transactions.pop();
            return Err(error);
        }

        Ok(transaction)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `false` without touching anything else if no transaction has that ID.
    ///
    /// # Errors
    /// Returns an error if the transactions could not be saved, in which case
    /// the ledger is left unchanged.
    pub fn delete_transaction(&mut self, id: &RecordId) -> Result<bool, Error> {
        let Some(index) = self.transactions.iter().position(|t| &t.id == id) else {
            return Ok(false);
        };

        let removed = self.transactions.remove(index);

        if let Err(error) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(error);
        }

        Ok(true)
    }

    /// Append a category named `name`.
    ///
    /// Duplicate names are allowed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyCategoryName] if `name` is empty or only whitespace,
    /// - or an error if the categories could not be saved, in which case the
    ///   ledger is left unchanged.
    pub fn add_category(&mut self, name: &str, kind: TransactionKind) -> Result<Category, Error> {
        let name = CategoryName::new(name)?;
        let id = RecordId::generate(|id| self.categories.iter().any(|c| &c.id == id));
        let category = Category { id, name, kind };

        self.categories.push(category.clone());

        if let Err(error) = self.persist() {
            self.categories.pop();
            return Err(error);
        }

        Ok(category)
    }

    fn persist(&self) -> Result<(), Error> {
        storage::save(&self.transactions, &self.categories, &self.connection)
            .inspect_err(|error| tracing::error!("could not save tracker data: {error}"))
    }
}

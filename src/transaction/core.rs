//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, record_id::RecordId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The value used in stored records and form fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// A capitalised label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions cannot be edited once created, only deleted.
/// To create a new `Transaction`, use [Transaction::build] and add it to a
/// [crate::Ledger].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: RecordId,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "crate::date_format")]
    pub date: Date,
    /// Free text notes about the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(kind: TransactionKind, amount: f64, category: &str, date: Date) -> NewTransaction {
        NewTransaction {
            kind,
            amount,
            category: category.to_owned(),
            date,
            notes: None,
        }
    }
}

/// A transaction that has not been assigned an ID yet.
///
/// ```ignore
/// use time::macros::date;
///
/// let new_transaction = Transaction::build(
///         TransactionKind::Expense,
///         1500.0,
///         "Food",
///         date!(2024-01-12),
///     )
///     .notes("Groceries");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub date: Date,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_owned());
        self
    }

    /// Check the amount and attach `id` to create a [Transaction].
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the amount is negative, infinite or NaN.
    pub(crate) fn finalize(self, id: RecordId) -> Result<Transaction, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            date: self.date,
            notes: self.notes,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

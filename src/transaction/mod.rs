//! Transaction management for the tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` builder
//! - The form and endpoint for adding a transaction
//! - The endpoint for deleting a transaction

mod core;
mod create_endpoint;
mod delete_endpoint;

pub use core::{NewTransaction, Transaction, TransactionKind};
pub use create_endpoint::{create_transaction_endpoint, transaction_form_view};
pub use delete_endpoint::delete_transaction_endpoint;

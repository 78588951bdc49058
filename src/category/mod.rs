//! Categories label transactions as a kind of income or expense.
//!
//! Categories can only be added, never renamed or removed.

mod create_endpoint;
mod domain;

pub use create_endpoint::{categories_view, create_category_endpoint};
pub use domain::{Category, CategoryFormData, CategoryName, default_categories};

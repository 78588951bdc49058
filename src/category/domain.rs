//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, record_id::RecordId, transaction::TransactionKind};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        CategoryName::new(&name)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label for classifying transactions (e.g., 'Food', 'Salary').
///
/// Transactions refer to categories by name, not by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: RecordId,
    pub name: CategoryName,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// The categories a new tracker starts with.
pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Salary", TransactionKind::Income),
        ("2", "Freelance", TransactionKind::Income),
        ("3", "Food", TransactionKind::Expense),
        ("4", "Transport", TransactionKind::Expense),
        ("5", "Utilities", TransactionKind::Expense),
    ]
    .into_iter()
    .map(|(id, name, kind)| Category {
        id: RecordId::new(id),
        name: CategoryName::new_unchecked(name),
        kind,
    })
    .collect()
}

/// Form data for category creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        category::{CategoryName, default_categories},
        transaction::TransactionKind,
    };

    #[test]
    fn name_is_trimmed() {
        let name = CategoryName::new("  Rent ").unwrap();

        assert_eq!(name.as_ref(), "Rent");
    }

    #[test]
    fn whitespace_name_is_rejected() {
        assert_eq!(CategoryName::new("   "), Err(Error::EmptyCategoryName));
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn default_categories_split_by_kind() {
        let categories = default_categories();

        let income: Vec<_> = categories
            .iter()
            .filter(|category| category.kind == TransactionKind::Income)
            .map(|category| category.name.as_ref())
            .collect();
        let expense: Vec<_> = categories
            .iter()
            .filter(|category| category.kind == TransactionKind::Expense)
            .map(|category| category.name.as_ref())
            .collect();

        assert_eq!(income, ["Salary", "Freelance"]);
        assert_eq!(expense, ["Food", "Transport", "Utilities"]);
    }

    #[test]
    fn serializes_with_record_field_names() {
        let got = serde_json::to_value(&default_categories()[0]).unwrap();

        assert_eq!(got, json!({"id": "1", "name": "Salary", "type": "income"}));
    }

    #[test]
    fn deserializing_blank_name_fails() {
        let got = serde_json::from_value::<CategoryName>(json!("   "));

        assert!(got.is_err());
    }

    #[test]
    fn deserializing_trims_name() {
        let got: CategoryName = serde_json::from_value(json!(" Rent ")).unwrap();

        assert_eq!(got.as_ref(), "Rent");
    }
}

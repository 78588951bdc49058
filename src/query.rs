//! Filters and sorts transactions for display.

use std::cmp::Ordering;

use serde::Deserialize;
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// Which kinds of transaction to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    fn matches(self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Which category names to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Keep transactions whose category is exactly this name.
    Name(String),
}

impl CategoryFilter {
    /// The query value that selects every category.
    ///
    /// Category names are never blank, so this cannot clash with a real name.
    pub const ALL: &str = "";

    /// Interpret a query value, where a missing or blank value means no filter.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(value) if value == Self::ALL => Self::All,
            Some(value) => Self::Name(value.to_owned()),
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Name(name) => name,
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Name(name) => name == category,
        }
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Build a range only when both bounds are set.
    pub fn from_bounds(start: Option<Date>, end: Option<Date>) -> Option<Self> {
        Some(Self {
            start: start?,
            end: end?,
        })
    }

    fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The field to order transactions by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
}

impl SortField {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The filter and sort settings for the transaction list.
///
/// The default shows every transaction, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub kind: KindFilter,
    pub category: CategoryFilter,
    /// Only applied when both ends of the range are set.
    pub date_range: Option<DateRange>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl TransactionQuery {
    /// Whether `transaction` passes every active filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.matches(transaction.kind)
            && self.category.matches(&transaction.category)
            && self
                .date_range
                .is_none_or(|range| range.contains(transaction.date))
    }

    /// Filter `transactions` and sort the result.
    ///
    /// The sort is stable. In both directions transactions with equal keys
    /// keep their original relative order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> = transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect();

        let compare = |a: &Transaction, b: &Transaction| match self.sort_field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Amount => a.amount.total_cmp(&b.amount),
            SortField::Category => locale_compare(&a.category, &b.category),
        };

        selected.sort_by(|a, b| match self.sort_order {
            SortOrder::Asc => compare(a, b),
            SortOrder::Desc => compare(b, a),
        });

        selected
    }
}

/// Compare strings the way a person would alphabetise them.
///
/// Letters are compared case-insensitively first; strings that only differ
/// by case put lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded_a = a.to_lowercase();
    let folded_b = b.to_lowercase();

    folded_a.cmp(&folded_b).then_with(|| b.cmp(a))
}

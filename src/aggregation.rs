//! Transaction data aggregation for the summary cards and charts.
//!
//! Provides functions to total income and expenses, group amounts by day for
//! the trend chart, and group amounts by category for the distribution chart.
//!
//! Amounts are added with compensated summation so that long sums do not
//! drift the way repeated floating point addition does, without rounding or
//! limiting the individual amounts.

use std::collections::{BTreeMap, HashMap};

use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// A running total using Neumaier's compensated summation.
///
/// The rounding error of every addition is carried in `compensation` and
/// added back once at the end.
#[derive(Debug, Clone, Copy, Default)]
struct RunningTotal {
    sum: f64,
    compensation: f64,
}

impl RunningTotal {
    fn add(&mut self, amount: f64) {
        let total = self.sum + amount;

        if self.sum.abs() >= amount.abs() {
            self.compensation += (self.sum - total) + amount;
        } else {
            self.compensation += (amount - total) + self.sum;
        }

        self.sum = total;
    }

    fn value(self) -> f64 {
        let value = self.sum + self.compensation;

        // The compensation is NaN once the sum overflows to infinity.
        if value.is_finite() { value } else { self.sum }
    }
}

/// The totals shown in the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// Sum income and expenses over all `transactions`.
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let mut income = RunningTotal::default();
    let mut expenses = RunningTotal::default();
    let mut balance = RunningTotal::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => {
                income.add(transaction.amount);
                balance.add(transaction.amount);
            }
            TransactionKind::Expense => {
                expenses.add(transaction.amount);
                balance.add(-transaction.amount);
            }
        }
    }

    Totals {
        income: income.value(),
        expenses: expenses.value(),
        balance: balance.value(),
    }
}

/// Income and expenses on a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotals {
    pub date: Date,
    pub income: f64,
    pub expenses: f64,
}

/// Groups transactions by calendar day.
///
/// # Returns
/// One entry per day that has at least one transaction, in ascending date order.
pub fn daily_totals(transactions: &[Transaction]) -> Vec<DailyTotals> {
    let mut totals_by_day: BTreeMap<Date, (RunningTotal, RunningTotal)> = BTreeMap::new();

    for transaction in transactions {
        let (income, expenses) = totals_by_day.entry(transaction.date).or_default();

        match transaction.kind {
            TransactionKind::Income => income.add(transaction.amount),
            TransactionKind::Expense => expenses.add(transaction.amount),
        }
    }

    totals_by_day
        .into_iter()
        .map(|(date, (income, expenses))| DailyTotals {
            date,
            income: income.value(),
            expenses: expenses.value(),
        })
        .collect()
}

/// The total amount recorded against one category name.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
    /// The kind of the first transaction seen with this category name.
    ///
    /// If the same name is used for both income and expenses, the amounts of
    /// both kinds are added together and the kind reflects whichever came first.
    pub kind: TransactionKind,
}

/// Groups transactions by category name.
///
/// # Returns
/// One entry per category name, in the order each name first appears in `transactions`.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, RunningTotal, TransactionKind)> = Vec::new();

    for transaction in transactions {
        let index = *index_by_name
            .entry(transaction.category.as_str())
            .or_insert_with(|| {
                groups.push((
                    transaction.category.as_str(),
                    RunningTotal::default(),
                    transaction.kind,
                ));
                groups.len() - 1
            });

        groups[index].1.add(transaction.amount);
    }

    groups
        .into_iter()
        .map(|(name, total, kind)| CategoryTotal {
            name: name.to_owned(),
            total: total.value(),
            kind,
        })
        .collect()
}

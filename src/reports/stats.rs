//! Summary statistics over agreed values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Expense, ExpenseStatus, Money};

/// Summary of a set of expenses by agreed value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total: Money,
    /// Mean agreed value, rounded to the centavo
    pub average: Money,
    pub max: Money,
    pub min: Money,
    pub count: usize,
    /// Agreed value summed per status; only statuses present appear
    pub by_status: BTreeMap<ExpenseStatus, Money>,
}

/// Compute summary statistics; an empty input yields all zeros
pub fn expense_stats(expenses: &[Expense]) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats::default();
    }

    let values: Vec<Money> = expenses.iter().map(|e| e.agreed_value).collect();
    let total: Money = values.iter().sum();

    let mut by_status = BTreeMap::new();
    for expense in expenses {
        *by_status.entry(expense.status).or_insert_with(Money::zero) += expense.agreed_value;
    }

    let count = expenses.len();
    let average = Money::from_cents((total.cents() as f64 / count as f64).round() as i64);

    ExpenseStats {
        total,
        average,
        max: values.iter().copied().max().unwrap_or_default(),
        min: values.iter().copied().min().unwrap_or_default(),
        count,
        by_status,
    }
}

/// Percentage change from `previous` to `current`; zero when `previous` is zero
pub fn percent_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current.cents() - previous.cents()) as f64 / previous.cents() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = expense_stats(&[]);
        assert_eq!(stats.total, Money::zero());
        assert_eq!(stats.average, Money::zero());
        assert_eq!(stats.max, Money::zero());
        assert_eq!(stats.min, Money::zero());
        assert_eq!(stats.count, 0);
        assert!(stats.by_status.is_empty());
    }

    #[test]
    fn test_stats() {
        let expenses = vec![
            Expense::new("1", "Sementes", Money::from_reais(1000)).with_status(ExpenseStatus::Paid),
            Expense::new("1", "Adubo", Money::from_reais(500)),
            Expense::new("2", "Frete", Money::from_reais(300)),
            Expense::new("2", "Peças", Money::from_reais(200)).with_status(ExpenseStatus::Paid),
        ];
        let stats = expense_stats(&expenses);
        assert_eq!(stats.total, Money::from_reais(2000));
        assert_eq!(stats.average, Money::from_reais(500));
        assert_eq!(stats.max, Money::from_reais(1000));
        assert_eq!(stats.min, Money::from_reais(200));
        assert_eq!(stats.count, 4);
        assert_eq!(stats.by_status.len(), 2);
        assert_eq!(stats.by_status[&ExpenseStatus::Paid], Money::from_reais(1200));
        assert_eq!(stats.by_status[&ExpenseStatus::Pending], Money::from_reais(800));
    }

    #[test]
    fn test_average_rounds_to_centavo() {
        let expenses = vec![
            Expense::new("1", "a", Money::from_cents(100)),
            Expense::new("1", "b", Money::from_cents(100)),
            Expense::new("1", "c", Money::from_cents(101)),
        ];
        assert_eq!(expense_stats(&expenses).average, Money::from_cents(100));
    }

    #[test]
    fn test_by_status_serializes_with_wire_names() {
        let expenses = vec![Expense::new("1", "a", Money::from_cents(100))];
        let json = serde_json::to_value(expense_stats(&expenses)).unwrap();
        assert_eq!(json["byStatus"]["pending"], 1.0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(Money::from_reais(150), Money::from_reais(100)), 50.0);
        assert_eq!(percent_change(Money::from_reais(50), Money::from_reais(100)), -50.0);
        assert_eq!(percent_change(Money::from_reais(100), Money::zero()), 0.0);
        assert_eq!(percent_change(Money::zero(), Money::zero()), 0.0);
    }
}

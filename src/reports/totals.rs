//! Per-operation and per-sector rollups
//!
//! Both rollups are sparse: an operation or sector with no positive total is
//! left out of the result. Output order follows the order of the operations
//! or sectors passed in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{Expense, Money, Operation, OperationId, Sector, SectorId};
use crate::services::allocation::value_for_operation;

/// Spending attributed to one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTotal {
    pub operation_id: OperationId,
    pub operation_name: String,
    /// Sum of the resolved values
    pub total: Money,
    /// Part of `total` from paid expenses
    pub paid: Money,
    /// `total - paid`
    pub pending: Money,
    /// Expenses contributing to this operation
    pub count: usize,
}

/// Spending attributed to the operations of one sector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTotal {
    pub sector_id: SectorId,
    pub sector_name: String,
    pub total: Money,
    pub paid: Money,
    pub pending: Money,
    /// Contributing entries: one per non-shared expense, one per matching
    /// allocation of a shared expense
    pub count: usize,
}

/// Roll expenses up per operation, resolving shared expenses through their
/// allocations
pub fn operation_totals(expenses: &[Expense], operations: &[Operation]) -> Vec<OperationTotal> {
    operations
        .iter()
        .map(|operation| {
            let mut total = Money::zero();
            let mut paid = Money::zero();
            let mut count = 0;

            for expense in expenses {
                let value = value_for_operation(expense, &operation.id);
                if value.is_positive() {
                    total += value;
                    if expense.status.is_paid() {
                        paid += value;
                    }
                    count += 1;
                }
            }

            OperationTotal {
                operation_id: operation.id.clone(),
                operation_name: operation.name.clone(),
                total,
                paid,
                pending: total - paid,
                count,
            }
        })
        .filter(|row| row.total.is_positive())
        .collect()
}

/// Roll expenses up per sector through the sector membership of operations
pub fn sector_totals(
    expenses: &[Expense],
    sectors: &[Sector],
    operations: &[Operation],
) -> Vec<SectorTotal> {
    sectors
        .iter()
        .map(|sector| {
            let sector_operations: HashSet<&OperationId> = operations
                .iter()
                .filter(|op| op.belongs_to(&sector.id))
                .map(|op| &op.id)
                .collect();

            let mut total = Money::zero();
            let mut paid = Money::zero();
            let mut count = 0;

            for expense in expenses {
                let is_paid = expense.status.is_paid();
                match (&expense.allocations, expense.is_shared) {
                    (Some(allocations), true) => {
                        for allocation in allocations {
                            if sector_operations.contains(&allocation.operation_id) {
                                total += allocation.value;
                                if is_paid {
                                    paid += allocation.value;
                                }
                                count += 1;
                            }
                        }
                    }
                    _ => {
                        let in_sector = expense
                            .operation_id
                            .as_ref()
                            .is_some_and(|id| sector_operations.contains(id));
                        if in_sector {
                            total += expense.agreed_value;
                            if is_paid {
                                paid += expense.agreed_value;
                            }
                            count += 1;
                        }
                    }
                }
            }

            SectorTotal {
                sector_id: sector.id.clone(),
                sector_name: sector.name.clone(),
                total,
                paid,
                pending: total - paid,
                count,
            }
        })
        .filter(|row| row.total.is_positive())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseAllocation, ExpenseStatus};

    fn fixtures() -> (Vec<Sector>, Vec<Operation>) {
        let sectors = vec![
            Sector::with_id("s1", "Lavoura"),
            Sector::with_id("s2", "Pecuária"),
            Sector::with_id("s3", "Oficina"),
        ];
        let operations = vec![
            Operation::in_sector("1", "Plantio soja", "s1"),
            Operation::in_sector("2", "Colheita soja", "s1"),
            Operation::in_sector("3", "Manejo gado", "s2"),
            Operation::in_sector("4", "Revisão trator", "s3"),
        ];
        (sectors, operations)
    }

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new("1", "Sementes", Money::from_reais(1000)).with_status(ExpenseStatus::Paid),
            Expense::new("3", "Vacinas", Money::from_reais(400)),
            Expense::shared(
                "Diesel",
                Money::from_reais(600),
                vec![
                    ExpenseAllocation::new("1", 50.0, Money::from_reais(600)),
                    ExpenseAllocation::new("2", 25.0, Money::from_reais(600)),
                    ExpenseAllocation::new("3", 25.0, Money::from_reais(600)),
                ],
            )
            .with_status(ExpenseStatus::Paid),
        ]
    }

    #[test]
    fn test_operation_totals() {
        let (_, operations) = fixtures();
        let rows = operation_totals(&expenses(), &operations);

        assert_eq!(rows.len(), 3);
        let plantio = &rows[0];
        assert_eq!(plantio.operation_id.as_str(), "1");
        assert_eq!(plantio.total, Money::from_reais(1300));
        assert_eq!(plantio.paid, Money::from_reais(1300));
        assert_eq!(plantio.pending, Money::zero());
        assert_eq!(plantio.count, 2);

        let manejo = &rows[2];
        assert_eq!(manejo.total, Money::from_reais(550));
        assert_eq!(manejo.paid, Money::from_reais(150));
        assert_eq!(manejo.pending, Money::from_reais(400));
        assert_eq!(manejo.count, 2);
    }

    #[test]
    fn test_operation_totals_skip_idle_operations() {
        let (_, operations) = fixtures();
        let rows = operation_totals(&expenses(), &operations);
        assert!(rows.iter().all(|r| r.operation_id.as_str() != "4"));
        assert!(rows.iter().all(|r| !r.total.is_zero()));
        assert!(operation_totals(&[], &operations).is_empty());
    }

    #[test]
    fn test_sector_totals() {
        let (sectors, operations) = fixtures();
        let rows = sector_totals(&expenses(), &sectors, &operations);

        assert_eq!(rows.len(), 2);
        let lavoura = &rows[0];
        assert_eq!(lavoura.sector_id.as_str(), "s1");
        assert_eq!(lavoura.total, Money::from_reais(1450));
        assert_eq!(lavoura.paid, Money::from_reais(1450));
        // the sementes expense plus two diesel allocations
        assert_eq!(lavoura.count, 3);

        let pecuaria = &rows[1];
        assert_eq!(pecuaria.total, Money::from_reais(550));
        assert_eq!(pecuaria.paid, Money::from_reais(150));
        assert_eq!(pecuaria.pending, Money::from_reais(400));
    }

    #[test]
    fn test_sector_totals_ignore_operations_without_sector() {
        let sectors = vec![Sector::with_id("s1", "Lavoura")];
        let mut loose = Operation::in_sector("9", "Avulsa", "s1");
        loose.sector_id = None;
        let expenses = vec![Expense::new("9", "Peças", Money::from_reais(50))];
        assert!(sector_totals(&expenses, &sectors, &[loose]).is_empty());
    }

    #[test]
    fn test_shared_expense_without_allocations_uses_primary_operation() {
        let (sectors, operations) = fixtures();
        let mut expense = Expense::new("4", "Filtro", Money::from_reais(80));
        expense.is_shared = true;
        let rows = sector_totals(&[expense], &sectors, &operations);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sector_id.as_str(), "s3");
        assert_eq!(rows[0].total, Money::from_reais(80));
    }
}

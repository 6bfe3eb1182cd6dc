//! Monthly Report
//!
//! Filters expenses to one calendar month by creation timestamp and rolls
//! them up per operation and per sector.
//!
//! The top-level totals use the full agreed value of each expense, while the
//! per-operation and per-sector breakdowns use allocation-resolved values. For
//! shared expenses the breakdown therefore does not add up to `total_month`.

use chrono::{Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::totals::{operation_totals, sector_totals, OperationTotal, SectorTotal};
use crate::models::{Expense, Money, Operation, Sector};

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub operation_totals: Vec<OperationTotal>,
    pub sector_totals: Vec<SectorTotal>,
    /// Sum of agreed values of the month's expenses
    pub total_month: Money,
    /// Sum of agreed values of the month's paid expenses
    pub total_paid: Money,
    pub total_pending: Money,
    pub expense_count: usize,
}

/// Keep the expenses created in `month0` (0 = January) of `year`, in UTC
pub fn filter_by_month(expenses: &[Expense], month0: u32, year: i32) -> Vec<Expense> {
    filter_by_month_in(expenses, month0, year, &Utc)
}

/// Keep the expenses created in `month0` of `year` as seen from `tz`
pub fn filter_by_month_in<Tz: TimeZone>(
    expenses: &[Expense],
    month0: u32,
    year: i32,
    tz: &Tz,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| {
            let created = expense.created_at.with_timezone(tz);
            created.month0() == month0 && created.year() == year
        })
        .cloned()
        .collect()
}

impl MonthlyReport {
    /// Generate the report for `month0` (0 = January) of `year`, in UTC
    pub fn generate(
        expenses: &[Expense],
        operations: &[Operation],
        sectors: &[Sector],
        month0: u32,
        year: i32,
    ) -> Self {
        Self::generate_in(expenses, operations, sectors, month0, year, &Utc)
    }

    /// Generate the report with month boundaries taken in `tz`
    pub fn generate_in<Tz: TimeZone>(
        expenses: &[Expense],
        operations: &[Operation],
        sectors: &[Sector],
        month0: u32,
        year: i32,
        tz: &Tz,
    ) -> Self {
        let month_expenses = filter_by_month_in(expenses, month0, year, tz);

        let unallocated = month_expenses
            .iter()
            .filter(|e| e.is_shared && e.allocations().is_empty())
            .count();
        if unallocated > 0 {
            warn!(
                month0,
                year,
                unallocated,
                "shared expenses without allocations in monthly report"
            );
        }

        let total_month: Money = month_expenses.iter().map(|e| e.agreed_value).sum();
        let total_paid: Money = month_expenses
            .iter()
            .filter(|e| e.status.is_paid())
            .map(|e| e.agreed_value)
            .sum();

        let report = Self {
            operation_totals: operation_totals(&month_expenses, operations),
            sector_totals: sector_totals(&month_expenses, sectors, operations),
            total_month,
            total_paid,
            total_pending: total_month - total_paid,
            expense_count: month_expenses.len(),
        };

        debug!(
            month0,
            year,
            expenses = report.expense_count,
            operations = report.operation_totals.len(),
            sectors = report.sector_totals.len(),
            total = report.total_month.cents(),
            "monthly report generated"
        );

        report
    }

    /// Sum of the per-operation breakdown
    pub fn attributed_total(&self) -> Money {
        self.operation_totals.iter().map(|row| row.total).sum()
    }
}

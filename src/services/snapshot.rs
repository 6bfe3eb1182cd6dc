//! Snapshot queries
//!
//! The persistence layer hands the engine a snapshot of sectors, operations
//! and expenses. The snapshot is owned by the caller and never mutated here;
//! when the data changes the caller builds a new one and asks again.

use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

use super::discrepancy::expense_has_discrepancy;
use crate::config::Settings;
use crate::error::{RateioError, RateioResult};
use crate::models::{
    AllocationValidationError, Expense, ExpenseStatus, Money, Operation, OperationId, Sector,
    SectorId,
};
use crate::reports::{
    expense_stats, filter_by_month_in, operation_totals, sector_totals, ExpenseStats,
    MonthlyReport, OperationTotal, SectorTotal,
};

/// Sectors, operations and expenses as loaded by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub sectors: Vec<Sector>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Snapshot {
    pub fn new(sectors: Vec<Sector>, operations: Vec<Operation>, expenses: Vec<Expense>) -> Self {
        Self {
            sectors,
            operations,
            expenses,
        }
    }

    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> RateioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a reader yielding JSON
    pub fn from_reader<R: Read>(reader: R) -> RateioResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Read-only queries and reports over a snapshot
pub struct SnapshotService<'a> {
    snapshot: &'a Snapshot,
    settings: Settings,
}

impl<'a> SnapshotService<'a> {
    /// Create a service using default settings
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            settings: Settings::default(),
        }
    }

    /// Create a service using the given settings
    pub fn with_settings(snapshot: &'a Snapshot, settings: Settings) -> Self {
        Self { snapshot, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // === Lookups ===

    pub fn sector(&self, id: &SectorId) -> Option<&'a Sector> {
        self.snapshot.sectors.iter().find(|s| &s.id == id)
    }

    /// Get a sector, failing when it is not in the snapshot
    pub fn require_sector(&self, id: &SectorId) -> RateioResult<&'a Sector> {
        self.sector(id)
            .ok_or_else(|| RateioError::sector_not_found(id.as_str()))
    }

    pub fn operation(&self, id: &OperationId) -> Option<&'a Operation> {
        self.snapshot.operations.iter().find(|op| &op.id == id)
    }

    /// Get an operation, failing when it is not in the snapshot
    pub fn require_operation(&self, id: &OperationId) -> RateioResult<&'a Operation> {
        self.operation(id)
            .ok_or_else(|| RateioError::operation_not_found(id.as_str()))
    }

    pub fn operations_in_sector(&self, sector_id: &SectorId) -> Vec<&'a Operation> {
        self.snapshot
            .operations
            .iter()
            .filter(|op| op.belongs_to(sector_id))
            .collect()
    }

    /// Expenses whose primary operation is `operation_id`
    ///
    /// Shared expenses are matched on their primary operation only; use
    /// [`Self::operation_totals`] for allocation-aware figures.
    pub fn expenses_for_operation(&self, operation_id: &OperationId) -> Vec<&'a Expense> {
        self.snapshot
            .expenses
            .iter()
            .filter(|e| e.operation_id.as_ref() == Some(operation_id))
            .collect()
    }

    pub fn expenses_with_status(&self, status: ExpenseStatus) -> Vec<&'a Expense> {
        self.snapshot
            .expenses
            .iter()
            .filter(|e| e.status == status)
            .collect()
    }

    /// Expenses still waiting on invoice verification
    pub fn pending_verification(&self) -> Vec<&'a Expense> {
        self.snapshot
            .expenses
            .iter()
            .filter(|e| e.status.needs_verification())
            .collect()
    }

    /// Expenses whose invoice diverges from the agreed value
    pub fn discrepancies(&self) -> Vec<&'a Expense> {
        self.snapshot
            .expenses
            .iter()
            .filter(|e| expense_has_discrepancy(e, self.settings.discrepancy_tolerance))
            .collect()
    }

    /// Shared expenses breaking the allocation invariant
    pub fn invalid_allocations(&self) -> Vec<(&'a Expense, AllocationValidationError)> {
        self.snapshot
            .expenses
            .iter()
            .filter_map(|e| e.validate().err().map(|err| (e, err)))
            .collect()
    }

    /// Fail on the first shared expense breaking the allocation invariant
    pub fn ensure_consistent(&self) -> RateioResult<()> {
        for expense in &self.snapshot.expenses {
            expense.validate()?;
        }
        Ok(())
    }

    // === Totals ===

    /// Agreed value of the expenses whose primary operation is `operation_id`
    pub fn total_for_operation(&self, operation_id: &OperationId) -> Money {
        self.expenses_for_operation(operation_id)
            .iter()
            .map(|e| e.agreed_value)
            .sum()
    }

    /// Agreed value of the expenses created in `month0` of `year`
    pub fn monthly_total(&self, month0: u32, year: i32) -> RateioResult<Money> {
        let tz = self.settings.timezone()?;
        Ok(filter_by_month_in(&self.snapshot.expenses, month0, year, &tz)
            .iter()
            .map(|e| e.agreed_value)
            .sum())
    }

    pub fn operation_totals(&self) -> Vec<OperationTotal> {
        operation_totals(&self.snapshot.expenses, &self.snapshot.operations)
    }

    pub fn sector_totals(&self) -> Vec<SectorTotal> {
        sector_totals(
            &self.snapshot.expenses,
            &self.snapshot.sectors,
            &self.snapshot.operations,
        )
    }

    pub fn stats(&self) -> ExpenseStats {
        expense_stats(&self.snapshot.expenses)
    }

    /// Monthly report with month boundaries in the configured timezone
    pub fn monthly_report(&self, month0: u32, year: i32) -> RateioResult<MonthlyReport> {
        let tz = self.settings.timezone()?;
        debug!(month0, year, offset = %tz, "building monthly report from snapshot");
        Ok(MonthlyReport::generate_in(
            &self.snapshot.expenses,
            &self.snapshot.operations,
            &self.snapshot.sectors,
            month0,
            year,
            &tz,
        ))
    }
}

//! Aggregation engine
//!
//! Pure rollups over caller-supplied expense, operation and sector snapshots:
//! per-operation and per-sector totals, monthly reports and summary
//! statistics.

pub mod monthly;
pub mod stats;
pub mod totals;

pub use monthly::{filter_by_month, filter_by_month_in, MonthlyReport};
pub use stats::{expense_stats, percent_change, ExpenseStats};
pub use totals::{operation_totals, sector_totals, OperationTotal, SectorTotal};

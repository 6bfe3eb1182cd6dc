//! Service layer for the rateio engine
//!
//! Allocation resolution, equal distribution and discrepancy detection, plus
//! read-only queries over a caller-owned snapshot.

pub mod allocation;
pub mod discrepancy;
pub mod snapshot;

pub use allocation::{distribute_equally, value_for_operation};
pub use discrepancy::{
    expense_has_discrepancy, has_discrepancy, has_discrepancy_with_tolerance,
    verification_status, DEFAULT_DISCREPANCY_TOLERANCE,
};
pub use snapshot::{Snapshot, SnapshotService};

//! Core data models for the rateio engine
//!
//! Plain value records supplied by the persistence layer: sectors, the
//! operations grouped under them, and the expenses attributed to operations.

pub mod expense;
pub mod ids;
pub mod money;
pub mod operation;
pub mod sector;

pub use expense::{
    AllocationValidationError, Expense, ExpenseAllocation, ExpenseStatus, PaymentMethod,
    PERCENTAGE_TOLERANCE,
};
pub use ids::{ExpenseId, OperationId, SectorId};
pub use money::Money;
pub use operation::{Operation, OperationType};
pub use sector::Sector;

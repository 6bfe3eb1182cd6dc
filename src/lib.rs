//! Rateio - allocation and aggregation engine for rural expense tracking
//!
//! This library holds the pure calculation core of an expense tracker for
//! farms: expenses are attributed to operations (planting, harvest, herd
//! management...), operations are grouped into sectors, and a shared expense
//! is split across several operations by percentage.
//!
//! # Architecture
//!
//! - `models`: Sectors, operations, expenses and the `Money` type
//! - `services`: Allocation resolution, discrepancy checks, snapshot queries
//! - `reports`: Per-operation and per-sector totals, monthly reports, stats
//! - `validation`: Form validation and primitive predicates
//! - `display`: Date conversions between storage and input formats
//! - `config`: Tolerances and thresholds
//! - `error`: Custom error types
//! - `logging`: Optional tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use rateio::models::{Expense, ExpenseAllocation, Money, Operation};
//! use rateio::reports::operation_totals;
//!
//! let operations = vec![
//!     Operation::in_sector("1", "Plantio", "s1"),
//!     Operation::in_sector("2", "Colheita", "s1"),
//! ];
//! let diesel = Expense::shared(
//!     "Diesel",
//!     Money::from_reais(1000),
//!     vec![
//!         ExpenseAllocation::new("1", 60.0, Money::from_reais(1000)),
//!         ExpenseAllocation::new("2", 40.0, Money::from_reais(1000)),
//!     ],
//! );
//!
//! let totals = operation_totals(&[diesel], &operations);
//! assert_eq!(totals[0].total, Money::from_reais(600));
//! assert_eq!(totals[1].total, Money::from_reais(400));
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod validation;

pub use error::{RateioError, RateioResult};

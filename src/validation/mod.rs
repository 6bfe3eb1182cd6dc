//! Validation layer
//!
//! Primitive predicates over raw input, and the composite form validators
//! built on them. Violations are returned as data, never raised.

pub mod forms;
pub mod predicates;

pub use forms::{
    validate_expense_form, validate_expense_form_with, validate_operation_form,
    validate_sector_form, AllocationInput, ExpenseForm, OperationForm, SectorForm,
    ValidationResult,
};
pub use predicates::{
    has_max_length, has_min_length, is_date_not_in_past, is_date_not_in_past_on, is_in_range,
    is_non_negative_number, is_not_empty, is_positive_number, is_valid_date,
    is_valid_date_format, is_valid_email, is_valid_percentage_distribution,
    is_valid_percentage_distribution_with, parse_number,
};

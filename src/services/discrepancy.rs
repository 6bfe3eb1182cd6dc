//! Discrepancy detection between agreed and invoiced values

use tracing::trace;

use crate::models::{Expense, ExpenseStatus, Money};

/// Default relative tolerance (1%)
pub const DEFAULT_DISCREPANCY_TOLERANCE: f64 = 0.01;

/// Whether the invoice deviates from the agreed value by more than 1%
pub fn has_discrepancy(agreed_value: Money, invoice_value: Money) -> bool {
    has_discrepancy_with_tolerance(agreed_value, invoice_value, DEFAULT_DISCREPANCY_TOLERANCE)
}

/// Whether `|agreed - invoice| / agreed` exceeds `tolerance`
///
/// A zero invoice is a discrepancy unless nothing was agreed either. A zero
/// agreed value against a non-zero invoice is always a discrepancy.
pub fn has_discrepancy_with_tolerance(
    agreed_value: Money,
    invoice_value: Money,
    tolerance: f64,
) -> bool {
    if invoice_value.is_zero() {
        return !agreed_value.is_zero();
    }
    if agreed_value.is_zero() {
        return true;
    }

    let diff = (agreed_value - invoice_value).abs();
    let ratio = diff.cents() as f64 / agreed_value.cents() as f64;
    trace!(
        agreed = agreed_value.cents(),
        invoice = invoice_value.cents(),
        ratio,
        "discrepancy ratio"
    );
    ratio > tolerance
}

/// Whether an expense's attached invoice diverges from its agreed value
///
/// An expense without an invoice has nothing to compare and never diverges.
pub fn expense_has_discrepancy(expense: &Expense, tolerance: f64) -> bool {
    expense
        .invoice_value
        .map(|invoice| has_discrepancy_with_tolerance(expense.agreed_value, invoice, tolerance))
        .unwrap_or(false)
}

/// The verification outcome for an expense, once it has an invoice
pub fn verification_status(expense: &Expense, tolerance: f64) -> Option<ExpenseStatus> {
    expense.invoice_value?;
    if expense_has_discrepancy(expense, tolerance) {
        Some(ExpenseStatus::Discrepancy)
    } else {
        Some(ExpenseStatus::Verified)
    }
}

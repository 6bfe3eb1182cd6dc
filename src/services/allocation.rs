//! Allocation resolution and equal distribution
//!
//! Resolves how much of an expense belongs to a given operation, and builds
//! equal percentage splits for the shared-expense entry workflow.

use crate::models::{Expense, ExpenseAllocation, Money, OperationId};

/// The part of `expense` attributable to `operation_id`
///
/// A shared expense with allocations resolves through its allocations only;
/// an operation missing from the split gets zero. Anything else resolves
/// through the primary operation id.
pub fn value_for_operation(expense: &Expense, operation_id: &OperationId) -> Money {
    if expense.is_shared {
        if let Some(allocations) = &expense.allocations {
            return allocations
                .iter()
                .find(|a| &a.operation_id == operation_id)
                .map(|a| a.value)
                .unwrap_or_default();
        }
    }

    if expense.operation_id.as_ref() == Some(operation_id) {
        return expense.agreed_value;
    }

    Money::zero()
}

/// Split `total` equally across `operation_ids`
///
/// Every operation receives `floor(100 / n)` percent; the first one in input
/// order also takes the remainder so percentages reach exactly 100. Values
/// follow the same tie-break: every other share is truncated to whole
/// centavos and the first takes what is left, so values sum to `total`.
///
/// # Examples
/// ```
/// use rateio::models::{Money, OperationId};
/// use rateio::services::allocation::distribute_equally;
///
/// let ids: Vec<OperationId> = ["1", "2", "3"].into_iter().map(OperationId::from).collect();
/// let split = distribute_equally(Money::from_reais(1000), &ids);
/// let percentages: Vec<f64> = split.iter().map(|a| a.percentage).collect();
/// assert_eq!(percentages, vec![34.0, 33.0, 33.0]);
/// ```
pub fn distribute_equally(total: Money, operation_ids: &[OperationId]) -> Vec<ExpenseAllocation> {
    let Some((first, rest)) = operation_ids.split_first() else {
        return Vec::new();
    };

    let n = operation_ids.len() as i64;
    let base = 100 / n;
    let remainder = 100 - base * n;
    let share = Money::from_cents(total.cents() * base / 100);
    let first_value = total - rest.iter().map(|_| share).sum::<Money>();

    let mut allocations = Vec::with_capacity(operation_ids.len());
    allocations.push(ExpenseAllocation::with_value(
        first.clone(),
        (base + remainder) as f64,
        first_value,
    ));
    allocations.extend(rest.iter().map(|operation_id| {
        ExpenseAllocation::with_value(operation_id.clone(), base as f64, share)
    }));
    allocations
}

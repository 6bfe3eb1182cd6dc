//! Expense model
//!
//! An expense either belongs wholly to its primary operation or, when shared
//! (a "rateio"), is split by percentage across several operations through its
//! allocations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, OperationId};
use super::money::Money;
use super::operation::blank_as_none;

/// Absolute tolerance when checking that allocation percentages reach 100
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Lifecycle status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Recorded, not yet checked against its invoice
    #[default]
    Pending,
    /// Invoice checked and matching
    Verified,
    /// Invoice checked and diverging from the agreed value
    Discrepancy,
    Paid,
    Rejected,
}

impl ExpenseStatus {
    /// Wire name, also used as the key of per-status breakdowns
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Discrepancy => "discrepancy",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Still waiting on someone to check the invoice
    pub fn needs_verification(&self) -> bool {
        matches!(self, Self::Pending | Self::Discrepancy)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pendente"),
            Self::Verified => write!(f, "Verificado"),
            Self::Discrepancy => write!(f, "Divergência"),
            Self::Paid => write!(f, "Pago"),
            Self::Rejected => write!(f, "Rejeitado"),
        }
    }
}

/// How an expense is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Boleto,
    Pix,
    Cartao,
    Transferencia,
    Cheque,
    Dinheiro,
    Outro,
}

/// One operation's share of a shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAllocation {
    /// The operation receiving this share
    pub operation_id: OperationId,

    /// Share of the expense, 0-100
    pub percentage: f64,

    /// `agreed_value * percentage / 100`
    pub value: Money,
}

impl ExpenseAllocation {
    /// Create an allocation whose value is derived from the expense total
    pub fn new(operation_id: impl Into<OperationId>, percentage: f64, total: Money) -> Self {
        Self {
            operation_id: operation_id.into(),
            percentage,
            value: total.percentage(percentage),
        }
    }

    /// Create an allocation with an already computed value
    pub fn with_value(operation_id: impl Into<OperationId>, percentage: f64, value: Money) -> Self {
        Self {
            operation_id: operation_id.into(),
            percentage,
            value,
        }
    }
}

/// A financial record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Primary target operation; ignored when the expense is shared
    #[serde(default, deserialize_with = "blank_as_none")]
    pub operation_id: Option<OperationId>,

    pub description: String,

    #[serde(default)]
    pub supplier: String,

    #[serde(default)]
    pub category: String,

    /// The negotiated/contracted amount
    pub agreed_value: Money,

    #[serde(default)]
    pub negotiated_value: Money,

    /// Amount on the supporting invoice, once one is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_value: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Date of the purchase
    pub date: DateTime<Utc>,

    pub due_date: DateTime<Utc>,

    /// Accounting competence period
    pub competence: DateTime<Utc>,

    #[serde(default)]
    pub payment_method: PaymentMethod,

    /// When the record was created; monthly reports bucket on this
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub status: ExpenseStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,

    /// Whether the value is split across operations
    #[serde(default)]
    pub is_shared: bool,

    /// Present only on shared expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocations: Option<Vec<ExpenseAllocation>>,
}

impl Expense {
    /// Create a pending expense that belongs wholly to one operation
    pub fn new(
        operation_id: impl Into<OperationId>,
        description: impl Into<String>,
        agreed_value: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            operation_id: Some(operation_id.into()),
            description: description.into(),
            supplier: String::new(),
            category: String::new(),
            agreed_value,
            negotiated_value: agreed_value,
            invoice_value: None,
            invoice_number: None,
            date: now,
            due_date: now,
            competence: now,
            payment_method: PaymentMethod::default(),
            created_at: now,
            created_by: String::new(),
            status: ExpenseStatus::Pending,
            notes: None,
            payment_date: None,
            verified_by: None,
            verification_notes: None,
            is_shared: false,
            allocations: None,
        }
    }

    /// Create a pending expense split across operations
    pub fn shared(
        description: impl Into<String>,
        agreed_value: Money,
        allocations: Vec<ExpenseAllocation>,
    ) -> Self {
        let mut expense = Self::new(OperationId::from(""), description, agreed_value);
        expense.operation_id = None;
        expense.is_shared = true;
        expense.allocations = Some(allocations);
        expense
    }

    /// Set the status
    pub fn with_status(mut self, status: ExpenseStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the creation timestamp
    pub fn created_on(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The allocations of a shared expense, or an empty slice
    pub fn allocations(&self) -> &[ExpenseAllocation] {
        self.allocations.as_deref().unwrap_or(&[])
    }

    /// Shared and actually carrying allocations
    pub fn is_allocated(&self) -> bool {
        self.is_shared && self.allocations.is_some()
    }

    /// Allocation percentages in entry order
    pub fn percentages(&self) -> Vec<f64> {
        self.allocations().iter().map(|a| a.percentage).collect()
    }

    /// Sum of the allocation values
    pub fn allocations_total(&self) -> Money {
        self.allocations().iter().map(|a| a.value).sum()
    }

    /// Check the shared/non-shared invariant
    ///
    /// Each allocation value may sit up to one centavo per allocation away
    /// from its percentage share, since an exact split folds the rounding of
    /// every share into one of them.
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        if !self.is_shared {
            return Ok(());
        }

        let allocations = self.allocations();
        if allocations.is_empty() {
            return Err(AllocationValidationError::MissingAllocations);
        }

        let sum: f64 = allocations.iter().map(|a| a.percentage).sum();
        if (sum - 100.0).abs() >= PERCENTAGE_TOLERANCE {
            return Err(AllocationValidationError::PercentageSum { sum });
        }

        let slack = Money::from_cents(allocations.len() as i64);
        for allocation in allocations {
            let expected = self.agreed_value.percentage(allocation.percentage);
            if (expected - allocation.value).abs() > slack {
                return Err(AllocationValidationError::ValueMismatch {
                    operation_id: allocation.operation_id.clone(),
                    expected,
                    actual: allocation.value,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.description,
            self.agreed_value
        )
    }
}

/// Violations of the shared-expense invariant
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    MissingAllocations,
    PercentageSum {
        sum: f64,
    },
    ValueMismatch {
        operation_id: OperationId,
        expected: Money,
        actual: Money,
    },
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAllocations => write!(f, "Shared expense has no allocations"),
            Self::PercentageSum { sum } => {
                write!(f, "Allocation percentages sum to {:.2}, expected 100", sum)
            }
            Self::ValueMismatch {
                operation_id,
                expected,
                actual,
            } => write!(
                f,
                "Allocation for operation {} is {} but its percentage gives {}",
                operation_id, actual, expected
            ),
        }
    }
}

impl std::error::Error for AllocationValidationError {}

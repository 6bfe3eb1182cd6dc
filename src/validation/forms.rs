//! Form validation for expenses, operations and sectors
//!
//! Each validator checks every rule and reports all violations at once, in a
//! fixed order, so the entry screen can show them together.

use serde::{Deserialize, Deserializer, Serialize};

use super::predicates::{
    is_not_empty, is_positive_number, is_valid_percentage_distribution_with, parse_number,
};
use crate::config::Settings;
use crate::models::Expense;

pub const DESCRIPTION_REQUIRED: &str = "Informe a descrição do lançamento";
pub const OPERATION_REQUIRED: &str = "Selecione uma operação";
pub const VALUE_REQUIRED: &str = "Informe um valor válido";
pub const DUE_DATE_REQUIRED: &str = "Informe a data de vencimento";
pub const ALLOCATION_SUM_INVALID: &str = "A soma dos percentuais deve ser 100%";
pub const OPERATION_NAME_REQUIRED: &str = "Informe o nome da operação";
pub const SECTOR_REQUIRED: &str = "Selecione um setor";
pub const SECTOR_NAME_REQUIRED: &str = "Informe o nome do setor";

/// "Select at least N operations to split"
pub fn min_allocations_message(min: usize) -> String {
    format!("Selecione pelo menos {} operações para ratear", min)
}

/// Outcome of validating one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn has_error(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }
}

/// One row of the split editor; only the percentage is validated here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    #[serde(default)]
    pub operation_id: Option<String>,
    pub percentage: f64,
}

/// Raw expense entry as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub operation_id: Option<String>,

    /// Accepts a JSON number or numeric text; anything else is `None`
    #[serde(default, deserialize_with = "number_or_text")]
    pub agreed_value: Option<f64>,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub is_shared: bool,

    #[serde(default)]
    pub allocations: Option<Vec<AllocationInput>>,
}

impl ExpenseForm {
    /// Set the agreed value from the text typed into the field
    pub fn with_agreed_value_text(mut self, text: &str) -> Self {
        self.agreed_value = parse_number(text);
        self
    }
}

impl From<&Expense> for ExpenseForm {
    fn from(expense: &Expense) -> Self {
        Self {
            description: Some(expense.description.clone()),
            operation_id: expense.operation_id.as_ref().map(|id| id.to_string()),
            agreed_value: Some(expense.agreed_value.as_f64()),
            due_date: Some(expense.due_date.format("%d/%m/%Y").to_string()),
            is_shared: expense.is_shared,
            allocations: expense.allocations.as_ref().map(|allocations| {
                allocations
                    .iter()
                    .map(|a| AllocationInput {
                        operation_id: Some(a.operation_id.to_string()),
                        percentage: a.percentage,
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn number_or_text<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(text)) => parse_number(&text),
        None => None,
    })
}

/// Raw operation entry as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector_id: Option<String>,
}

/// Raw sector entry as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorForm {
    #[serde(default)]
    pub name: Option<String>,
}

/// Validate an expense entry with the default settings
pub fn validate_expense_form(form: &ExpenseForm) -> ValidationResult {
    validate_expense_form_with(form, &Settings::default())
}

/// Validate an expense entry
///
/// Rules, in reporting order: description, operation (unless shared),
/// positive value, due date, then for shared entries with allocations the
/// minimum number of operations and the percentage sum.
pub fn validate_expense_form_with(form: &ExpenseForm, settings: &Settings) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_not_empty(form.description.as_deref()) {
        errors.push(DESCRIPTION_REQUIRED.to_string());
    }

    if !form.is_shared && !is_not_empty(form.operation_id.as_deref()) {
        errors.push(OPERATION_REQUIRED.to_string());
    }

    if !is_positive_number(form.agreed_value) {
        errors.push(VALUE_REQUIRED.to_string());
    }

    if !is_not_empty(form.due_date.as_deref()) {
        errors.push(DUE_DATE_REQUIRED.to_string());
    }

    if form.is_shared {
        if let Some(allocations) = &form.allocations {
            if allocations.len() < settings.min_shared_operations {
                errors.push(min_allocations_message(settings.min_shared_operations));
            }

            let percentages: Vec<f64> = allocations.iter().map(|a| a.percentage).collect();
            if !is_valid_percentage_distribution_with(&percentages, settings.percentage_tolerance) {
                errors.push(ALLOCATION_SUM_INVALID.to_string());
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Validate an operation entry
pub fn validate_operation_form(form: &OperationForm) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_not_empty(form.name.as_deref()) {
        errors.push(OPERATION_NAME_REQUIRED.to_string());
    }

    if !is_not_empty(form.sector_id.as_deref()) {
        errors.push(SECTOR_REQUIRED.to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Validate a sector entry
pub fn validate_sector_form(form: &SectorForm) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_not_empty(form.name.as_deref()) {
        errors.push(SECTOR_NAME_REQUIRED.to_string());
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseAllocation, Money};

    fn complete_form() -> ExpenseForm {
        ExpenseForm {
            description: Some("Adubo".into()),
            operation_id: Some("1".into()),
            agreed_value: Some(100.0),
            due_date: Some("15/01/2024".into()),
            ..Default::default()
        }
    }

    fn split(percentages: &[f64]) -> Option<Vec<AllocationInput>> {
        Some(
            percentages
                .iter()
                .enumerate()
                .map(|(i, p)| AllocationInput {
                    operation_id: Some(i.to_string()),
                    percentage: *p,
                })
                .collect(),
        )
    }

    #[test]
    fn test_complete_form_is_valid() {
        let result = validate_expense_form(&complete_form());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_description() {
        let form = ExpenseForm {
            description: Some("".into()),
            ..complete_form()
        };
        let result = validate_expense_form(&form);
        assert!(!result.is_valid);
        assert!(result.has_error(DESCRIPTION_REQUIRED));
        assert_eq!(result.errors, vec!["Informe a descrição do lançamento"]);
    }

    #[test]
    fn test_invalid_value() {
        let form = complete_form().with_agreed_value_text("abc");
        let result = validate_expense_form(&form);
        assert!(!result.is_valid);
        assert!(result.has_error("Informe um valor válido"));

        let zero = ExpenseForm {
            agreed_value: Some(0.0),
            ..complete_form()
        };
        assert!(validate_expense_form(&zero).has_error(VALUE_REQUIRED));
    }

    #[test]
    fn test_all_errors_reported_in_order() {
        let result = validate_expense_form(&ExpenseForm::default());
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                DESCRIPTION_REQUIRED,
                OPERATION_REQUIRED,
                VALUE_REQUIRED,
                DUE_DATE_REQUIRED
            ]
        );
    }

    #[test]
    fn test_shared_form_skips_operation() {
        let form = ExpenseForm {
            operation_id: None,
            is_shared: true,
            allocations: split(&[60.0, 40.0]),
            ..complete_form()
        };
        assert!(validate_expense_form(&form).is_valid);
    }

    #[test]
    fn test_shared_form_needs_two_operations() {
        let form = ExpenseForm {
            is_shared: true,
            allocations: split(&[100.0]),
            ..complete_form()
        };
        let result = validate_expense_form(&form);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Selecione pelo menos 2 operações para ratear"]
        );
    }

    #[test]
    fn test_shared_form_percentage_sum() {
        let form = ExpenseForm {
            is_shared: true,
            allocations: split(&[50.0, 30.0]),
            ..complete_form()
        };
        let result = validate_expense_form(&form);
        assert_eq!(result.errors, vec![ALLOCATION_SUM_INVALID]);
    }

    #[test]
    fn test_shared_form_both_allocation_errors() {
        let form = ExpenseForm {
            is_shared: true,
            allocations: split(&[]),
            ..complete_form()
        };
        let result = validate_expense_form(&form);
        assert_eq!(
            result.errors,
            vec![min_allocations_message(2), ALLOCATION_SUM_INVALID.to_string()]
        );
    }

    #[test]
    fn test_shared_form_without_allocations_list() {
        let form = ExpenseForm {
            operation_id: None,
            is_shared: true,
            allocations: None,
            ..complete_form()
        };
        assert!(validate_expense_form(&form).is_valid);
    }

    #[test]
    fn test_settings_change_minimum() {
        let settings = Settings {
            min_shared_operations: 3,
            ..Settings::default()
        };
        let form = ExpenseForm {
            is_shared: true,
            allocations: split(&[50.0, 50.0]),
            ..complete_form()
        };
        let result = validate_expense_form_with(&form, &settings);
        assert_eq!(
            result.errors,
            vec!["Selecione pelo menos 3 operações para ratear"]
        );
    }

    #[test]
    fn test_deserialize_form_with_text_value() {
        let json = r#"{
            "description": "Frete",
            "operationId": "2",
            "agreedValue": "250.75",
            "dueDate": "10/03/2024"
        }"#;
        let form: ExpenseForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.agreed_value, Some(250.75));
        assert!(validate_expense_form(&form).is_valid);

        let form: ExpenseForm =
            serde_json::from_str(r#"{"agreedValue": "abc", "isShared": true}"#).unwrap();
        assert_eq!(form.agreed_value, None);
        assert!(form.is_shared);
    }

    #[test]
    fn test_form_and_record_read_agreed_value_alike() {
        let json = r#"{
            "id": "7",
            "operationId": "1",
            "description": "Adubo",
            "agreedValue": 1500.5,
            "date": "2024-01-05T00:00:00Z",
            "dueDate": "2024-02-05T00:00:00Z",
            "competence": "2024-01-01T00:00:00Z",
            "createdAt": "2024-01-05T09:00:00Z"
        }"#;
        let form: ExpenseForm = serde_json::from_str(json).unwrap();
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(form.agreed_value, Some(1500.5));
        assert_eq!(expense.agreed_value, Money::from_reais_cents(1500, 50));
        assert_eq!(ExpenseForm::from(&expense).agreed_value, form.agreed_value);
    }

    #[test]
    fn test_form_from_expense() {
        let expense = Expense::shared(
            "Diesel",
            Money::from_reais(600),
            vec![
                ExpenseAllocation::new("1", 50.0, Money::from_reais(600)),
                ExpenseAllocation::new("2", 50.0, Money::from_reais(600)),
            ],
        );
        let form = ExpenseForm::from(&expense);
        assert_eq!(form.agreed_value, Some(600.0));
        assert_eq!(form.operation_id, None);
        assert!(validate_expense_form(&form).is_valid);
    }

    #[test]
    fn test_operation_form() {
        let result = validate_operation_form(&OperationForm::default());
        assert_eq!(result.errors, vec![OPERATION_NAME_REQUIRED, SECTOR_REQUIRED]);

        let ok = OperationForm {
            name: Some("Plantio".into()),
            sector_id: Some("1".into()),
        };
        assert!(validate_operation_form(&ok).is_valid);

        let blank_sector = OperationForm {
            name: Some("Plantio".into()),
            sector_id: Some("  ".into()),
        };
        assert_eq!(
            validate_operation_form(&blank_sector).errors,
            vec!["Selecione um setor"]
        );
    }

    #[test]
    fn test_sector_form() {
        let result = validate_sector_form(&SectorForm {
            name: Some(" ".into()),
        });
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Informe o nome do setor"]);
        assert!(validate_sector_form(&SectorForm {
            name: Some("Lavoura".into())
        })
        .is_valid);
    }

    #[test]
    fn test_result_serializes_contract_names() {
        let json = serde_json::to_value(validate_sector_form(&SectorForm::default())).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0], SECTOR_NAME_REQUIRED);
    }
}

//! Plan validation
//!
//! Turns a raw engine response into a [`Plan`] that satisfies the schema and
//! the group's budget floor, or into a typed [`DomainError`]. Nothing
//! partially validated is ever returned.

use super::entities::{Plan, REQUIRED_FIELDS, parse_amount};
use super::recovery::recover_document;
use crate::core::error::DomainError;
use serde_json::{Map, Value};

/// Validates engine responses against a group's budget floor
///
/// # Example
///
/// ```
/// use packvote_domain::PlanValidator;
///
/// let validator = PlanValidator::new(3000.0);
/// let err = validator.validate(r#"{ "destination": "X" }"#).unwrap_err();
/// assert_eq!(err.kind().to_string(), "missing_field:reason");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanValidator {
    min_budget: f64,
}

impl PlanValidator {
    pub fn new(min_budget: f64) -> Self {
        Self { min_budget }
    }

    pub fn min_budget(&self) -> f64 {
        self.min_budget
    }

    /// Recover, schema-check and budget-check a raw response.
    ///
    /// A floor that is not a positive finite amount rejects every response.
    pub fn validate(&self, raw_response: &str) -> Result<Plan, DomainError> {
        if !(self.min_budget.is_finite() && self.min_budget > 0.0) {
            return Err(DomainError::MalformedResponse(format!(
                "budget floor must be a positive amount, got {}",
                self.min_budget
            )));
        }
        let (document, step) = recover_document(raw_response)?;
        check_required_fields(&document)?;
        self.check_budget(&document)?;
        Ok(Plan::new(document, step))
    }

    /// An absent `per_person_total` counts as zero.
    fn check_budget(&self, document: &Map<String, Value>) -> Result<(), DomainError> {
        let per_person_total = match document.get("budget_breakdown") {
            Some(Value::Object(breakdown)) => match breakdown.get("per_person_total") {
                None | Some(Value::Null) => 0.0,
                Some(value) => parse_amount(value).ok_or_else(|| {
                    DomainError::MalformedResponse(format!(
                        "budget_breakdown.per_person_total is not an amount: {}",
                        value
                    ))
                })?,
            },
            Some(other) => {
                return Err(DomainError::MalformedResponse(format!(
                    "budget_breakdown must be an object, got {}",
                    json_type(other)
                )));
            }
            None => 0.0,
        };

        if per_person_total > self.min_budget {
            return Err(DomainError::BudgetExceeded {
                per_person_total,
                min_budget: self.min_budget,
            });
        }
        Ok(())
    }
}

/// Validate `raw_response` against `min_budget`
pub fn validate_plan(raw_response: &str, min_budget: f64) -> Result<Plan, DomainError> {
    PlanValidator::new(min_budget).validate(raw_response)
}

fn check_required_fields(document: &Map<String, Value>) -> Result<(), DomainError> {
    match REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| !document.contains_key(*field))
    {
        Some(missing) => Err(DomainError::MissingField(missing)),
        None => Ok(()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

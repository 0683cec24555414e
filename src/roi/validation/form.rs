use super::rules::validate_all_inputs;
use super::ValidationError;
use crate::roi::costs::{default_maintenance_percentage, CostEstimate};
use crate::roi::domain::{AdditionalBenefits, ProcessComplexity, ProcessProfile, RoiInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw, unvalidated process form as submitted by a client or read from CSV.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ProcessForm {
    fields: Map<String, Value>,
}

/// Validated form split into calculator input and descriptive data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSubmission {
    pub input: RoiInput,
    pub profile: ProcessProfile,
    pub benefits: AdditionalBenefits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<CostEstimate>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumericField {
    Missing,
    Invalid,
    Value(f64),
}

impl ProcessForm {
    pub fn new(fields: Map<String, Value>) -> Self {
        let mut form = Self { fields };
        // Older exports name the SLA benefit after a typo.
        if let Some(value) = form.fields.remove("sql_savings") {
            form.fields.entry("sla_savings").or_insert(value);
        }
        form
    }

    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            _ => Err(ValidationError::new(
                "form",
                "O formulário deve ser um objeto JSON",
            )),
        }
    }

    /// Builds a form from text cells; blank cells count as missing.
    pub fn from_text_fields(fields: HashMap<String, String>) -> Self {
        let fields = fields
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.trim().to_string(), Value::String(value)))
            .collect();
        Self::new(fields)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub(crate) fn is_absent(&self, key: &str) -> bool {
        self.number(key) == NumericField::Missing
    }

    pub(crate) fn number(&self, key: &str) -> NumericField {
        match self.fields.get(key) {
            None | Some(Value::Null) => NumericField::Missing,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) if value.is_finite() => NumericField::Value(value),
                _ => NumericField::Invalid,
            },
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return NumericField::Missing;
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => NumericField::Value(value),
                    _ => NumericField::Invalid,
                }
            }
            Some(_) => NumericField::Invalid,
        }
    }

    fn value(&self, key: &str) -> Option<f64> {
        match self.number(key) {
            NumericField::Value(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn has_cost_estimate(&self) -> bool {
        !self.is_absent("development_hours") && !self.is_absent("development_hourly_rate")
    }

    fn cost_estimate(&self) -> Option<CostEstimate> {
        Some(CostEstimate {
            development_hours: self.value("development_hours")?,
            development_hourly_rate: self.value("development_hourly_rate")?,
            maintenance_percentage: self
                .value("maintenance_percentage")
                .unwrap_or_else(default_maintenance_percentage),
            infra_license_cost: self.value("infra_license_cost").unwrap_or(0.0),
            other_costs: self.value("other_costs").unwrap_or(0.0),
        })
    }

    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_all_inputs(self)
    }

    /// Validates the form and converts it; explicit RPA costs take precedence
    /// over the ones derived from development figures.
    pub fn into_submission(self) -> Result<ProcessSubmission, Vec<ValidationError>> {
        self.validate()?;

        let cost_estimate = self.cost_estimate();
        let rpa_implementation_cost = self
            .value("rpa_implementation_cost")
            .or_else(|| cost_estimate.map(|estimate| estimate.implementation_cost()))
            .unwrap_or(0.0);
        let rpa_monthly_cost = self
            .value("rpa_monthly_cost")
            .or_else(|| cost_estimate.map(|estimate| estimate.monthly_cost()))
            .unwrap_or(0.0);

        let input = RoiInput {
            process_name: self
                .text("process_name")
                .map(|name| name.trim().to_string())
                .unwrap_or_default(),
            current_time_per_month: self.value("current_time_per_month").unwrap_or(0.0),
            people_involved: self.value("people_involved").unwrap_or(1.0) as u32,
            hourly_rate: self.value("hourly_rate").unwrap_or(0.0),
            rpa_implementation_cost,
            rpa_monthly_cost,
            expected_automation_percentage: self
                .value("expected_automation_percentage")
                .unwrap_or(0.0),
            exception_rate: self.value("exception_rate").unwrap_or(0.0),
        };

        let defaults = ProcessProfile::default();
        let profile = ProcessProfile {
            department: self
                .text("department")
                .map(|department| department.trim().to_string())
                .unwrap_or_default(),
            complexity: self
                .text("complexity")
                .and_then(ProcessComplexity::parse)
                .unwrap_or(defaults.complexity),
            systems_quantity: self
                .value("systems_quantity")
                .map(|value| value as u32)
                .unwrap_or(defaults.systems_quantity),
            daily_transactions: self
                .value("daily_transactions")
                .map(|value| value as u32)
                .unwrap_or(defaults.daily_transactions),
            error_rate: self.value("error_rate").unwrap_or(0.0),
        };

        let benefits = AdditionalBenefits {
            fines_avoided: self.value("fines_avoided").unwrap_or(0.0),
            sla_savings: self.value("sla_savings").unwrap_or(0.0),
        };

        Ok(ProcessSubmission {
            input,
            profile,
            benefits,
            cost_estimate,
        })
    }
}

impl From<Map<String, Value>> for ProcessForm {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl From<ProcessForm> for Map<String, Value> {
    fn from(form: ProcessForm) -> Self {
        form.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_valid_form_into_submission() {
        let form: ProcessForm = serde_json::from_value(json!({
            "process_name": "  Faturamento  ",
            "department": "Financeiro",
            "complexity": "Alta",
            "current_time_per_month": "160",
            "people_involved": 2,
            "hourly_rate": 50.0,
            "rpa_implementation_cost": 5000.0,
            "rpa_monthly_cost": 200.0,
            "expected_automation_percentage": 80,
            "exception_rate": 10,
            "sql_savings": 300.0,
        }))
        .unwrap();

        let submission = form.into_submission().expect("valid form");
        assert_eq!(submission.input.process_name, "Faturamento");
        assert_eq!(submission.input.current_time_per_month, 160.0);
        assert_eq!(submission.input.people_involved, 2);
        assert_eq!(submission.input.exception_rate, 10.0);
        assert_eq!(submission.profile.complexity, ProcessComplexity::High);
        assert_eq!(submission.profile.systems_quantity, 1);
        assert_eq!(submission.benefits.sla_savings, 300.0);
        assert!(submission.cost_estimate.is_none());
    }

    #[test]
    fn derives_costs_from_development_estimate() {
        let form = ProcessForm::from_value(json!({
            "process_name": "Cadastro de fornecedores",
            "current_time_per_month": 100,
            "people_involved": 1,
            "hourly_rate": 40,
            "expected_automation_percentage": 70,
            "development_hours": 160,
            "development_hourly_rate": 150,
            "maintenance_percentage": 12,
            "infra_license_cost": 500,
            "other_costs": 1000,
        }))
        .unwrap();

        let submission = form.into_submission().expect("valid form");
        assert_eq!(submission.input.rpa_implementation_cost, 25_000.0);
        assert!((submission.input.rpa_monthly_cost - 740.0).abs() < 1e-9);
        assert!(submission.cost_estimate.is_some());
    }

    #[test]
    fn deserialized_forms_validate_legacy_sla_key() {
        let form: ProcessForm = serde_json::from_value(json!({
            "process_name": "Faturamento",
            "current_time_per_month": 160,
            "people_involved": 1,
            "hourly_rate": 50,
            "rpa_implementation_cost": 5000,
            "rpa_monthly_cost": 200,
            "expected_automation_percentage": 80,
            "sql_savings": -300.0,
        }))
        .unwrap();

        assert!(form.is_absent("sql_savings"));
        let errors = form.into_submission().unwrap_err();
        assert!(errors.iter().any(|error| error.field == "sla_savings"));
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(ProcessForm::from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn text_fields_treat_blank_cells_as_missing() {
        let mut cells = HashMap::new();
        cells.insert("process_name".to_string(), "Folha".to_string());
        cells.insert("exception_rate".to_string(), "  ".to_string());
        let form = ProcessForm::from_text_fields(cells);

        assert!(form.is_absent("exception_rate"));
        assert_eq!(form.text("process_name"), Some("Folha"));
    }

    #[test]
    fn returns_every_error_when_invalid() {
        let form = ProcessForm::from_value(json!({ "process_name": "" })).unwrap();
        let errors = form.into_submission().unwrap_err();
        assert!(errors.len() > 1);
    }
}

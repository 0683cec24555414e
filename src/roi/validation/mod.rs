mod form;
mod rules;

pub use form::{ProcessForm, ProcessSubmission};
pub use rules::{
    validate_all_inputs, validate_cross_fields, validate_input, validate_integer_range,
    validate_percentage, validate_positive_number,
};

use serde::Serialize;
use thiserror::Error;

/// A single rejected form field, with a message suitable for end users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Display label used in messages; unknown keys are shown as-is.
pub(crate) fn field_label(field: &str) -> &str {
    match field {
        "process_name" => "Nome do processo",
        "department" => "Departamento",
        "current_time_per_month" => "Tempo atual por mês",
        "people_involved" => "Pessoas envolvidas",
        "hourly_rate" => "Taxa horária",
        "rpa_implementation_cost" => "Custo de implementação",
        "rpa_monthly_cost" => "Custo mensal RPA",
        "expected_automation_percentage" => "Percentual de automação",
        "error_rate" => "Taxa de erro",
        "exception_rate" => "Taxa de exceção",
        "complexity" => "Complexidade",
        "systems_quantity" => "Quantidade de sistemas",
        "daily_transactions" => "Transações diárias",
        "development_hours" => "Horas de desenvolvimento",
        "development_hourly_rate" => "Valor hora de desenvolvimento",
        "maintenance_percentage" => "Percentual de manutenção",
        "infra_license_cost" => "Custo de infra e licenças",
        "other_costs" => "Outros custos",
        "fines_avoided" => "Multas evitadas",
        "sla_savings" => "SLA reduzida",
        other => other,
    }
}

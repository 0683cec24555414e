use super::form::{NumericField, ProcessForm};
use super::{field_label, ValidationError};
use crate::roi::domain::ProcessComplexity;
use serde_json::Value;

const MAX_PEOPLE_INVOLVED: i64 = 10_000;
const MAX_SYSTEMS_QUANTITY: i64 = 50;
const MAX_DAILY_TRANSACTIONS: i64 = 10_000;

#[derive(Debug, Clone, Copy)]
enum Rule {
    NonNegative,
    Percentage,
    IntegerRange(i64, i64),
}

const CORE_FIELDS: [(&str, Rule); 4] = [
    ("current_time_per_month", Rule::NonNegative),
    ("people_involved", Rule::IntegerRange(1, MAX_PEOPLE_INVOLVED)),
    ("hourly_rate", Rule::NonNegative),
    ("expected_automation_percentage", Rule::Percentage),
];

const COST_FIELDS: [(&str, Rule); 2] = [
    ("rpa_implementation_cost", Rule::NonNegative),
    ("rpa_monthly_cost", Rule::NonNegative),
];

const OPTIONAL_FIELDS: [(&str, Rule); 11] = [
    ("error_rate", Rule::Percentage),
    ("exception_rate", Rule::Percentage),
    ("systems_quantity", Rule::IntegerRange(1, MAX_SYSTEMS_QUANTITY)),
    ("daily_transactions", Rule::IntegerRange(1, MAX_DAILY_TRANSACTIONS)),
    ("development_hours", Rule::NonNegative),
    ("development_hourly_rate", Rule::NonNegative),
    ("maintenance_percentage", Rule::Percentage),
    ("infra_license_cost", Rule::NonNegative),
    ("other_costs", Rule::NonNegative),
    ("fines_avoided", Rule::NonNegative),
    ("sla_savings", Rule::NonNegative),
];

pub fn validate_percentage(
    value: f64,
    field: &str,
    allow_zero: bool,
) -> Result<(), ValidationError> {
    let label = field_label(field);

    if value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{label} não pode ser negativo"),
        ));
    }
    if !allow_zero && value == 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{label} deve ser maior que zero"),
        ));
    }
    if value > 100.0 {
        return Err(ValidationError::new(
            field,
            format!("{label} não pode exceder 100%"),
        ));
    }

    Ok(())
}

pub fn validate_positive_number(
    value: f64,
    field: &str,
    allow_zero: bool,
) -> Result<(), ValidationError> {
    let label = field_label(field);

    if value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{label} não pode ser negativo"),
        ));
    }
    if !allow_zero && value == 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{label} deve ser maior que zero"),
        ));
    }

    Ok(())
}

pub fn validate_integer_range(
    value: i64,
    field: &str,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("{} deve estar entre {min} e {max}", field_label(field)),
        ));
    }

    Ok(())
}

/// Rules spanning several fields: error and exception rates together cannot
/// exceed the whole process, and the automated share cannot reach into the
/// share that falls into exceptions.
pub fn validate_cross_fields(
    error_rate: f64,
    exception_rate: f64,
    expected_automation_percentage: f64,
) -> Result<(), ValidationError> {
    if error_rate + exception_rate > 100.0 {
        return Err(ValidationError::new(
            "error_rate",
            "A soma da taxa de erro e da taxa de exceção não pode exceder 100%",
        ));
    }

    let automation_limit = 100.0 - exception_rate;
    if expected_automation_percentage > automation_limit {
        return Err(ValidationError::new(
            "expected_automation_percentage",
            format!(
                "Percentual de automação ({expected_automation_percentage}%) não pode exceder \
                 {automation_limit}% com taxa de exceção de {exception_rate}%"
            ),
        ));
    }

    Ok(())
}

/// Collects every problem in the form instead of stopping at the first one.
pub fn validate_all_inputs(form: &ProcessForm) -> Result<(), Vec<ValidationError>> {
    let errors = collect_errors(form);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// First-error variant of [`validate_all_inputs`].
pub fn validate_input(form: &ProcessForm) -> Result<(), ValidationError> {
    match collect_errors(form).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn collect_errors(form: &ProcessForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match form.text("process_name") {
        None => errors.push(missing("process_name")),
        Some(name) if name.trim().is_empty() => errors.push(ValidationError::new(
            "process_name",
            "Nome do processo não pode estar vazio",
        )),
        Some(_) => {}
    }

    let mut valid_automation = None;
    for (field, rule) in CORE_FIELDS {
        let value = check_field(form, field, rule, true, &mut errors);
        if field == "expected_automation_percentage" {
            valid_automation = value;
        }
    }

    // Development figures stand in for explicit RPA costs.
    let costs_required = !form.has_cost_estimate();
    for (field, rule) in COST_FIELDS {
        check_field(form, field, rule, costs_required, &mut errors);
    }

    let mut valid_error_rate = None;
    let mut valid_exception_rate = None;
    for (field, rule) in OPTIONAL_FIELDS {
        let value = check_field(form, field, rule, false, &mut errors);
        match field {
            "error_rate" => valid_error_rate = value,
            "exception_rate" => valid_exception_rate = value,
            _ => {}
        }
    }
    if form.is_absent("error_rate") {
        valid_error_rate = Some(0.0);
    }
    if form.is_absent("exception_rate") {
        valid_exception_rate = Some(0.0);
    }

    let complexity_valid = match form.raw("complexity") {
        None | Some(Value::Null) => true,
        Some(Value::String(raw)) => {
            raw.trim().is_empty() || ProcessComplexity::parse(raw).is_some()
        }
        Some(_) => false,
    };
    if !complexity_valid {
        errors.push(ValidationError::new(
            "complexity",
            "Complexidade deve ser Baixa, Média ou Alta",
        ));
    }

    if let (Some(error_rate), Some(exception_rate), Some(automation)) =
        (valid_error_rate, valid_exception_rate, valid_automation)
    {
        if let Err(error) = validate_cross_fields(error_rate, exception_rate, automation) {
            errors.push(error);
        }
    }

    errors
}

/// Validates one numeric field and returns its value when it passes.
fn check_field(
    form: &ProcessForm,
    field: &str,
    rule: Rule,
    required: bool,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    let value = match form.number(field) {
        NumericField::Missing => {
            if required {
                errors.push(missing(field));
            }
            return None;
        }
        NumericField::Invalid => {
            errors.push(ValidationError::new(
                field,
                format!("{} deve ser um número", field_label(field)),
            ));
            return None;
        }
        NumericField::Value(value) => value,
    };

    let outcome = match rule {
        Rule::NonNegative => validate_positive_number(value, field, true),
        Rule::Percentage => validate_percentage(value, field, true),
        Rule::IntegerRange(min, max) => {
            if value.fract() != 0.0 {
                Err(ValidationError::new(
                    field,
                    format!("{} deve ser um número inteiro", field_label(field)),
                ))
            } else {
                validate_integer_range(value as i64, field, min, max)
            }
        }
    };

    match outcome {
        Ok(()) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::new(
        field,
        format!("Campo obrigatório faltando: {}", field_label(field)),
    )
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizons, in months, reported by the extended ROI breakdown.
pub const ROI_HORIZONS: [u32; 3] = [12, 24, 60];

/// Raw process and cost parameters for a single ROI calculation.
///
/// `current_time_per_month` is the aggregate effort across everyone involved,
/// so `people_involved` never enters the cost formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInput {
    pub process_name: String,
    pub current_time_per_month: f64,
    pub people_involved: u32,
    pub hourly_rate: f64,
    pub rpa_implementation_cost: f64,
    pub rpa_monthly_cost: f64,
    pub expected_automation_percentage: f64,
    #[serde(default)]
    pub exception_rate: f64,
}

/// Split of the current effort into mutually exclusive automation categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutomationMetrics {
    pub fully_automated_pct: f64,
    pub partial_review_pct: f64,
    pub still_manual_pct: f64,
    pub total_manual_effort_pct: f64,
}

/// Financial outcome of a base calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub monthly_savings: f64,
    pub annual_savings: f64,
    #[serde(with = "unbounded_months")]
    pub payback_period_months: f64,
    pub roi_first_year: f64,
    pub roi_percentage_first_year: f64,
    pub automation_capacity: f64,
}

/// Cumulative return after a fixed number of months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonRoi {
    pub months: u32,
    pub total_savings: f64,
    pub roi_value: f64,
    pub roi_percentage: f64,
}

/// Base result enriched with flat monthly benefit streams and multi-year horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtendedRoi {
    pub total_monthly_savings: f64,
    pub total_annual_savings: f64,
    #[serde(with = "unbounded_months")]
    pub payback_period_months: f64,
    pub horizons: [HorizonRoi; 3],
}

impl ExtendedRoi {
    pub fn first_year(&self) -> &HorizonRoi {
        &self.horizons[0]
    }

    pub fn horizon(&self, months: u32) -> Option<&HorizonRoi> {
        self.horizons.iter().find(|horizon| horizon.months == months)
    }
}

/// Priority tier assigned from ROI percentage and payback period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessClassification {
    #[serde(rename = "QUICK WIN")]
    QuickWin,
    #[serde(rename = "MÉDIO PRAZO")]
    MediumTerm,
    #[serde(rename = "BAIXA PRIORIDADE")]
    LowPriority,
}

impl ProcessClassification {
    pub const fn ordered() -> [Self; 3] {
        [Self::QuickWin, Self::MediumTerm, Self::LowPriority]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::QuickWin => "QUICK WIN",
            Self::MediumTerm => "MÉDIO PRAZO",
            Self::LowPriority => "BAIXA PRIORIDADE",
        }
    }
}

impl fmt::Display for ProcessClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessComplexity {
    #[serde(rename = "Baixa", alias = "baixa", alias = "low")]
    Low,
    #[default]
    #[serde(rename = "Média", alias = "media", alias = "média", alias = "medium")]
    Medium,
    #[serde(rename = "Alta", alias = "alta", alias = "high")]
    High,
}

impl ProcessComplexity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
        }
    }

    /// Suggested automation share for a process of this complexity.
    pub const fn default_automation_percentage(self) -> f64 {
        match self {
            Self::Low => 85.0,
            Self::Medium => 70.0,
            Self::High => 50.0,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "baixa" | "low" => Some(Self::Low),
            "média" | "media" | "medium" => Some(Self::Medium),
            "alta" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Descriptive attributes captured alongside the calculation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessProfile {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub complexity: ProcessComplexity,
    #[serde(default = "default_systems_quantity")]
    pub systems_quantity: u32,
    #[serde(default = "default_daily_transactions")]
    pub daily_transactions: u32,
    #[serde(default)]
    pub error_rate: f64,
}

impl Default for ProcessProfile {
    fn default() -> Self {
        Self {
            department: String::new(),
            complexity: ProcessComplexity::Medium,
            systems_quantity: default_systems_quantity(),
            daily_transactions: default_daily_transactions(),
            error_rate: 0.0,
        }
    }
}

fn default_systems_quantity() -> u32 {
    1
}

fn default_daily_transactions() -> u32 {
    100
}

/// Monthly benefits that do not come from labor savings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalBenefits {
    #[serde(default)]
    pub fines_avoided: f64,
    #[serde(default, alias = "sql_savings")]
    pub sla_savings: f64,
}

impl AdditionalBenefits {
    pub fn monthly_total(&self) -> f64 {
        self.fines_avoided + self.sla_savings
    }
}

/// Denormalized calculation row handed to whoever persists or renders it.
///
/// The headline figures (`roi_percentage_first_year`, `payback_period_months`,
/// `annual_savings`) come from the extended breakdown so additional benefits
/// are reflected, which equals the base result when no benefits are declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub input: RoiInput,
    #[serde(default)]
    pub profile: ProcessProfile,
    #[serde(default)]
    pub benefits: AdditionalBenefits,
    pub metrics: AutomationMetrics,
    pub result: RoiResult,
    pub extended: ExtendedRoi,
    pub classification: ProcessClassification,
    pub calculated_at: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn process_name(&self) -> &str {
        &self.input.process_name
    }

    pub fn roi_percentage_first_year(&self) -> f64 {
        self.extended.first_year().roi_percentage
    }

    pub fn roi_first_year(&self) -> f64 {
        self.extended.first_year().roi_value
    }

    pub fn payback_period_months(&self) -> f64 {
        self.extended.payback_period_months
    }

    pub fn pays_back(&self) -> bool {
        self.payback_period_months().is_finite()
    }

    pub fn monthly_savings(&self) -> f64 {
        self.extended.total_monthly_savings
    }

    pub fn annual_savings(&self) -> f64 {
        self.extended.total_annual_savings
    }

    pub fn implementation_cost(&self) -> f64 {
        self.input.rpa_implementation_cost
    }

    pub fn automation_percentage(&self) -> f64 {
        self.input.expected_automation_percentage
    }
}

/// JSON has no infinity, so an unbounded payback travels as `null`.
mod unbounded_months {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.unwrap_or(f64::INFINITY))
    }
}

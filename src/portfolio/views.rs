use crate::roi::{CalculationRecord, ProcessClassification};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub total_processes: usize,
    pub total_savings: f64,
    pub total_investment: f64,
    pub avg_roi: f64,
    pub avg_payback: f64,
    pub median_roi: f64,
    pub median_payback: f64,
    pub min_payback: f64,
    pub max_payback: f64,
    pub min_roi: f64,
    pub max_roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationCount {
    pub classification: ProcessClassification,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutomationPotentialView {
    pub highly_automatable: Vec<String>,
    pub partially_automatable: Vec<String>,
    pub complex: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProcessView {
    pub rank: usize,
    pub process_name: String,
    pub classification: ProcessClassification,
    pub roi_percentage_first_year: f64,
    /// `None` when the process never pays back.
    pub payback_period_months: Option<f64>,
    pub annual_savings: f64,
    pub implementation_cost: f64,
}

impl RankedProcessView {
    pub(crate) fn from_ranked(records: Vec<&CalculationRecord>) -> Vec<Self> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self {
                rank: index + 1,
                process_name: record.process_name().to_string(),
                classification: record.classification,
                roi_percentage_first_year: record.roi_percentage_first_year(),
                payback_period_months: record
                    .pays_back()
                    .then(|| record.payback_period_months()),
                annual_savings: record.annual_savings(),
                implementation_cost: record.implementation_cost(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRankings {
    pub by_roi: Vec<RankedProcessView>,
    pub by_payback: Vec<RankedProcessView>,
    pub by_annual_savings: Vec<RankedProcessView>,
}

/// Everything a dashboard needs to render a set of saved calculations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub aggregate: AggregateMetrics,
    pub classifications: Vec<ClassificationCount>,
    pub payback_distribution: Vec<DistributionBucket>,
    pub roi_distribution: Vec<DistributionBucket>,
    pub automation_potential: AutomationPotentialView,
    pub rankings: PortfolioRankings,
}

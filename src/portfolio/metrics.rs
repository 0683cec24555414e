use super::views::{
    AggregateMetrics, AutomationPotentialView, ClassificationCount, DistributionBucket,
};
use crate::roi::{CalculationRecord, ProcessClassification};

const HIGHLY_AUTOMATABLE_MIN: f64 = 70.0;
const PARTIALLY_AUTOMATABLE_MIN: f64 = 30.0;

/// Processes grouped by how much of their work is targeted for automation.
#[derive(Debug, Clone, Default)]
pub struct AutomationPotential<'a> {
    pub highly_automatable: Vec<&'a CalculationRecord>,
    pub partially_automatable: Vec<&'a CalculationRecord>,
    pub complex: Vec<&'a CalculationRecord>,
}

impl AutomationPotential<'_> {
    pub fn to_view(&self) -> AutomationPotentialView {
        let names = |records: &[&CalculationRecord]| -> Vec<String> {
            records
                .iter()
                .map(|record| record.process_name().to_string())
                .collect()
        };

        AutomationPotentialView {
            highly_automatable: names(&self.highly_automatable),
            partially_automatable: names(&self.partially_automatable),
            complex: names(&self.complex),
        }
    }
}

/// Portfolio-wide totals and spreads. An empty portfolio yields all zeros.
///
/// Infinite paybacks are kept, so the mean and maximum payback become
/// infinite as soon as one process never pays back.
pub fn aggregate_metrics(records: &[CalculationRecord]) -> AggregateMetrics {
    if records.is_empty() {
        return AggregateMetrics::default();
    }

    let count = records.len();
    let mut rois: Vec<f64> = records
        .iter()
        .map(CalculationRecord::roi_percentage_first_year)
        .collect();
    let mut paybacks: Vec<f64> = records
        .iter()
        .map(CalculationRecord::payback_period_months)
        .collect();
    rois.sort_by(f64::total_cmp);
    paybacks.sort_by(f64::total_cmp);

    AggregateMetrics {
        total_processes: count,
        total_savings: records.iter().map(CalculationRecord::annual_savings).sum(),
        total_investment: records
            .iter()
            .map(CalculationRecord::implementation_cost)
            .sum(),
        avg_roi: rois.iter().sum::<f64>() / count as f64,
        avg_payback: paybacks.iter().sum::<f64>() / count as f64,
        median_roi: rois[count / 2],
        median_payback: paybacks[count / 2],
        min_payback: paybacks[0],
        max_payback: paybacks[count - 1],
        min_roi: rois[0],
        max_roi: rois[count - 1],
    }
}

pub fn classify_by_automation_potential(
    records: &[CalculationRecord],
) -> AutomationPotential<'_> {
    let mut potential = AutomationPotential::default();

    for record in records {
        let automation = record.automation_percentage();
        if automation >= HIGHLY_AUTOMATABLE_MIN {
            potential.highly_automatable.push(record);
        } else if automation >= PARTIALLY_AUTOMATABLE_MIN {
            potential.partially_automatable.push(record);
        } else {
            potential.complex.push(record);
        }
    }

    potential
}

pub fn payback_distribution(records: &[CalculationRecord]) -> Vec<DistributionBucket> {
    let paybacks: Vec<f64> = records
        .iter()
        .map(CalculationRecord::payback_period_months)
        .collect();
    let total = records.len();

    vec![
        bucket(
            "fast",
            "Rápido (< 6 meses)",
            paybacks.iter().filter(|&&months| months < 6.0).count(),
            total,
        ),
        bucket(
            "medium",
            "Médio (6-12 meses)",
            paybacks
                .iter()
                .filter(|&&months| (6.0..=12.0).contains(&months))
                .count(),
            total,
        ),
        bucket(
            "long",
            "Longo (> 12 meses)",
            paybacks.iter().filter(|&&months| months > 12.0).count(),
            total,
        ),
    ]
}

pub fn roi_distribution(records: &[CalculationRecord]) -> Vec<DistributionBucket> {
    let rois: Vec<f64> = records
        .iter()
        .map(CalculationRecord::roi_percentage_first_year)
        .collect();
    let total = records.len();
    let count_in = |low: f64, high: f64| {
        rois.iter()
            .filter(|&&roi| (low..high).contains(&roi))
            .count()
    };

    vec![
        bucket(
            "excellent",
            "Excelente (≥ 500%)",
            rois.iter().filter(|&&roi| roi >= 500.0).count(),
            total,
        ),
        bucket(
            "very_good",
            "Muito Bom (200-500%)",
            count_in(200.0, 500.0),
            total,
        ),
        bucket("good", "Bom (50-200%)", count_in(50.0, 200.0), total),
        bucket(
            "acceptable",
            "Aceitável (< 50%)",
            rois.iter().filter(|&&roi| roi < 50.0).count(),
            total,
        ),
    ]
}

pub fn classification_summary(records: &[CalculationRecord]) -> Vec<ClassificationCount> {
    ProcessClassification::ordered()
        .into_iter()
        .map(|classification| ClassificationCount {
            classification,
            count: records
                .iter()
                .filter(|record| record.classification == classification)
                .count(),
        })
        .collect()
}

fn bucket(
    key: &'static str,
    label: &'static str,
    count: usize,
    total: usize,
) -> DistributionBucket {
    let percentage = if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    DistributionBucket {
        key,
        label,
        count,
        percentage,
    }
}

use crate::roi::CalculationRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_TOP: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    Roi,
    Payback,
    Savings,
    Investment,
}

impl RankingMetric {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Roi => "ROI 1º ano",
            Self::Payback => "Payback",
            Self::Savings => "Economia anual",
            Self::Investment => "Investimento",
        }
    }

    /// Unknown names rank by ROI.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "payback" => Self::Payback,
            "savings" => Self::Savings,
            "investment" => Self::Investment,
            _ => Self::Roi,
        }
    }
}

/// Highest first-year ROI first.
pub fn rank_by_roi(records: &[CalculationRecord], top: usize) -> Vec<&CalculationRecord> {
    top_by_metric(records, RankingMetric::Roi, top)
}

/// Shortest payback first; processes that never pay back come last.
pub fn rank_by_payback(records: &[CalculationRecord], top: usize) -> Vec<&CalculationRecord> {
    top_by_metric(records, RankingMetric::Payback, top)
}

/// Largest annual savings first.
pub fn rank_by_annual_savings(
    records: &[CalculationRecord],
    top: usize,
) -> Vec<&CalculationRecord> {
    top_by_metric(records, RankingMetric::Savings, top)
}

/// Stable ordering by the chosen metric, truncated to `top` entries.
pub fn top_by_metric(
    records: &[CalculationRecord],
    metric: RankingMetric,
    top: usize,
) -> Vec<&CalculationRecord> {
    let mut ranked: Vec<&CalculationRecord> = records.iter().collect();
    ranked.sort_by(|a, b| compare(metric, a, b));
    ranked.truncate(top);
    ranked
}

fn compare(metric: RankingMetric, a: &CalculationRecord, b: &CalculationRecord) -> Ordering {
    match metric {
        RankingMetric::Roi => descending(
            a.roi_percentage_first_year(),
            b.roi_percentage_first_year(),
        ),
        RankingMetric::Payback => ascending(a.payback_period_months(), b.payback_period_months()),
        RankingMetric::Savings => descending(a.annual_savings(), b.annual_savings()),
        RankingMetric::Investment => descending(a.implementation_cost(), b.implementation_cost()),
    }
}

// NaN always sorts last.
fn ascending(a: f64, b: f64) -> Ordering {
    let key = |value: f64| if value.is_nan() { f64::INFINITY } else { value };
    key(a).total_cmp(&key(b))
}

fn descending(a: f64, b: f64) -> Ordering {
    let key = |value: f64| if value.is_nan() { f64::NEG_INFINITY } else { value };
    key(b).total_cmp(&key(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::test_support::record;

    fn names<'a>(records: &[&'a CalculationRecord]) -> Vec<&'a str> {
        records.iter().map(|record| record.process_name()).collect()
    }

    #[test]
    fn ranks_by_roi_descending() {
        let records = vec![
            record("Low ROI", 100.0, 10.0, 1_000.0),
            record("High ROI", 500.0, 2.0, 5_000.0),
            record("Medium ROI", 250.0, 4.0, 3_000.0),
        ];

        let ranked = rank_by_roi(&records, DEFAULT_TOP);
        assert_eq!(names(&ranked), ["High ROI", "Medium ROI", "Low ROI"]);
    }

    #[test]
    fn truncates_to_top_n() {
        let records: Vec<_> = (1..=5)
            .map(|index| record(&format!("P{index}"), index as f64 * 100.0, 6.0, 100.0))
            .collect();

        let ranked = rank_by_roi(&records, 3);
        let rois: Vec<f64> = ranked
            .iter()
            .map(|record| record.roi_percentage_first_year())
            .collect();
        assert_eq!(rois, [500.0, 400.0, 300.0]);
        assert!(rank_by_roi(&[], 3).is_empty());
    }

    #[test]
    fn ranks_payback_ascending_with_infinity_last() {
        let records = vec![
            record("Never", 10.0, f64::INFINITY, 0.0),
            record("Long Payback", 10.0, 20.0, 0.0),
            record("Short Payback", 10.0, 1.0, 0.0),
            record("Medium Payback", 10.0, 8.0, 0.0),
        ];

        let ranked = rank_by_payback(&records, DEFAULT_TOP);
        assert_eq!(
            names(&ranked),
            ["Short Payback", "Medium Payback", "Long Payback", "Never"]
        );

        let two = rank_by_payback(&records, 2);
        assert_eq!(two[0].payback_period_months(), 1.0);
        assert_eq!(two[1].payback_period_months(), 8.0);
    }

    #[test]
    fn ranks_savings_and_investment_descending() {
        let records = vec![
            record("Medium Savings", 10.0, 5.0, 5_000.0),
            record("High Savings", 10.0, 5.0, 9_000.0),
            record("Low Savings", 10.0, 5.0, 1_000.0),
        ];

        let ranked = rank_by_annual_savings(&records, DEFAULT_TOP);
        assert_eq!(
            names(&ranked),
            ["High Savings", "Medium Savings", "Low Savings"]
        );

        let by_investment = top_by_metric(&records, RankingMetric::Investment, 1);
        assert_eq!(by_investment.len(), 1);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let records = vec![
            record("First", 100.0, 5.0, 10.0),
            record("Second", 100.0, 5.0, 10.0),
        ];
        let ranked = rank_by_roi(&records, DEFAULT_TOP);
        assert_eq!(names(&ranked), ["First", "Second"]);
    }

    #[test]
    fn parses_metric_names() {
        assert_eq!(RankingMetric::parse("Payback"), RankingMetric::Payback);
        assert_eq!(RankingMetric::parse("savings"), RankingMetric::Savings);
        assert_eq!(RankingMetric::parse("whatever"), RankingMetric::Roi);
    }
}

mod metrics;
mod ranking;
pub mod views;

pub use metrics::{
    aggregate_metrics, classification_summary, classify_by_automation_potential,
    payback_distribution, roi_distribution, AutomationPotential,
};
pub use ranking::{
    rank_by_annual_savings, rank_by_payback, rank_by_roi, top_by_metric, RankingMetric,
    DEFAULT_TOP,
};
pub use views::{
    AggregateMetrics, AutomationPotentialView, ClassificationCount, DistributionBucket,
    PortfolioRankings, PortfolioSummary, RankedProcessView,
};

use crate::roi::CalculationRecord;

impl PortfolioSummary {
    /// Builds every dashboard section over the same record set.
    pub fn build(records: &[CalculationRecord], top: usize) -> Self {
        Self {
            aggregate: aggregate_metrics(records),
            classifications: classification_summary(records),
            payback_distribution: payback_distribution(records),
            roi_distribution: roi_distribution(records),
            automation_potential: classify_by_automation_potential(records).to_view(),
            rankings: PortfolioRankings {
                by_roi: RankedProcessView::from_ranked(rank_by_roi(records, top)),
                by_payback: RankedProcessView::from_ranked(rank_by_payback(records, top)),
                by_annual_savings: RankedProcessView::from_ranked(rank_by_annual_savings(
                    records, top,
                )),
            },
        }
    }
}

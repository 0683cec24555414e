use super::domain::ProcessClassification;
use serde::{Deserialize, Serialize};

/// Boundary table for the priority tiers. Every boundary is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    pub quick_win_min_roi: f64,
    pub quick_win_max_payback: f64,
    pub medium_term_min_roi: f64,
    pub medium_term_max_payback: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            quick_win_min_roi: 50.0,
            quick_win_max_payback: 12.0,
            medium_term_min_roi: 0.0,
            medium_term_max_payback: 24.0,
        }
    }
}

impl ClassificationThresholds {
    /// Ordered decision list; the first matching tier wins.
    pub fn classify(&self, roi_percentage: f64, payback_months: f64) -> ProcessClassification {
        if roi_percentage > self.quick_win_min_roi && payback_months < self.quick_win_max_payback
        {
            return ProcessClassification::QuickWin;
        }

        if roi_percentage > self.medium_term_min_roi
            && payback_months < self.medium_term_max_payback
        {
            return ProcessClassification::MediumTerm;
        }

        ProcessClassification::LowPriority
    }
}

/// Classifies against the default boundary table.
pub fn classify(roi_percentage: f64, payback_months: f64) -> ProcessClassification {
    ClassificationThresholds::default().classify(roi_percentage, payback_months)
}

use super::domain::AutomationMetrics;

/// Decomposes the targeted automation share into fully automated work,
/// automated work that still goes through manual review, and work that is
/// never automated.
///
/// `exception_rate` applies to the automated portion only, so with nothing
/// automated there is nothing left to review.
pub fn resolve(expected_automation_percentage: f64, exception_rate: f64) -> AutomationMetrics {
    let exception_ratio = exception_rate / 100.0;

    let fully_automated_pct = expected_automation_percentage * (1.0 - exception_ratio);
    let partial_review_pct = expected_automation_percentage * exception_ratio;
    let still_manual_pct = 100.0 - expected_automation_percentage;

    AutomationMetrics {
        fully_automated_pct,
        partial_review_pct,
        still_manual_pct,
        total_manual_effort_pct: partial_review_pct + still_manual_pct,
    }
}

impl AutomationMetrics {
    pub fn manual_effort_ratio(&self) -> f64 {
        self.total_manual_effort_pct / 100.0
    }

    pub fn fully_automated_ratio(&self) -> f64 {
        self.fully_automated_pct / 100.0
    }
}

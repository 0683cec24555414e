use super::automation::resolve;
use super::classification::ClassificationThresholds;
use super::domain::{
    AdditionalBenefits, CalculationRecord, ExtendedRoi, HorizonRoi, ProcessProfile, RoiInput,
    RoiResult, ROI_HORIZONS,
};
use chrono::{DateTime, Utc};
use tracing::debug;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Stateless calculator; the boundary table is only used when building records.
#[derive(Debug, Clone, Default)]
pub struct RoiCalculator {
    thresholds: ClassificationThresholds,
}

impl RoiCalculator {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassificationThresholds {
        &self.thresholds
    }

    /// Computes savings, payback and first-year ROI for pre-validated input.
    ///
    /// Non-positive monthly savings give an infinite payback, and a zero
    /// implementation cost gives a 0% ROI instead of dividing by zero.
    pub fn calculate(&self, input: &RoiInput) -> RoiResult {
        let current_monthly_cost = input.current_time_per_month * input.hourly_rate;
        let metrics = resolve(input.expected_automation_percentage, input.exception_rate);

        let automated_cost = current_monthly_cost * metrics.manual_effort_ratio();
        let gross_monthly_savings = current_monthly_cost - automated_cost;
        let monthly_savings = gross_monthly_savings - input.rpa_monthly_cost;
        let annual_savings = monthly_savings * MONTHS_PER_YEAR;

        let payback_period_months = payback_months(input.rpa_implementation_cost, monthly_savings);
        let roi_first_year = annual_savings - input.rpa_implementation_cost;
        let roi_percentage_first_year =
            roi_percentage(roi_first_year, input.rpa_implementation_cost);

        let automation_capacity = input.current_time_per_month * metrics.fully_automated_ratio();

        debug!(
            process = %input.process_name,
            monthly_savings,
            payback_period_months,
            "calculated process roi"
        );

        RoiResult {
            monthly_savings,
            annual_savings,
            payback_period_months,
            roi_first_year,
            roi_percentage_first_year,
            automation_capacity,
        }
    }

    /// Applies [`RoiCalculator::calculate`] to each input, preserving order.
    pub fn calculate_multiple(&self, inputs: &[RoiInput]) -> Vec<RoiResult> {
        inputs.iter().map(|input| self.calculate(input)).collect()
    }

    /// Adds flat monthly benefits to the base savings and projects the return
    /// over each horizon in [`ROI_HORIZONS`].
    pub fn calculate_extended_roi(
        &self,
        base: &RoiResult,
        implementation_cost: f64,
        fines_avoided: f64,
        sla_savings: f64,
    ) -> ExtendedRoi {
        let total_monthly_savings = base.monthly_savings + fines_avoided + sla_savings;

        let horizons = ROI_HORIZONS.map(|months| {
            let total_savings = total_monthly_savings * f64::from(months);
            let roi_value = total_savings - implementation_cost;
            HorizonRoi {
                months,
                total_savings,
                roi_value,
                roi_percentage: roi_percentage(roi_value, implementation_cost),
            }
        });

        ExtendedRoi {
            total_monthly_savings,
            total_annual_savings: total_monthly_savings * MONTHS_PER_YEAR,
            payback_period_months: payback_months(implementation_cost, total_monthly_savings),
            horizons,
        }
    }

    /// Runs the full pipeline for one process and classifies the outcome.
    pub fn evaluate(
        &self,
        input: RoiInput,
        profile: ProcessProfile,
        benefits: AdditionalBenefits,
        calculated_at: DateTime<Utc>,
    ) -> CalculationRecord {
        let metrics = resolve(input.expected_automation_percentage, input.exception_rate);
        let result = self.calculate(&input);
        let extended = self.calculate_extended_roi(
            &result,
            input.rpa_implementation_cost,
            benefits.fines_avoided,
            benefits.sla_savings,
        );
        let classification = self.thresholds.classify(
            extended.first_year().roi_percentage,
            extended.payback_period_months,
        );

        CalculationRecord {
            input,
            profile,
            benefits,
            metrics,
            result,
            extended,
            classification,
            calculated_at,
        }
    }
}

fn payback_months(implementation_cost: f64, monthly_savings: f64) -> f64 {
    if monthly_savings > 0.0 {
        implementation_cost / monthly_savings
    } else {
        f64::INFINITY
    }
}

fn roi_percentage(roi_value: f64, implementation_cost: f64) -> f64 {
    if implementation_cost > 0.0 {
        roi_value / implementation_cost * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::domain::ProcessClassification;
    use proptest::prelude::*;

    fn input(automation: f64, exception_rate: f64) -> RoiInput {
        RoiInput {
            process_name: "Conciliação bancária".to_string(),
            current_time_per_month: 100.0,
            people_involved: 1,
            hourly_rate: 100.0,
            rpa_implementation_cost: 10_000.0,
            rpa_monthly_cost: 500.0,
            expected_automation_percentage: automation,
            exception_rate,
        }
    }

    #[test]
    fn full_automation_saves_all_labor_minus_running_cost() {
        let result = RoiCalculator::default().calculate(&input(100.0, 0.0));

        assert_eq!(result.monthly_savings, 9_500.0);
        assert_eq!(result.annual_savings, 114_000.0);
        assert!((result.payback_period_months - 1.0526).abs() < 1e-4);
        assert_eq!(result.roi_first_year, 104_000.0);
        assert!((result.roi_percentage_first_year - 1_040.0).abs() < 1e-9);
        assert_eq!(result.automation_capacity, 100.0);
    }

    #[test]
    fn partial_automation_keeps_residual_labor_cost() {
        let result = RoiCalculator::default().calculate(&input(50.0, 0.0));
        assert_eq!(result.monthly_savings, 4_500.0);
        assert_eq!(result.automation_capacity, 50.0);
    }

    #[test]
    fn reviewed_work_counts_as_manual_effort() {
        let result = RoiCalculator::default().calculate(&input(80.0, 20.0));

        // gross 6400 minus the 500 running cost
        assert!((result.monthly_savings - 5_900.0).abs() < 1e-9);
        assert!((result.automation_capacity - 64.0).abs() < 1e-9);
    }

    #[test]
    fn people_involved_does_not_scale_cost() {
        let calculator = RoiCalculator::default();
        let single = calculator.calculate(&input(80.0, 10.0));
        let team = calculator.calculate(&RoiInput {
            people_involved: 5,
            ..input(80.0, 10.0)
        });
        assert_eq!(single, team);
    }

    #[test]
    fn payback_is_infinite_without_positive_savings() {
        let no_savings = RoiInput {
            current_time_per_month: 10.0,
            hourly_rate: 0.0,
            rpa_implementation_cost: 5_000.0,
            rpa_monthly_cost: 0.0,
            expected_automation_percentage: 0.0,
            ..input(0.0, 0.0)
        };
        let result = RoiCalculator::default().calculate(&no_savings);
        assert_eq!(result.monthly_savings, 0.0);
        assert!(result.payback_period_months.is_infinite());

        let losing = RoiCalculator::default().calculate(&input(1.0, 0.0));
        assert!(losing.monthly_savings < 0.0);
        assert_eq!(losing.payback_period_months, f64::INFINITY);
        assert!(losing.roi_percentage_first_year < 0.0);
    }

    #[test]
    fn zero_implementation_cost_reports_zero_roi_percentage() {
        let free = RoiInput {
            rpa_implementation_cost: 0.0,
            ..input(100.0, 0.0)
        };
        let result = RoiCalculator::default().calculate(&free);
        assert_eq!(result.roi_percentage_first_year, 0.0);
        assert_eq!(result.payback_period_months, 0.0);
        assert_eq!(result.roi_first_year, 114_000.0);
    }

    #[test]
    fn calculate_multiple_preserves_order() {
        let calculator = RoiCalculator::default();
        let inputs = vec![input(100.0, 0.0), input(50.0, 0.0), input(80.0, 20.0)];
        let results = calculator.calculate_multiple(&inputs);

        assert_eq!(results.len(), 3);
        for (input, result) in inputs.iter().zip(&results) {
            assert_eq!(*result, calculator.calculate(input));
        }
        assert!(calculator.calculate_multiple(&[]).is_empty());
    }

    #[test]
    fn extended_roi_adds_benefits_and_projects_horizons() {
        let calculator = RoiCalculator::default();
        let base = calculator.calculate(&input(50.0, 0.0));
        let extended = calculator.calculate_extended_roi(&base, 10_000.0, 300.0, 200.0);

        assert_eq!(extended.total_monthly_savings, 5_000.0);
        assert_eq!(extended.total_annual_savings, 60_000.0);
        assert_eq!(extended.payback_period_months, 2.0);

        let two_years = extended.horizon(24).expect("24 month horizon");
        assert_eq!(two_years.total_savings, 120_000.0);
        assert_eq!(two_years.roi_value, 110_000.0);
        assert_eq!(two_years.roi_percentage, 1_100.0);
        assert_eq!(extended.first_year().roi_percentage, 500.0);
        assert_eq!(extended.horizon(60).map(|h| h.roi_value), Some(290_000.0));
        assert!(extended.horizon(36).is_none());
    }

    #[test]
    fn extended_roi_without_benefits_matches_base() {
        let calculator = RoiCalculator::default();
        let base = calculator.calculate(&input(80.0, 20.0));
        let extended = calculator.calculate_extended_roi(&base, 10_000.0, 0.0, 0.0);

        assert_eq!(extended.total_monthly_savings, base.monthly_savings);
        assert_eq!(extended.payback_period_months, base.payback_period_months);
        assert_eq!(extended.first_year().roi_value, base.roi_first_year);
        assert_eq!(
            extended.first_year().roi_percentage,
            base.roi_percentage_first_year
        );
    }

    #[test]
    fn extended_roi_handles_zero_cost_and_losses() {
        let calculator = RoiCalculator::default();
        let base = calculator.calculate(&input(1.0, 0.0));

        let extended = calculator.calculate_extended_roi(&base, 0.0, 0.0, 0.0);
        assert!(extended.payback_period_months.is_infinite());
        assert!(extended
            .horizons
            .iter()
            .all(|horizon| horizon.roi_percentage == 0.0));
    }

    #[test]
    fn evaluate_classifies_from_extended_figures() {
        let calculator = RoiCalculator::default();
        let weak = RoiInput {
            rpa_implementation_cost: 60_000.0,
            ..input(50.0, 0.0)
        };

        let plain = calculator.evaluate(
            weak.clone(),
            ProcessProfile::default(),
            AdditionalBenefits::default(),
            Utc::now(),
        );
        // 4500/month against 60k: payback ~13.3 months, roi -10%
        assert_eq!(plain.classification, ProcessClassification::LowPriority);

        let boosted = calculator.evaluate(
            weak,
            ProcessProfile::default(),
            AdditionalBenefits {
                fines_avoided: 2_000.0,
                sla_savings: 500.0,
            },
            Utc::now(),
        );
        // 7000/month: payback ~8.6 months, roi 40%
        assert_eq!(boosted.classification, ProcessClassification::MediumTerm);
        assert_eq!(boosted.monthly_savings(), 7_000.0);
        assert_eq!(boosted.metrics, resolve(50.0, 0.0));
    }

    proptest! {
        #[test]
        fn roi_grows_with_the_horizon(
            monthly in 1.0f64..100_000.0,
            cost in 1.0f64..1_000_000.0,
        ) {
            let base = RoiResult {
                monthly_savings: monthly,
                annual_savings: monthly * 12.0,
                payback_period_months: cost / monthly,
                roi_first_year: monthly * 12.0 - cost,
                roi_percentage_first_year: (monthly * 12.0 - cost) / cost * 100.0,
                automation_capacity: 0.0,
            };
            let extended = RoiCalculator::default().calculate_extended_roi(&base, cost, 0.0, 0.0);
            let [one, two, five] = extended.horizons;

            prop_assert!(one.roi_percentage < two.roi_percentage);
            prop_assert!(two.roi_percentage < five.roi_percentage);
        }
    }
}

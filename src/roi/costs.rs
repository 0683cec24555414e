use serde::{Deserialize, Serialize};

/// Development and operating parameters from which the calculator's
/// one-time and monthly RPA costs are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub development_hours: f64,
    pub development_hourly_rate: f64,
    /// Annual maintenance as a percentage of the development cost.
    #[serde(default = "default_maintenance_percentage")]
    pub maintenance_percentage: f64,
    /// Monthly infrastructure, licensing and similar recurring costs.
    #[serde(default)]
    pub infra_license_cost: f64,
    /// One-time costs on top of development.
    #[serde(default)]
    pub other_costs: f64,
}

pub(crate) fn default_maintenance_percentage() -> f64 {
    10.0
}

impl CostEstimate {
    pub fn development_cost(&self) -> f64 {
        self.development_hours * self.development_hourly_rate
    }

    pub fn implementation_cost(&self) -> f64 {
        self.development_cost() + self.other_costs
    }

    pub fn monthly_maintenance(&self) -> f64 {
        self.development_cost() * self.maintenance_percentage / 100.0 / 12.0
    }

    pub fn monthly_cost(&self) -> f64 {
        self.monthly_maintenance() + self.infra_license_cost
    }
}

/// Per-person workload figures, aggregated over the whole team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadEstimate {
    pub people_involved: u32,
    pub monthly_salary: f64,
    pub days_per_month: u32,
    pub minutes_per_day: f64,
}

const HOURS_PER_WORKDAY: f64 = 8.0;

impl WorkloadEstimate {
    /// Loaded cost of one hour, from a monthly salary over full workdays.
    pub fn hourly_rate(&self) -> f64 {
        if self.days_per_month == 0 {
            return 0.0;
        }
        self.monthly_salary / (f64::from(self.days_per_month) * HOURS_PER_WORKDAY)
    }

    /// Hours per month spent on the process by everyone involved.
    pub fn current_time_per_month(&self) -> f64 {
        let hours_per_day = self.minutes_per_day / 60.0;
        hours_per_day * f64::from(self.days_per_month) * f64::from(self.people_involved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_aggregates_team_hours() {
        let workload = WorkloadEstimate {
            people_involved: 5,
            monthly_salary: 5_280.0,
            days_per_month: 22,
            minutes_per_day: 60.0,
        };

        assert!((workload.hourly_rate() - 30.0).abs() < 1e-9);
        assert!((workload.current_time_per_month() - 110.0).abs() < 1e-9);

        let idle = WorkloadEstimate {
            days_per_month: 0,
            ..workload
        };
        assert_eq!(idle.hourly_rate(), 0.0);
        assert_eq!(idle.current_time_per_month(), 0.0);
    }

    #[test]
    fn derives_implementation_and_monthly_costs() {
        let estimate = CostEstimate {
            development_hours: 160.0,
            development_hourly_rate: 150.0,
            maintenance_percentage: 12.0,
            infra_license_cost: 500.0,
            other_costs: 1000.0,
        };

        assert_eq!(estimate.development_cost(), 24_000.0);
        assert_eq!(estimate.implementation_cost(), 25_000.0);
        assert!((estimate.monthly_maintenance() - 240.0).abs() < 1e-9);
        assert!((estimate.monthly_cost() - 740.0).abs() < 1e-9);
    }

    #[test]
    fn optional_fields_default_when_deserialized() {
        let estimate: CostEstimate =
            serde_json::from_str(r#"{"development_hours": 10, "development_hourly_rate": 120}"#)
                .unwrap();
        assert_eq!(estimate.maintenance_percentage, 10.0);
        assert_eq!(estimate.infra_license_cost, 0.0);
        assert!((estimate.monthly_cost() - 10.0).abs() < 1e-9);
    }
}

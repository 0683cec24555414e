use chrono::Utc;
use clap::Args;
use rpa_roi::error::AppError;
use rpa_roi::format::{format_currency, format_months, format_percentage, Currency};
use rpa_roi::import::{ImportOutcome, ProcessImporter};
use rpa_roi::portfolio::{top_by_metric, PortfolioSummary, RankingMetric, DEFAULT_TOP};
use rpa_roi::roi::{
    CalculationRecord, CostEstimate, ProcessComplexity, ProcessForm, RoiCalculator,
    WorkloadEstimate,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct CalculateArgs {
    /// Process name
    #[arg(long)]
    pub(crate) name: String,
    /// Owning department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Baixa, Média or Alta; sets the default automation target
    #[arg(long)]
    pub(crate) complexity: Option<String>,
    /// Hours per month spent on the process by the whole team
    #[arg(long)]
    pub(crate) hours: Option<f64>,
    /// Number of people working on the process
    #[arg(long, default_value_t = 1)]
    pub(crate) people: u32,
    /// Loaded cost of one hour of work
    #[arg(long)]
    pub(crate) hourly_rate: Option<f64>,
    /// Monthly salary of one person, used when no hourly rate is given
    #[arg(long)]
    pub(crate) monthly_salary: Option<f64>,
    /// Minutes per day each person spends on the process, used when no hours are given
    #[arg(long)]
    pub(crate) minutes_per_day: Option<f64>,
    /// Working days per month for salary and minute based estimates
    #[arg(long, default_value_t = 22)]
    pub(crate) days_per_month: u32,
    /// One-time RPA implementation cost
    #[arg(long)]
    pub(crate) implementation_cost: Option<f64>,
    /// Recurring monthly RPA cost
    #[arg(long)]
    pub(crate) monthly_cost: Option<f64>,
    /// Development hours, to derive RPA costs
    #[arg(long)]
    pub(crate) dev_hours: Option<f64>,
    /// Development hourly rate, to derive RPA costs
    #[arg(long)]
    pub(crate) dev_rate: Option<f64>,
    /// Annual maintenance as a percentage of development cost
    #[arg(long)]
    pub(crate) maintenance: Option<f64>,
    /// Monthly infrastructure and license cost
    #[arg(long)]
    pub(crate) infra_cost: Option<f64>,
    /// Other one-time costs
    #[arg(long)]
    pub(crate) other_costs: Option<f64>,
    /// Expected automation percentage (defaults from complexity)
    #[arg(long)]
    pub(crate) automation: Option<f64>,
    /// Share of automated work that still needs manual review
    #[arg(long)]
    pub(crate) exception_rate: Option<f64>,
    /// Current error rate of the process
    #[arg(long)]
    pub(crate) error_rate: Option<f64>,
    /// Monthly fines avoided
    #[arg(long)]
    pub(crate) fines_avoided: Option<f64>,
    /// Monthly savings from better SLAs
    #[arg(long)]
    pub(crate) sla_savings: Option<f64>,
    /// Print the calculation record as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl CalculateArgs {
    /// Builds the same raw form the HTTP API accepts so both share validation.
    pub(crate) fn to_form(&self) -> ProcessForm {
        let mut form = ProcessForm::default();
        form.insert("process_name", Value::from(self.name.as_str()));
        form.insert("people_involved", Value::from(self.people));

        if let Some(department) = &self.department {
            form.insert("department", Value::from(department.as_str()));
        }
        if let Some(complexity) = &self.complexity {
            form.insert("complexity", Value::from(complexity.as_str()));
        }

        let workload = WorkloadEstimate {
            people_involved: self.people,
            monthly_salary: self.monthly_salary.unwrap_or_default(),
            days_per_month: self.days_per_month,
            minutes_per_day: self.minutes_per_day.unwrap_or_default(),
        };
        let hours = self
            .hours
            .or(self.minutes_per_day.map(|_| workload.current_time_per_month()));
        let hourly_rate = self
            .hourly_rate
            .or(self.monthly_salary.map(|_| workload.hourly_rate()));
        let automation = self.automation.unwrap_or_else(|| {
            self.complexity
                .as_deref()
                .and_then(ProcessComplexity::parse)
                .unwrap_or_default()
                .default_automation_percentage()
        });

        let numbers = [
            ("current_time_per_month", hours),
            ("hourly_rate", hourly_rate),
            ("rpa_implementation_cost", self.implementation_cost),
            ("rpa_monthly_cost", self.monthly_cost),
            ("development_hours", self.dev_hours),
            ("development_hourly_rate", self.dev_rate),
            ("maintenance_percentage", self.maintenance),
            ("infra_license_cost", self.infra_cost),
            ("other_costs", self.other_costs),
            ("expected_automation_percentage", Some(automation)),
            ("exception_rate", self.exception_rate),
            ("error_rate", self.error_rate),
            ("fines_avoided", self.fines_avoided),
            ("sla_savings", self.sla_savings),
        ];
        for (key, value) in numbers {
            if let Some(value) = value {
                form.insert(key, Value::from(value));
            }
        }

        form
    }
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioArgs {
    /// CSV sheet with one process per row, headed by form field names
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Number of processes to list in each ranking
    #[arg(long, default_value_t = DEFAULT_TOP)]
    pub(crate) top: usize,
    /// Ranking to print: roi, payback, savings or investment
    #[arg(long, default_value = "roi")]
    pub(crate) rank_by: String,
}

pub(crate) fn run_calculate(
    args: CalculateArgs,
    calculator: &RoiCalculator,
    currency: Currency,
) -> Result<(), AppError> {
    let submission = args.to_form().into_submission()?;
    let record = calculator.evaluate(
        submission.input,
        submission.profile,
        submission.benefits,
        Utc::now(),
    );

    if args.json {
        let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        render_calculation(&record, submission.cost_estimate.as_ref(), currency);
    }

    Ok(())
}

pub(crate) fn run_portfolio(
    args: PortfolioArgs,
    calculator: &RoiCalculator,
    currency: Currency,
) -> Result<(), AppError> {
    let outcome = ProcessImporter::from_path(&args.csv)?;
    let records = outcome.evaluate(calculator, Utc::now());
    let summary = PortfolioSummary::build(&records, args.top);
    let metric = RankingMetric::parse(&args.rank_by);

    println!("Portfolio report: {}", args.csv.display());
    render_summary(&summary, currency);
    render_ranking(&records, metric, args.top, currency);
    render_rejections(&outcome);

    Ok(())
}

fn render_calculation(
    record: &CalculationRecord,
    cost_estimate: Option<&CostEstimate>,
    currency: Currency,
) {
    let money = |value: f64| format_currency(value, currency);

    println!("ROI report: {}", record.process_name());
    if !record.profile.department.is_empty() {
        println!("Department: {}", record.profile.department);
    }
    println!(
        "Complexity: {} | Classification: {}",
        record.profile.complexity.label(),
        record.classification
    );

    println!("\nAutomation split");
    println!(
        "- Fully automated: {}",
        format_percentage(record.metrics.fully_automated_pct, 1)
    );
    println!(
        "- Automated with review: {}",
        format_percentage(record.metrics.partial_review_pct, 1)
    );
    println!(
        "- Still manual: {}",
        format_percentage(record.metrics.still_manual_pct, 1)
    );
    println!(
        "- Hours freed per month: {:.1}",
        record.result.automation_capacity
    );

    if let Some(estimate) = cost_estimate {
        println!("\nCost estimate");
        println!("- Development: {}", money(estimate.development_cost()));
        println!("- Implementation: {}", money(estimate.implementation_cost()));
        println!("- Monthly maintenance: {}", money(estimate.monthly_maintenance()));
        println!("- Monthly total: {}", money(estimate.monthly_cost()));
    }

    println!("\nFinancials");
    println!("- Implementation cost: {}", money(record.implementation_cost()));
    println!("- Monthly savings: {}", money(record.monthly_savings()));
    if record.benefits.monthly_total() > 0.0 {
        println!(
            "  (labor {} + additional benefits {})",
            money(record.result.monthly_savings),
            money(record.benefits.monthly_total())
        );
    }
    println!("- Annual savings: {}", money(record.annual_savings()));
    println!("- Payback: {}", format_months(record.payback_period_months()));

    println!("\nReturn by horizon");
    for horizon in &record.extended.horizons {
        println!(
            "- {} months: {} ({})",
            horizon.months,
            money(horizon.roi_value),
            format_percentage(horizon.roi_percentage, 1)
        );
    }
}

fn render_summary(summary: &PortfolioSummary, currency: Currency) {
    let aggregate = &summary.aggregate;

    println!("\nOverview");
    println!("- Processes: {}", aggregate.total_processes);
    println!(
        "- Annual savings: {}",
        format_currency(aggregate.total_savings, currency)
    );
    println!(
        "- Investment: {}",
        format_currency(aggregate.total_investment, currency)
    );
    println!(
        "- Average ROI: {} (median {})",
        format_percentage(aggregate.avg_roi, 1),
        format_percentage(aggregate.median_roi, 1)
    );
    println!(
        "- Median payback: {}",
        format_months(aggregate.median_payback)
    );

    println!("\nPriorities");
    for entry in &summary.classifications {
        println!("- {}: {}", entry.classification, entry.count);
    }

    println!("\nPayback distribution");
    for bucket in &summary.payback_distribution {
        println!(
            "- {}: {} ({})",
            bucket.label,
            bucket.count,
            format_percentage(bucket.percentage, 0)
        );
    }

    println!("\nROI distribution");
    for bucket in &summary.roi_distribution {
        println!(
            "- {}: {} ({})",
            bucket.label,
            bucket.count,
            format_percentage(bucket.percentage, 0)
        );
    }
}

fn render_ranking(
    records: &[CalculationRecord],
    metric: RankingMetric,
    top: usize,
    currency: Currency,
) {
    println!("\nTop {top} by {}", metric.label());
    for (index, record) in top_by_metric(records, metric, top).into_iter().enumerate() {
        println!(
            "{}. {} | ROI {} | payback {} | savings {} | {}",
            index + 1,
            record.process_name(),
            format_percentage(record.roi_percentage_first_year(), 1),
            format_months(record.payback_period_months()),
            format_currency(record.annual_savings(), currency),
            record.classification
        );
    }
}

fn render_rejections(outcome: &ImportOutcome) {
    if outcome.rejected.is_empty() {
        return;
    }

    println!("\nRejected rows");
    for row in &outcome.rejected {
        let messages: Vec<&str> = row.errors.iter().map(|error| error.message.as_str()).collect();
        println!("- line {}: {}", row.line, messages.join("; "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CalculateArgs {
        CalculateArgs {
            name: "Conciliação".to_string(),
            hours: Some(160.0),
            people: 2,
            hourly_rate: Some(50.0),
            implementation_cost: Some(5000.0),
            monthly_cost: Some(200.0),
            automation: Some(80.0),
            exception_rate: Some(10.0),
            days_per_month: 22,
            ..CalculateArgs::default()
        }
    }

    #[test]
    fn form_from_flags_validates_and_calculates() {
        let submission = args().to_form().into_submission().expect("valid flags");
        let result = RoiCalculator::default().calculate(&submission.input);
        assert!((result.monthly_savings - 5560.0).abs() < 1e-9);
    }

    #[test]
    fn derives_workload_and_automation_defaults() {
        let args = CalculateArgs {
            hours: None,
            hourly_rate: None,
            automation: None,
            complexity: Some("Alta".to_string()),
            monthly_salary: Some(5_280.0),
            minutes_per_day: Some(60.0),
            ..args()
        };

        let submission = args.to_form().into_submission().expect("valid flags");
        assert!((submission.input.current_time_per_month - 44.0).abs() < 1e-9);
        assert!((submission.input.hourly_rate - 30.0).abs() < 1e-9);
        assert_eq!(submission.input.expected_automation_percentage, 50.0);
    }

    #[test]
    fn development_figures_stand_in_for_rpa_costs() {
        let args = CalculateArgs {
            implementation_cost: None,
            monthly_cost: None,
            dev_hours: Some(100.0),
            dev_rate: Some(120.0),
            ..args()
        };

        let submission = args.to_form().into_submission().expect("valid flags");
        assert_eq!(submission.input.rpa_implementation_cost, 12_000.0);
        assert!((submission.input.rpa_monthly_cost - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_costs_are_reported() {
        let args = CalculateArgs {
            implementation_cost: None,
            ..args()
        };
        let errors = args.to_form().into_submission().unwrap_err();
        assert!(errors
            .iter()
            .any(|error| error.field == "rpa_implementation_cost"));
    }
}

use crate::report::{run_calculate, run_portfolio, CalculateArgs, PortfolioArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rpa_roi::config::{AppConfig, TelemetryConfig};
use rpa_roi::error::AppError;
use rpa_roi::format::Currency;
use rpa_roi::roi::RoiCalculator;
use rpa_roi::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "RPA ROI",
    about = "Estimate, classify and rank the return of RPA automation candidates",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate the ROI of a single process and print a report
    Calculate(CalculateArgs),
    /// Classify a process from its first-year ROI and payback
    Classify(ClassifyArgs),
    /// Import a CSV of processes and print portfolio rankings
    Portfolio(PortfolioArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// First-year ROI percentage
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) roi: f64,
    /// Payback in months; omit when the process never pays back
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) payback: Option<f64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => {
            let (calculator, currency) = report_context()?;
            run_calculate(args, &calculator, currency)
        }
        Command::Classify(args) => {
            let (calculator, _) = report_context()?;
            let payback = args.payback.unwrap_or(f64::INFINITY);
            println!("{}", calculator.thresholds().classify(args.roi, payback));
            Ok(())
        }
        Command::Portfolio(args) => {
            let (calculator, currency) = report_context()?;
            run_portfolio(args, &calculator, currency)
        }
    }
}

fn report_context() -> Result<(RoiCalculator, Currency), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&TelemetryConfig {
        log_level: telemetry::REPORT_LOG_LEVEL.to_string(),
    })?;

    Ok((
        RoiCalculator::new(config.calculator.thresholds),
        config.calculator.currency,
    ))
}

use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use rpa_roi::error::AppError;
use rpa_roi::format::{format_currency, format_months, format_percentage};
use rpa_roi::import::{ProcessImporter, RejectedRow};
use rpa_roi::portfolio::{PortfolioSummary, DEFAULT_TOP};
use rpa_roi::roi::{CalculationRecord, CostEstimate, ProcessClassification, ProcessForm};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub(crate) struct CalculationResponse {
    pub(crate) record: CalculationRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cost_estimate: Option<CostEstimate>,
    pub(crate) display: DisplayFigures,
}

/// Headline figures pre-formatted in the configured currency.
#[derive(Debug, Serialize)]
pub(crate) struct DisplayFigures {
    pub(crate) monthly_savings: String,
    pub(crate) annual_savings: String,
    pub(crate) implementation_cost: String,
    pub(crate) payback: String,
    pub(crate) roi_first_year: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyRequest {
    pub(crate) roi_percentage: f64,
    /// `null` or absent means the process never pays back.
    #[serde(default)]
    pub(crate) payback_months: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) classification: ProcessClassification,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResponse {
    pub(crate) records: Vec<CalculationRecord>,
    pub(crate) rejected: Vec<RejectedRow>,
    pub(crate) summary: PortfolioSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortfolioRequest {
    pub(crate) records: Vec<CalculationRecord>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/roi/calculate", post(calculate_endpoint))
        .route("/api/v1/roi/classify", post(classify_endpoint))
        .route("/api/v1/roi/batch", post(batch_endpoint))
        .route("/api/v1/portfolio/summary", post(portfolio_summary_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn calculate_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<CalculationResponse>, AppError> {
    let form = ProcessForm::from_value(payload).map_err(|error| AppError::from(vec![error]))?;
    let submission = form.into_submission()?;

    let record = state.calculator.evaluate(
        submission.input,
        submission.profile,
        submission.benefits,
        Utc::now(),
    );
    info!(
        process = %record.process_name(),
        classification = %record.classification,
        "process roi calculated"
    );

    let currency = state.currency;
    let display = DisplayFigures {
        monthly_savings: format_currency(record.monthly_savings(), currency),
        annual_savings: format_currency(record.annual_savings(), currency),
        implementation_cost: format_currency(record.implementation_cost(), currency),
        payback: format_months(record.payback_period_months()),
        roi_first_year: format_percentage(record.roi_percentage_first_year(), 2),
    };

    Ok(Json(CalculationResponse {
        record,
        cost_estimate: submission.cost_estimate,
        display,
    }))
}

pub(crate) async fn classify_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let payback = payload.payback_months.unwrap_or(f64::INFINITY);
    let classification = state
        .calculator
        .thresholds()
        .classify(payload.roi_percentage, payback);

    Json(ClassifyResponse { classification })
}

pub(crate) async fn batch_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let outcome = ProcessImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    let records = outcome.evaluate(&state.calculator, Utc::now());
    let summary = PortfolioSummary::build(&records, payload.top.unwrap_or(DEFAULT_TOP));

    debug!(
        accepted = records.len(),
        rejected = outcome.rejected.len(),
        "batch import evaluated"
    );

    Ok(Json(BatchResponse {
        records,
        rejected: outcome.rejected,
        summary,
    }))
}

pub(crate) async fn portfolio_summary_endpoint(
    Json(payload): Json<PortfolioRequest>,
) -> Json<PortfolioSummary> {
    let top = payload.top.unwrap_or(DEFAULT_TOP);
    Json(PortfolioSummary::build(&payload.records, top))
}

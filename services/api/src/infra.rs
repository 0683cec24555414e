use metrics_exporter_prometheus::PrometheusHandle;
use rpa_roi::config::CalculatorConfig;
use rpa_roi::format::Currency;
use rpa_roi::roi::RoiCalculator;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) calculator: Arc<RoiCalculator>,
    pub(crate) currency: Currency,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, config: &CalculatorConfig) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            calculator: Arc::new(RoiCalculator::new(config.thresholds)),
            currency: config.currency,
        }
    }
}

use green_eligibility::config::AppConfig;
use green_eligibility::eligibility::{EligibilityEvaluator, EligibilityService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service wired with the threshold table from configuration.
pub(crate) fn eligibility_service(config: &AppConfig) -> Arc<EligibilityService> {
    let evaluator = EligibilityEvaluator::new(config.thresholds.clone());
    Arc::new(EligibilityService::new(evaluator))
}

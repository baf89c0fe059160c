//! Renewable-energy program eligibility: request intake, the rule evaluator, and the
//! CO2 savings estimate returned to eligible customers.
//!
//! The evaluator is a pure function over an [`EligibilityRequest`]. Shape and range checks
//! on the inbound payload live in [`intake`] and run before a request can be constructed,
//! so the rules never see malformed input.

pub mod batch;
mod config;
pub mod document;
pub mod domain;
pub mod intake;
mod policy;
pub mod router;
mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchEntry, BatchError, BatchEvaluator, BatchReport};
pub use config::{MissingThreshold, ThresholdTable, DEFAULT_MINIMUM_AVERAGE_KWH};
pub use document::DocumentNumber;
pub use domain::{
    ConnectionType, ConsumptionClass, ConsumptionHistory, EligibilityRequest, HistoryError,
    TariffModality, WireValue,
};
pub use intake::{CheckEligibilityPayload, RequestRejection, ValidatedSubmission};
pub use policy::{EligibilityVerdict, IneligibilityReason};
pub use router::eligibility_router;
pub use rules::{annual_co2_savings, CO2_EMISSION_FACTOR_KG_PER_KWH};
pub use service::{EligibilityService, EligibilityServiceError};

use policy::decide_verdict;
use tracing::debug;

/// Stateless evaluator applying the program rules with a configurable threshold table.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    thresholds: ThresholdTable,
}

impl EligibilityEvaluator {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Every check runs, so an ineligible verdict lists all violated rules in check order.
    pub fn evaluate(&self, request: &EligibilityRequest) -> EligibilityVerdict {
        let reasons = rules::collect_reasons(request, &self.thresholds);
        debug!(
            average_kwh = request.consumption_history.average_kwh(),
            minimum_kwh = self.thresholds.minimum_for(request.connection_type),
            triggered = reasons.len(),
            "eligibility rules evaluated"
        );

        decide_verdict(reasons, &request.consumption_history)
    }
}

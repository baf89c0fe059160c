use std::sync::Arc;

use tracing::{info, warn};

use super::intake::{CheckEligibilityPayload, RequestRejection, ValidatedSubmission};
use super::{EligibilityEvaluator, EligibilityVerdict};

/// Service composing request intake with the evaluator.
pub struct EligibilityService {
    evaluator: Arc<EligibilityEvaluator>,
}

impl EligibilityService {
    pub fn new(evaluator: EligibilityEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    /// Validate a raw payload and decide it.
    pub fn check(
        &self,
        payload: CheckEligibilityPayload,
    ) -> Result<EligibilityVerdict, EligibilityServiceError> {
        let submission = payload.validate().map_err(|rejection| {
            warn!(
                messages = rejection.messages().len(),
                "eligibility request rejected"
            );
            rejection
        })?;

        Ok(self.decide(&submission))
    }

    /// Decide an already validated submission.
    pub fn decide(&self, submission: &ValidatedSubmission) -> EligibilityVerdict {
        let verdict = self.evaluator.evaluate(&submission.request);
        let reasons: Vec<&str> = verdict
            .reasons()
            .iter()
            .map(|reason| reason.code())
            .collect();

        info!(
            document_kind = submission.document.kind(),
            document = %submission.document.masked(),
            eligible = verdict.is_eligible(),
            ?reasons,
            periods = submission.request.consumption_history.periods(),
            "eligibility decided"
        );

        verdict
    }
}

impl Default for EligibilityService {
    fn default() -> Self {
        Self::new(EligibilityEvaluator::default())
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Rejected(#[from] RequestRejection),
}

use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::eligibility::domain::{
    ConnectionType, ConsumptionClass, ConsumptionHistory, EligibilityRequest, TariffModality,
};
use crate::eligibility::intake::CheckEligibilityPayload;
use crate::eligibility::{eligibility_router, EligibilityEvaluator, EligibilityService};

pub(super) const REFERENCE_HISTORY: [u16; 12] = [
    3878, 9760, 5976, 2797, 2481, 5731, 7538, 4392, 7859, 4160, 6941, 4597,
];

pub(super) const THREE_PHASE_HISTORY: [u16; 12] = [
    3878, 9760, 5976, 2797, 2481, 8000, 7538, 4392, 7859, 4160, 3219, 6000,
];

pub(super) fn history(samples: &[u16]) -> ConsumptionHistory {
    ConsumptionHistory::new(samples.to_vec()).expect("valid history")
}

/// Two-phase commercial customer on the conventional tariff.
pub(super) fn reference_request() -> EligibilityRequest {
    EligibilityRequest {
        connection_type: ConnectionType::TwoPhase,
        consumption_class: ConsumptionClass::Commercial,
        tariff_modality: TariffModality::Conventional,
        consumption_history: history(&REFERENCE_HISTORY),
    }
}

pub(super) fn flat_request(connection_type: ConnectionType, kwh: u16) -> EligibilityRequest {
    EligibilityRequest {
        connection_type,
        consumption_history: history(&[kwh; 6]),
        ..reference_request()
    }
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::default()
}

pub(super) fn reference_body() -> Value {
    json!({
        "documentNumber": "14041737706",
        "connectionType": "bifasico",
        "consumptionClass": "comercial",
        "tariffModality": "convencional",
        "consumptionHistory": REFERENCE_HISTORY,
    })
}

pub(super) fn reference_payload() -> CheckEligibilityPayload {
    serde_json::from_value(reference_body()).expect("payload deserializes")
}

pub(super) fn payload_with(field: &str, value: Value) -> CheckEligibilityPayload {
    let mut body = reference_body();
    body[field] = value;
    serde_json::from_value(body).expect("payload deserializes")
}

pub(super) fn service() -> Arc<EligibilityService> {
    Arc::new(EligibilityService::default())
}

pub(super) fn router() -> axum::Router {
    eligibility_router(service())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::intake::{CheckEligibilityPayload, RequestRejection};
use super::service::{EligibilityService, EligibilityServiceError};

/// Router builder exposing the eligibility check endpoint.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/eligibility/check", post(check_handler))
        .with_state(service)
}

pub(crate) async fn check_handler(
    State(service): State<Arc<EligibilityService>>,
    payload: Result<Json<CheckEligibilityPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            return RequestRejection::malformed_body(rejection.body_text()).into_response()
        }
    };

    match service.check(payload) {
        Ok(verdict) => (StatusCode::OK, Json(verdict)).into_response(),
        Err(EligibilityServiceError::Rejected(rejection)) => rejection.into_response(),
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::document::DocumentNumber;
use super::domain::{
    ConnectionType, ConsumptionClass, ConsumptionHistory, EligibilityRequest, TariffModality,
    WireValue, MAX_HISTORY_PERIODS, MAX_PERIOD_KWH, MIN_HISTORY_PERIODS,
};

/// Raw inbound body for `POST /eligibility/check`.
///
/// Fields are kept as untyped JSON so a wrong type is reported with the same per-field
/// message as a wrong value. Missing fields read as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckEligibilityPayload {
    pub document_number: Value,
    pub connection_type: Value,
    pub consumption_class: Value,
    pub tariff_modality: Value,
    pub consumption_history: Value,
}

/// Payload that passed intake: the decision input plus its pass-through document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub document: DocumentNumber,
    pub request: EligibilityRequest,
}

/// Client input error listing every offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid eligibility request: {}", .messages.join("; "))]
pub struct RequestRejection {
    messages: Vec<String>,
}

impl RequestRejection {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn malformed_body(detail: impl Into<String>) -> Self {
        Self::new(vec![detail.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "statusCode": StatusCode::BAD_REQUEST.as_u16(),
            "message": self.messages,
            "error": "Bad Request",
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

impl CheckEligibilityPayload {
    pub fn from_parts(
        document_number: impl Into<String>,
        connection_type: impl Into<String>,
        consumption_class: impl Into<String>,
        tariff_modality: impl Into<String>,
        consumption_history: &[i64],
    ) -> Self {
        Self {
            document_number: Value::String(document_number.into()),
            connection_type: Value::String(connection_type.into()),
            consumption_class: Value::String(consumption_class.into()),
            tariff_modality: Value::String(tariff_modality.into()),
            consumption_history: Value::from(consumption_history.to_vec()),
        }
    }

    /// Check every field and build the decision input, or report all problems at once.
    pub fn validate(self) -> Result<ValidatedSubmission, RequestRejection> {
        let mut messages = Vec::new();

        let document = parse_document(&self.document_number, &mut messages);
        let connection_type =
            parse_choice::<ConnectionType>("connectionType", &self.connection_type, &mut messages);
        let consumption_class = parse_choice::<ConsumptionClass>(
            "consumptionClass",
            &self.consumption_class,
            &mut messages,
        );
        let tariff_modality =
            parse_choice::<TariffModality>("tariffModality", &self.tariff_modality, &mut messages);
        let consumption_history = parse_history(&self.consumption_history, &mut messages);

        match (
            document,
            connection_type,
            consumption_class,
            tariff_modality,
            consumption_history,
        ) {
            (
                Some(document),
                Some(connection_type),
                Some(consumption_class),
                Some(tariff_modality),
                Some(consumption_history),
            ) if messages.is_empty() => Ok(ValidatedSubmission {
                document,
                request: EligibilityRequest {
                    connection_type,
                    consumption_class,
                    tariff_modality,
                    consumption_history,
                },
            }),
            _ => Err(RequestRejection::new(messages)),
        }
    }
}

fn parse_document(value: &Value, messages: &mut Vec<String>) -> Option<DocumentNumber> {
    let document = value.as_str().and_then(DocumentNumber::parse);
    if document.is_none() {
        messages.push("documentNumber must be a valid CPF or CNPJ".to_string());
    }
    document
}

fn parse_choice<T: WireValue>(
    field: &str,
    value: &Value,
    messages: &mut Vec<String>,
) -> Option<T> {
    let choice = value.as_str().and_then(T::from_wire);
    if choice.is_none() {
        messages.push(format!(
            "{field} must be one of the following values: {}",
            T::wire_values()
        ));
    }
    choice
}

fn parse_history(value: &Value, messages: &mut Vec<String>) -> Option<ConsumptionHistory> {
    let Some(items) = value.as_array() else {
        messages.push("consumptionHistory must be an array".to_string());
        return None;
    };

    let before = messages.len();
    let mut samples = Vec::with_capacity(items.len());
    let mut non_integer = false;
    let mut below_minimum = false;
    let mut above_maximum = false;

    for item in items {
        let Some(kwh) = as_number(item) else {
            non_integer = true;
            continue;
        };

        let integral = kwh.fract() == 0.0;
        if !integral {
            non_integer = true;
        }
        if kwh < 0.0 {
            below_minimum = true;
        } else if kwh > f64::from(MAX_PERIOD_KWH) {
            above_maximum = true;
        } else if integral {
            samples.push(kwh as u16);
        }
    }

    if non_integer {
        messages.push("each value in consumptionHistory must be an integer number".to_string());
    }
    if items.len() < MIN_HISTORY_PERIODS {
        messages.push(format!(
            "consumptionHistory must contain at least {MIN_HISTORY_PERIODS} elements"
        ));
    }
    if items.len() > MAX_HISTORY_PERIODS {
        messages.push(format!(
            "consumptionHistory must contain no more than {MAX_HISTORY_PERIODS} elements"
        ));
    }
    if below_minimum {
        messages.push("each value in consumptionHistory must not be less than 0".to_string());
    }
    if above_maximum {
        messages.push(format!(
            "each value in consumptionHistory must not be greater than {MAX_PERIOD_KWH}"
        ));
    }

    if messages.len() > before {
        return None;
    }

    match ConsumptionHistory::new(samples) {
        Ok(history) => Some(history),
        Err(err) => {
            messages.push(err.to_string());
            None
        }
    }
}

/// Finite JSON numbers; `"100"` is not coerced. Integrality and range are checked
/// separately so a value like `-5.5` reports both problems.
fn as_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| number.is_finite())
}

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::domain::ConsumptionHistory;
use super::rules::annual_co2_savings;

/// Rule violated by an ineligible request. Serialized as the customer-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IneligibilityReason {
    #[serde(
        rename = "Classe de consumo não aceita",
        alias = "forbidden-consumption-class"
    )]
    ForbiddenConsumptionClass,
    #[serde(
        rename = "Modalidade tarifária não aceita",
        alias = "forbidden-tariff-modality"
    )]
    ForbiddenTariffModality,
    #[serde(
        rename = "Consumo muito baixo para o tipo de conexão",
        alias = "low-consumption"
    )]
    LowConsumption,
}

impl IneligibilityReason {
    /// Stable identifier used in logs and CLI output.
    pub fn code(self) -> &'static str {
        match self {
            Self::ForbiddenConsumptionClass => "forbidden-consumption-class",
            Self::ForbiddenTariffModality => "forbidden-tariff-modality",
            Self::LowConsumption => "low-consumption",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ForbiddenConsumptionClass => "Classe de consumo não aceita",
            Self::ForbiddenTariffModality => "Modalidade tarifária não aceita",
            Self::LowConsumption => "Consumo muito baixo para o tipo de conexão",
        }
    }
}

/// Outcome of an eligibility check.
///
/// On the wire the variant is carried by an explicit boolean `eligible` tag, and only the
/// matching field is present:
///
/// ```json
/// { "eligible": true, "anualCO2Savings": 5553.240000000001 }
/// { "eligible": false, "ineligibilityReason": ["Classe de consumo não aceita"] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "VerdictWire")]
pub enum EligibilityVerdict {
    Eligible { annual_co2_savings: f64 },
    Ineligible { reasons: Vec<IneligibilityReason> },
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    pub fn reasons(&self) -> &[IneligibilityReason] {
        match self {
            Self::Eligible { .. } => &[],
            Self::Ineligible { reasons } => reasons,
        }
    }

    pub fn annual_co2_savings(&self) -> Option<f64> {
        match self {
            Self::Eligible { annual_co2_savings } => Some(*annual_co2_savings),
            Self::Ineligible { .. } => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Eligible { annual_co2_savings } => {
                format!("eligible, estimated CO2 savings {annual_co2_savings} kg")
            }
            Self::Ineligible { reasons } => {
                let codes: Vec<&str> = reasons.iter().map(|reason| reason.code()).collect();
                format!("ineligible: {}", codes.join(", "))
            }
        }
    }
}

impl Serialize for EligibilityVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EligibilityVerdict", 2)?;
        match self {
            Self::Eligible { annual_co2_savings } => {
                state.serialize_field("eligible", &true)?;
                state.serialize_field("anualCO2Savings", annual_co2_savings)?;
            }
            Self::Ineligible { reasons } => {
                state.serialize_field("eligible", &false)?;
                state.serialize_field("ineligibilityReason", reasons)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictWire {
    eligible: bool,
    #[serde(rename = "anualCO2Savings")]
    annual_co2_savings: Option<f64>,
    #[serde(rename = "ineligibilityReason")]
    reasons: Option<Vec<IneligibilityReason>>,
}

impl TryFrom<VerdictWire> for EligibilityVerdict {
    type Error = String;

    fn try_from(wire: VerdictWire) -> Result<Self, Self::Error> {
        match (wire.eligible, wire.annual_co2_savings, wire.reasons) {
            (true, Some(annual_co2_savings), None) => Ok(Self::Eligible { annual_co2_savings }),
            (false, None, Some(reasons)) if !reasons.is_empty() => {
                Ok(Self::Ineligible { reasons })
            }
            (true, _, _) => Err("eligible verdict must carry only anualCO2Savings".to_string()),
            (false, _, _) => {
                Err("ineligible verdict must carry a non-empty ineligibilityReason".to_string())
            }
        }
    }
}

pub(crate) fn decide_verdict(
    reasons: Vec<IneligibilityReason>,
    history: &ConsumptionHistory,
) -> EligibilityVerdict {
    if reasons.is_empty() {
        EligibilityVerdict::Eligible {
            annual_co2_savings: annual_co2_savings(history),
        }
    } else {
        EligibilityVerdict::Ineligible { reasons }
    }
}

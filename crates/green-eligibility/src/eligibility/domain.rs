use serde::{Deserialize, Serialize};

/// Fewest billing periods a consumption history may carry.
pub const MIN_HISTORY_PERIODS: usize = 3;
/// Most billing periods a consumption history may carry.
pub const MAX_HISTORY_PERIODS: usize = 12;
/// Upper bound for a single billing period, in kWh.
pub const MAX_PERIOD_KWH: u16 = 9999;

/// Closed set of values exchanged as plain strings on the wire.
pub trait WireValue: Copy + Sized + 'static {
    const VARIANTS: &'static [Self];

    /// Canonical value accepted and produced by the HTTP interface.
    fn wire_value(self) -> &'static str;

    /// English alias accepted on input only.
    fn wire_alias(self) -> &'static str;

    fn from_wire(raw: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.wire_value() == raw || variant.wire_alias() == raw)
    }

    fn wire_values() -> String {
        Self::VARIANTS
            .iter()
            .map(|variant| variant.wire_value())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Physical connection of the consumer unit to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "monofasico", alias = "single-phase")]
    SinglePhase,
    #[serde(rename = "bifasico", alias = "two-phase")]
    TwoPhase,
    #[serde(rename = "trifasico", alias = "three-phase")]
    ThreePhase,
}

impl ConnectionType {
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl WireValue for ConnectionType {
    const VARIANTS: &'static [Self] = &[Self::SinglePhase, Self::TwoPhase, Self::ThreePhase];

    fn wire_value(self) -> &'static str {
        match self {
            Self::SinglePhase => "monofasico",
            Self::TwoPhase => "bifasico",
            Self::ThreePhase => "trifasico",
        }
    }

    fn wire_alias(self) -> &'static str {
        match self {
            Self::SinglePhase => "single-phase",
            Self::TwoPhase => "two-phase",
            Self::ThreePhase => "three-phase",
        }
    }
}

/// Regulatory consumption class of the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumptionClass {
    #[serde(rename = "residencial", alias = "residential")]
    Residential,
    #[serde(rename = "industrial")]
    Industrial,
    #[serde(rename = "comercial", alias = "commercial")]
    Commercial,
    #[serde(rename = "rural")]
    Rural,
    #[serde(rename = "poderPublico", alias = "public-authorities")]
    PublicAuthorities,
}

impl WireValue for ConsumptionClass {
    const VARIANTS: &'static [Self] = &[
        Self::Residential,
        Self::Industrial,
        Self::Commercial,
        Self::Rural,
        Self::PublicAuthorities,
    ];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Residential => "residencial",
            Self::Industrial => "industrial",
            Self::Commercial => "comercial",
            Self::Rural => "rural",
            Self::PublicAuthorities => "poderPublico",
        }
    }

    fn wire_alias(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Industrial => "industrial",
            Self::Commercial => "commercial",
            Self::Rural => "rural",
            Self::PublicAuthorities => "public-authorities",
        }
    }
}

/// Tariff modality billed to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TariffModality {
    #[serde(rename = "azul", alias = "blue")]
    Blue,
    #[serde(rename = "branca", alias = "white")]
    White,
    #[serde(rename = "verde", alias = "green")]
    Green,
    #[serde(rename = "convencional", alias = "conventional")]
    Conventional,
}

impl WireValue for TariffModality {
    const VARIANTS: &'static [Self] = &[Self::Blue, Self::White, Self::Green, Self::Conventional];

    fn wire_value(self) -> &'static str {
        match self {
            Self::Blue => "azul",
            Self::White => "branca",
            Self::Green => "verde",
            Self::Conventional => "convencional",
        }
    }

    fn wire_alias(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::White => "white",
            Self::Green => "green",
            Self::Conventional => "conventional",
        }
    }
}

/// Raised when a consumption history falls outside its size or range bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("consumption history needs at least {min} periods, found {0}", min = MIN_HISTORY_PERIODS)]
    TooShort(usize),
    #[error("consumption history accepts at most {max} periods, found {0}", max = MAX_HISTORY_PERIODS)]
    TooLong(usize),
    #[error("billing period consumption {0} exceeds {max} kWh", max = MAX_PERIOD_KWH)]
    OutOfRange(u16),
}

/// Billing-period consumption samples in kWh, 3 to 12 periods of 0..=9999 each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct ConsumptionHistory(Vec<u16>);

impl ConsumptionHistory {
    pub fn new(samples: Vec<u16>) -> Result<Self, HistoryError> {
        if samples.len() < MIN_HISTORY_PERIODS {
            return Err(HistoryError::TooShort(samples.len()));
        }
        if samples.len() > MAX_HISTORY_PERIODS {
            return Err(HistoryError::TooLong(samples.len()));
        }
        if let Some(value) = samples.iter().copied().find(|kwh| *kwh > MAX_PERIOD_KWH) {
            return Err(HistoryError::OutOfRange(value));
        }

        Ok(Self(samples))
    }

    pub fn samples(&self) -> &[u16] {
        &self.0
    }

    pub fn periods(&self) -> usize {
        self.0.len()
    }

    pub fn total_kwh(&self) -> u32 {
        self.0.iter().map(|kwh| u32::from(*kwh)).sum()
    }

    pub fn average_kwh(&self) -> f64 {
        f64::from(self.total_kwh()) / self.periods() as f64
    }
}

impl TryFrom<Vec<u16>> for ConsumptionHistory {
    type Error = HistoryError;

    fn try_from(samples: Vec<u16>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<ConsumptionHistory> for Vec<u16> {
    fn from(history: ConsumptionHistory) -> Self {
        history.0
    }
}

/// Normalized decision input. Built by the intake layer once the payload is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    pub connection_type: ConnectionType,
    pub consumption_class: ConsumptionClass,
    pub tariff_modality: TariffModality,
    pub consumption_history: ConsumptionHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_accept_aliases() {
        assert_eq!(
            ConnectionType::from_wire("bifasico"),
            Some(ConnectionType::TwoPhase)
        );
        assert_eq!(
            ConnectionType::from_wire("three-phase"),
            Some(ConnectionType::ThreePhase)
        );
        assert_eq!(
            ConsumptionClass::from_wire("poderPublico"),
            Some(ConsumptionClass::PublicAuthorities)
        );
        assert_eq!(TariffModality::from_wire("invalid"), None);
    }

    #[test]
    fn wire_values_list_canonical_spellings() {
        assert_eq!(
            ConsumptionClass::wire_values(),
            "residencial, industrial, comercial, rural, poderPublico"
        );
        assert_eq!(
            TariffModality::wire_values(),
            "azul, branca, verde, convencional"
        );
    }

    #[test]
    fn history_rejects_out_of_bounds_samples() {
        assert_eq!(
            ConsumptionHistory::new(vec![1, 2]),
            Err(HistoryError::TooShort(2))
        );
        assert_eq!(
            ConsumptionHistory::new(vec![0; 13]),
            Err(HistoryError::TooLong(13))
        );
        assert_eq!(
            ConsumptionHistory::new(vec![10, 10_000, 10]),
            Err(HistoryError::OutOfRange(10_000))
        );
    }

    #[test]
    fn history_reports_total_and_average() {
        let history = ConsumptionHistory::new(vec![100, 200, 600]).expect("valid history");
        assert_eq!(history.total_kwh(), 900);
        assert_eq!(history.average_kwh(), 300.0);
        assert_eq!(history.periods(), 3);
    }

    #[test]
    fn request_deserializes_from_wire_payload() {
        let request: EligibilityRequest = serde_json::from_value(serde_json::json!({
            "connectionType": "monofasico",
            "consumptionClass": "residencial",
            "tariffModality": "branca",
            "consumptionHistory": [500, 600, 700],
        }))
        .expect("request deserializes");

        assert_eq!(request.connection_type, ConnectionType::SinglePhase);
        assert_eq!(request.consumption_class, ConsumptionClass::Residential);
        assert_eq!(request.tariff_modality, TariffModality::White);
        assert_eq!(request.consumption_history.samples(), &[500, 600, 700]);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ConnectionType, WireValue};

/// Minimum average consumption (kWh per period) required for each connection type.
pub const DEFAULT_MINIMUM_AVERAGE_KWH: [(ConnectionType, u32); 3] = [
    (ConnectionType::SinglePhase, 400),
    (ConnectionType::TwoPhase, 500),
    (ConnectionType::ThreePhase, 750),
];

/// Lookup from connection type to the minimum average consumption, in kWh.
///
/// Every connection type always has an entry, so lookups are total. The defaults can be
/// overridden per entry through [`ThresholdTable::with_minimum`] or by deserializing a
/// complete map keyed by connection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ConnectionType, u32>",
    into = "BTreeMap<ConnectionType, u32>"
)]
pub struct ThresholdTable {
    minimums: [u32; 3],
}

impl ThresholdTable {
    pub fn minimum_for(&self, connection_type: ConnectionType) -> u32 {
        self.minimums[connection_type.index()]
    }

    pub fn with_minimum(mut self, connection_type: ConnectionType, minimum_kwh: u32) -> Self {
        self.minimums[connection_type.index()] = minimum_kwh;
        self
    }

    pub fn entries(&self) -> impl Iterator<Item = (ConnectionType, u32)> + '_ {
        ConnectionType::VARIANTS
            .iter()
            .map(|connection_type| (*connection_type, self.minimum_for(*connection_type)))
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let mut minimums = [0; 3];
        for (connection_type, minimum_kwh) in DEFAULT_MINIMUM_AVERAGE_KWH {
            minimums[connection_type.index()] = minimum_kwh;
        }
        Self { minimums }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("threshold table is missing an entry for {0}")]
pub struct MissingThreshold(&'static str);

impl TryFrom<BTreeMap<ConnectionType, u32>> for ThresholdTable {
    type Error = MissingThreshold;

    fn try_from(map: BTreeMap<ConnectionType, u32>) -> Result<Self, Self::Error> {
        ConnectionType::VARIANTS
            .iter()
            .try_fold(Self::default(), |table, connection_type| {
                map.get(connection_type)
                    .map(|minimum_kwh| table.with_minimum(*connection_type, *minimum_kwh))
                    .ok_or(MissingThreshold(connection_type.wire_value()))
            })
    }
}

impl From<ThresholdTable> for BTreeMap<ConnectionType, u32> {
    fn from(table: ThresholdTable) -> Self {
        table.entries().collect()
    }
}

use super::config::ThresholdTable;
use super::domain::{
    ConnectionType, ConsumptionClass, ConsumptionHistory, EligibilityRequest, TariffModality,
};
use super::policy::IneligibilityReason;

/// Kilograms of CO2 avoided per kWh supplied from renewable sources.
pub const CO2_EMISSION_FACTOR_KG_PER_KWH: f64 = 0.084;

const ELIGIBLE_CONSUMPTION_CLASSES: [ConsumptionClass; 3] = [
    ConsumptionClass::Residential,
    ConsumptionClass::Industrial,
    ConsumptionClass::Commercial,
];

const ELIGIBLE_TARIFF_MODALITIES: [TariffModality; 2] =
    [TariffModality::White, TariffModality::Conventional];

pub(crate) fn check_consumption_class(
    consumption_class: ConsumptionClass,
) -> Option<IneligibilityReason> {
    (!ELIGIBLE_CONSUMPTION_CLASSES.contains(&consumption_class))
        .then_some(IneligibilityReason::ForbiddenConsumptionClass)
}

pub(crate) fn check_tariff_modality(
    tariff_modality: TariffModality,
) -> Option<IneligibilityReason> {
    (!ELIGIBLE_TARIFF_MODALITIES.contains(&tariff_modality))
        .then_some(IneligibilityReason::ForbiddenTariffModality)
}

/// An average equal to the minimum is still too low.
pub(crate) fn check_consumption_history(
    connection_type: ConnectionType,
    history: &ConsumptionHistory,
    thresholds: &ThresholdTable,
) -> Option<IneligibilityReason> {
    let minimum = f64::from(thresholds.minimum_for(connection_type));
    (minimum >= history.average_kwh()).then_some(IneligibilityReason::LowConsumption)
}

/// Runs every check, in order, and keeps each triggered reason.
pub(crate) fn collect_reasons(
    request: &EligibilityRequest,
    thresholds: &ThresholdTable,
) -> Vec<IneligibilityReason> {
    [
        check_consumption_class(request.consumption_class),
        check_tariff_modality(request.tariff_modality),
        check_consumption_history(
            request.connection_type,
            &request.consumption_history,
            thresholds,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Savings over the supplied periods, not extrapolated to twelve months.
pub fn annual_co2_savings(history: &ConsumptionHistory) -> f64 {
    f64::from(history.total_kwh()) * CO2_EMISSION_FACTOR_KG_PER_KWH
}

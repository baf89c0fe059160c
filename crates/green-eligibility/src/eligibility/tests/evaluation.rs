use super::common::*;
use crate::eligibility::domain::{ConnectionType, ConsumptionClass, TariffModality};
use crate::eligibility::{
    annual_co2_savings, EligibilityEvaluator, EligibilityVerdict, IneligibilityReason,
    ThresholdTable, CO2_EMISSION_FACTOR_KG_PER_KWH,
};
use serde_json::json;

#[test]
fn engine_approves_reference_commercial_customer() {
    let verdict = evaluator().evaluate(&reference_request());

    assert_eq!(
        verdict,
        EligibilityVerdict::Eligible {
            annual_co2_savings: 5553.240000000001
        }
    );
}

#[test]
fn engine_rejects_forbidden_consumption_class() {
    let mut request = reference_request();
    request.consumption_class = ConsumptionClass::Rural;

    let verdict = evaluator().evaluate(&request);

    assert_eq!(
        verdict.reasons(),
        &[IneligibilityReason::ForbiddenConsumptionClass]
    );
    assert_eq!(verdict.annual_co2_savings(), None);
}

#[test]
fn engine_rejects_forbidden_tariff_modality() {
    let mut request = reference_request();
    request.tariff_modality = TariffModality::Blue;

    let verdict = evaluator().evaluate(&request);

    assert_eq!(
        verdict.reasons(),
        &[IneligibilityReason::ForbiddenTariffModality]
    );
}

#[test]
fn engine_rejects_low_single_phase_consumption() {
    let mut request = reference_request();
    request.connection_type = ConnectionType::SinglePhase;
    request.consumption_history = history(&[100; 8]);

    let verdict = evaluator().evaluate(&request);

    assert_eq!(verdict.reasons(), &[IneligibilityReason::LowConsumption]);
}

#[test]
fn engine_approves_three_phase_customer_above_minimum() {
    let mut request = reference_request();
    request.connection_type = ConnectionType::ThreePhase;
    request.consumption_history = history(&THREE_PHASE_HISTORY);

    let verdict = evaluator().evaluate(&request);

    assert_eq!(verdict.annual_co2_savings(), Some(5549.04));
}

#[test]
fn engine_reports_every_violated_rule_in_check_order() {
    let mut request = flat_request(ConnectionType::ThreePhase, 10);
    request.consumption_class = ConsumptionClass::PublicAuthorities;
    request.tariff_modality = TariffModality::Green;

    let verdict = evaluator().evaluate(&request);

    assert_eq!(
        verdict.reasons(),
        &[
            IneligibilityReason::ForbiddenConsumptionClass,
            IneligibilityReason::ForbiddenTariffModality,
            IneligibilityReason::LowConsumption,
        ]
    );
    assert!(!verdict.is_eligible());
}

#[test]
fn engine_does_not_short_circuit_after_first_failure() {
    let mut request = flat_request(ConnectionType::SinglePhase, 50);
    request.consumption_class = ConsumptionClass::Rural;

    let verdict = evaluator().evaluate(&request);

    assert_eq!(
        verdict.reasons(),
        &[
            IneligibilityReason::ForbiddenConsumptionClass,
            IneligibilityReason::LowConsumption,
        ]
    );
}

#[test]
fn engine_treats_average_equal_to_minimum_as_too_low() {
    for (connection_type, minimum) in [
        (ConnectionType::SinglePhase, 400),
        (ConnectionType::TwoPhase, 500),
        (ConnectionType::ThreePhase, 750),
    ] {
        let at_minimum = evaluator().evaluate(&flat_request(connection_type, minimum));
        assert_eq!(
            at_minimum.reasons(),
            &[IneligibilityReason::LowConsumption],
            "{connection_type:?} at {minimum} kWh"
        );

        let above_minimum = evaluator().evaluate(&flat_request(connection_type, minimum + 1));
        assert!(
            above_minimum.is_eligible(),
            "{connection_type:?} at {} kWh",
            minimum + 1
        );
    }
}

#[test]
fn engine_compares_fractional_averages() {
    let mut request = reference_request();
    request.connection_type = ConnectionType::SinglePhase;
    request.consumption_history = history(&[400, 400, 401]);

    assert!(evaluator().evaluate(&request).is_eligible());
}

#[test]
fn accepted_classes_and_modalities_pass_their_checks() {
    for consumption_class in [
        ConsumptionClass::Residential,
        ConsumptionClass::Industrial,
        ConsumptionClass::Commercial,
    ] {
        for tariff_modality in [TariffModality::White, TariffModality::Conventional] {
            let mut request = reference_request();
            request.consumption_class = consumption_class;
            request.tariff_modality = tariff_modality;
            assert!(evaluator().evaluate(&request).is_eligible());
        }
    }
}

#[test]
fn savings_use_the_raw_sum_of_supplied_periods() {
    let short = history(&[100, 200, 300]);
    let long = history(&[50; 12]);

    assert_eq!(
        annual_co2_savings(&short),
        600.0 * CO2_EMISSION_FACTOR_KG_PER_KWH
    );
    assert_eq!(annual_co2_savings(&short), annual_co2_savings(&long));
}

#[test]
fn engine_is_idempotent() {
    let engine = evaluator();
    let request = reference_request();

    assert_eq!(engine.evaluate(&request), engine.evaluate(&request));
}

#[test]
fn custom_thresholds_change_only_the_consumption_check() {
    let strict = EligibilityEvaluator::new(
        ThresholdTable::default().with_minimum(ConnectionType::TwoPhase, 6000),
    );

    let verdict = strict.evaluate(&reference_request());

    assert_eq!(verdict.reasons(), &[IneligibilityReason::LowConsumption]);
    assert_eq!(strict.thresholds().minimum_for(ConnectionType::SinglePhase), 400);
}

#[test]
fn verdicts_serialize_with_exclusive_fields() {
    let eligible = evaluator().evaluate(&reference_request());
    assert_eq!(
        serde_json::to_value(&eligible).expect("serializes"),
        json!({ "eligible": true, "anualCO2Savings": 5553.240000000001 })
    );
    assert!(serde_json::to_string(&eligible)
        .expect("serializes")
        .contains("5553.240000000001"));

    let mut request = reference_request();
    request.consumption_class = ConsumptionClass::Rural;
    let ineligible = evaluator().evaluate(&request);
    assert_eq!(
        serde_json::to_value(&ineligible).expect("serializes"),
        json!({
            "eligible": false,
            "ineligibilityReason": ["Classe de consumo não aceita"],
        })
    );
}

#[test]
fn verdicts_reject_mixed_wire_shapes() {
    let parsed: EligibilityVerdict = serde_json::from_value(json!({
        "eligible": false,
        "ineligibilityReason": ["low-consumption"],
    }))
    .expect("reason codes accepted as aliases");
    assert_eq!(parsed.reasons(), &[IneligibilityReason::LowConsumption]);

    let mixed = serde_json::from_value::<EligibilityVerdict>(json!({
        "eligible": true,
        "anualCO2Savings": 1.0,
        "ineligibilityReason": ["Classe de consumo não aceita"],
    }));
    assert!(mixed.is_err());

    let empty = serde_json::from_value::<EligibilityVerdict>(json!({
        "eligible": false,
        "ineligibilityReason": [],
    }));
    assert!(empty.is_err());
}

#[test]
fn summary_lists_reason_codes() {
    let verdict = EligibilityVerdict::Ineligible {
        reasons: vec![
            IneligibilityReason::ForbiddenTariffModality,
            IneligibilityReason::LowConsumption,
        ],
    };

    assert_eq!(
        verdict.summary(),
        "ineligible: forbidden-tariff-modality, low-consumption"
    );
}

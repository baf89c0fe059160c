use crate::infra::eligibility_service;
use clap::Args;
use green_eligibility::config::AppConfig;
use green_eligibility::eligibility::{
    BatchEvaluator, CheckEligibilityPayload, EligibilityService, EligibilityVerdict,
};
use green_eligibility::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// CPF (11 digits) or CNPJ (14 digits) of the customer
    #[arg(long)]
    pub(crate) document: String,
    /// Connection type: monofasico, bifasico or trifasico
    #[arg(long)]
    pub(crate) connection_type: String,
    /// Consumption class: residencial, industrial, comercial, rural or poderPublico
    #[arg(long)]
    pub(crate) consumption_class: String,
    /// Tariff modality: azul, branca, verde or convencional
    #[arg(long)]
    pub(crate) tariff_modality: String,
    /// Billing-period consumption in kWh, comma separated (3 to 12 values)
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        required = true
    )]
    pub(crate) history: Vec<i64>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with documentNumber, connectionType, consumptionClass, tariffModality and
    /// consumptionHistory columns (history values separated by ';')
    pub(crate) path: PathBuf,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        document,
        connection_type,
        consumption_class,
        tariff_modality,
        history,
    } = args;

    let service = eligibility_service(&AppConfig::load()?);
    let payload = CheckEligibilityPayload::from_parts(
        document,
        connection_type,
        consumption_class,
        tariff_modality,
        &history,
    );

    let submission = payload.validate()?;
    let verdict = service.decide(&submission);
    println!("{}", render_verdict(&verdict));
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = eligibility_service(&AppConfig::load()?);
    let report = BatchEvaluator::new(&service).evaluate_path(&args.path)?;

    println!("Eligibility batch: {}", args.path.display());
    for entry in &report.entries {
        match &entry.outcome {
            Ok(verdict) => println!("- row {}: {}", entry.row, verdict.summary()),
            Err(rejection) => println!(
                "- row {}: rejected ({})",
                entry.row,
                rejection.messages().join("; ")
            ),
        }
    }

    println!(
        "\n{} eligible | {} ineligible | {} rejected",
        report.eligible(),
        report.ineligible(),
        report.rejected()
    );
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let service = EligibilityService::default();

    println!("Renewable-energy eligibility demo (default thresholds)");
    for (label, payload) in demo_customers() {
        println!("\n{label}");
        match payload.validate() {
            Ok(submission) => {
                let verdict = service.decide(&submission);
                println!("  Verdict: {}", verdict.summary());
                println!("  Response payload: {}", render_verdict(&verdict));
            }
            Err(rejection) => {
                println!("  Rejected at intake:");
                for message in rejection.messages() {
                    println!("    - {message}");
                }
            }
        }
    }

    Ok(())
}

fn render_verdict(verdict: &EligibilityVerdict) -> String {
    serde_json::to_string_pretty(verdict)
        .unwrap_or_else(|err| format!("response payload unavailable: {err}"))
}

fn demo_customers() -> Vec<(&'static str, CheckEligibilityPayload)> {
    const REFERENCE_HISTORY: [i64; 12] = [
        3878, 9760, 5976, 2797, 2481, 5731, 7538, 4392, 7859, 4160, 6941, 4597,
    ];
    const THREE_PHASE_HISTORY: [i64; 12] = [
        3878, 9760, 5976, 2797, 2481, 8000, 7538, 4392, 7859, 4160, 3219, 6000,
    ];

    vec![
        (
            "Two-phase commercial customer on the conventional tariff",
            CheckEligibilityPayload::from_parts(
                "14041737706",
                "bifasico",
                "comercial",
                "convencional",
                &REFERENCE_HISTORY,
            ),
        ),
        (
            "Same customer registered as rural",
            CheckEligibilityPayload::from_parts(
                "14041737706",
                "bifasico",
                "rural",
                "convencional",
                &REFERENCE_HISTORY,
            ),
        ),
        (
            "Same customer on the blue tariff",
            CheckEligibilityPayload::from_parts(
                "14041737706",
                "bifasico",
                "comercial",
                "azul",
                &REFERENCE_HISTORY,
            ),
        ),
        (
            "Single-phase customer averaging 100 kWh",
            CheckEligibilityPayload::from_parts(
                "10237481000101",
                "monofasico",
                "comercial",
                "convencional",
                &[100; 8],
            ),
        ),
        (
            "Three-phase commercial customer",
            CheckEligibilityPayload::from_parts(
                "10237481000101",
                "trifasico",
                "comercial",
                "convencional",
                &THREE_PHASE_HISTORY,
            ),
        ),
        (
            "Malformed request (short document, two periods)",
            CheckEligibilityPayload::from_parts(
                "1404173770",
                "bifasico",
                "comercial",
                "convencional",
                &[3878, 9760],
            ),
        ),
    ]
}

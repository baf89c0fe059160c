use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::intake::{CheckEligibilityPayload, RequestRejection};
use super::service::EligibilityService;
use super::EligibilityVerdict;

const HISTORY_SEPARATOR: char = ';';
const REQUIRED_COLUMNS: [&str; 5] = [
    "documentNumber",
    "connectionType",
    "consumptionClass",
    "tariffModality",
    "consumptionHistory",
];

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch CSV header is missing the `{0}` column")]
    MissingColumn(&'static str),
}

/// One evaluated CSV row. `row` counts data rows from 1, excluding the header.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub row: usize,
    pub outcome: Result<EligibilityVerdict, RequestRejection>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn eligible(&self) -> usize {
        self.count(|outcome| matches!(outcome, Ok(verdict) if verdict.is_eligible()))
    }

    pub fn ineligible(&self) -> usize {
        self.count(|outcome| matches!(outcome, Ok(verdict) if !verdict.is_eligible()))
    }

    pub fn rejected(&self) -> usize {
        self.count(Result::is_err)
    }

    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Result<EligibilityVerdict, RequestRejection>) -> bool,
    {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

/// Evaluates CSV exports of customer requests through the same intake as the HTTP route.
///
/// A row that cannot be read as a request is recorded as rejected; only an unreadable
/// source or header fails the batch.
pub struct BatchEvaluator<'a> {
    service: &'a EligibilityService,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(service: &'a EligibilityService) -> Self {
        Self { service }
    }

    pub fn evaluate_path<P: AsRef<Path>>(&self, path: P) -> Result<BatchReport, BatchError> {
        let file = std::fs::File::open(path)?;
        self.evaluate_reader(file)
    }

    pub fn evaluate_reader<R: Read>(&self, reader: R) -> Result<BatchReport, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        if let Some(column) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|header| header == *column))
        {
            return Err(BatchError::MissingColumn(column));
        }

        let mut report = BatchReport::default();
        for (index, record) in csv_reader.deserialize::<BatchRow>().enumerate() {
            let outcome = match record {
                Ok(row) => row
                    .into_payload()
                    .validate()
                    .map(|submission| self.service.decide(&submission)),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => Err(RequestRejection::malformed_body(err.to_string())),
            };

            report.entries.push(BatchEntry {
                row: index + 1,
                outcome,
            });
        }

        Ok(report)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    document_number: String,
    connection_type: String,
    consumption_class: String,
    tariff_modality: String,
    consumption_history: String,
}

impl BatchRow {
    fn into_payload(self) -> CheckEligibilityPayload {
        CheckEligibilityPayload {
            document_number: Value::String(self.document_number),
            connection_type: Value::String(self.connection_type),
            consumption_class: Value::String(self.consumption_class),
            tariff_modality: Value::String(self.tariff_modality),
            consumption_history: parse_history_cell(&self.consumption_history),
        }
    }
}

/// Unparseable samples stay as strings so intake reports them as non-integers.
fn parse_history_cell(cell: &str) -> Value {
    let samples = cell
        .split(HISTORY_SEPARATOR)
        .map(str::trim)
        .filter(|sample| !sample.is_empty())
        .map(|sample| match sample.parse::<i64>() {
            Ok(kwh) => Value::from(kwh),
            Err(_) => Value::String(sample.to_string()),
        })
        .collect();
    Value::Array(samples)
}

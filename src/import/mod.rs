mod parser;

use crate::roi::{CalculationRecord, ProcessSubmission, RoiCalculator, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read process sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid process CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// A row that failed validation, with every problem found on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub submissions: Vec<ProcessSubmission>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportOutcome {
    /// Runs every accepted submission through the calculator, in file order.
    pub fn evaluate(
        &self,
        calculator: &RoiCalculator,
        calculated_at: DateTime<Utc>,
    ) -> Vec<CalculationRecord> {
        self.submissions
            .iter()
            .map(|submission| {
                calculator.evaluate(
                    submission.input.clone(),
                    submission.profile.clone(),
                    submission.benefits,
                    calculated_at,
                )
            })
            .collect()
    }
}

/// Reads a sheet of process forms, one per row, keyed by the header names.
pub struct ProcessImporter;

impl ProcessImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportOutcome, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportOutcome, ImportError> {
        let mut outcome = ImportOutcome::default();

        for row in parser::parse_rows(reader)? {
            match row.form.into_submission() {
                Ok(submission) => outcome.submissions.push(submission),
                Err(errors) => {
                    debug!(line = row.line, errors = errors.len(), "rejected process row");
                    outcome.rejected.push(RejectedRow {
                        line: row.line,
                        errors,
                    });
                }
            }
        }

        if !outcome.rejected.is_empty() {
            warn!(
                accepted = outcome.submissions.len(),
                rejected = outcome.rejected.len(),
                "process import finished with rejected rows"
            );
        }

        Ok(outcome)
    }
}

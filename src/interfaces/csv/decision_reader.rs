use crate::domain::intent::{Decision, Intent};
use crate::domain::loan::LoanId;
use crate::error::{AdminError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a batch decision file: `loan_id,decision`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct DecisionRecord {
    pub loan_id: LoanId,
    pub decision: Decision,
}

impl DecisionRecord {
    pub fn into_intent(self) -> Intent {
        Intent::decision(self.loan_id, self.decision)
    }
}

/// Reads approve/reject decisions from a CSV source.
///
/// Whitespace around fields is trimmed and rows may carry extra columns.
pub struct DecisionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DecisionReader<R> {
    /// Expects a `loan_id,decision` header row.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes the rows. A malformed row yields an error and does
    /// not stop the iteration.
    pub fn decisions(self) -> impl Iterator<Item = Result<DecisionRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(AdminError::from))
    }
}

//! Replay driver.
//!
//! Reads an event log line by line, validates each record, and applies the
//! accepted events to the ledger in file order.

use crate::config::LedgerConfig;
use crate::error::{Rejection, Result};
use crate::ledger::{ApplyOutcome, ExposureLedger};
use crate::report::ExposureReport;
use crate::validator::EventValidator;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

/// The exposure replay engine.
///
/// Owns the validator and the ledger for one run. Rejected records are
/// logged at warn level, counted, and skipped; they never abort the run.
pub struct ExposureEngine {
    validator: EventValidator,
    ledger: ExposureLedger,

    /// Rejection counts keyed by [`crate::Rejection::code`].
    rejections: BTreeMap<&'static str, usize>,
}

impl ExposureEngine {
    /// Creates an engine with empty state.
    pub fn new(config: LedgerConfig) -> Self {
        ExposureEngine {
            validator: EventValidator::new(&config),
            ledger: ExposureLedger::new(),
            rejections: BTreeMap::new(),
        }
    }

    /// Processes every line from a reader, one JSON record per line.
    ///
    /// A line that is not valid UTF-8 is skipped as unparsable. Only read
    /// failures end processing early.
    pub fn process_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let reader = BufReader::new(reader);

        for (idx, line) in reader.split(b'\n').enumerate() {
            let mut bytes = line?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            match std::str::from_utf8(&bytes) {
                Ok(raw) => {
                    self.process_line(raw, idx + 1);
                }
                Err(_) => {
                    self.skip(Rejection::Unparsable, &String::from_utf8_lossy(&bytes), idx + 1);
                }
            }
        }

        Ok(())
    }

    /// Validates and applies a single raw record.
    ///
    /// Returns the ledger outcome, or `None` if the record was skipped.
    pub fn process_line(&mut self, raw: &str, line_no: usize) -> Option<ApplyOutcome> {
        match self.validator.validate(raw) {
            Ok(event) => {
                let outcome = self.ledger.apply(&event);
                debug!("Line {}: {} -> {:?}", line_no, event.kind, outcome);
                Some(outcome)
            }
            Err(rejection) => {
                self.skip(rejection, raw, line_no);
                None
            }
        }
    }

    fn skip(&mut self, rejection: Rejection, raw: &str, line_no: usize) {
        warn!("Line {}: Skip, {}: {}", line_no, rejection, raw);
        *self.rejections.entry(rejection.code()).or_insert(0) += 1;
        self.ledger.record_skip();
    }

    pub fn ledger(&self) -> &ExposureLedger {
        &self.ledger
    }

    /// Builds the end-of-run report from the current state.
    pub fn report(&self) -> ExposureReport {
        ExposureReport::new(
            self.ledger.state(),
            self.ledger.account_count(),
            &self.rejections,
        )
    }
}

impl Default for ExposureEngine {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

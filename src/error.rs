//! Error types for the exposure ledger.

use thiserror::Error;

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open, read, or write a file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Series CSV writing error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON report serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single input record was skipped.
///
/// Rejections are expected on real input: the record is dropped, counted,
/// and processing continues with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Not a JSON object
    #[error("un-parsable record")]
    Unparsable,

    /// Byte-for-byte repeat of a record already seen in this run
    #[error("resent record")]
    DuplicateRecord,

    /// One of `invoiceId`, `amount`, `eventType`, `timestamp` is absent
    #[error("missing fields")]
    MissingFields,

    #[error("undefined event type {0}")]
    UnknownEventType(String),

    /// Malformed timestamp or a year other than the epoch year
    #[error("error in date {0}")]
    BadTimestamp(String),

    #[error("un-parsable amount {0}")]
    BadAmount(String),
}

impl Rejection {
    /// Stable short code, used as a key when tallying rejections.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Unparsable => "unparsable",
            Rejection::DuplicateRecord => "duplicate-record",
            Rejection::MissingFields => "missing-fields",
            Rejection::UnknownEventType(_) => "unknown-event-type",
            Rejection::BadTimestamp(_) => "bad-timestamp",
            Rejection::BadAmount(_) => "bad-amount",
        }
    }
}

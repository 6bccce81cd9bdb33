//! # Exposure Ledger
//!
//! Replays an append-only log of invoice lifecycle events (registration,
//! late fee, payment) and derives the outstanding credit exposure of a
//! portfolio across one calendar year.
//!
//! ## Design Principles
//!
//! - **Decimal arithmetic**: Amounts use `rust_decimal`; rounding to two
//!   places happens only in the report
//! - **Streaming processing**: One JSON record per line, applied in file order
//! - **Skip, don't fail**: Malformed, duplicated, or out-of-year records are
//!   counted and skipped
//! - **Replay safety**: A byte-identical record is applied at most once, and a
//!   repeated registration for a known invoice is discarded
//!
//! ## Example
//!
//! ```
//! use exposure_ledger::{ExposureEngine, LedgerConfig, Month};
//! use std::io::Cursor;
//!
//! let log = r#"{"invoiceId":"A","amount":100,"eventType":"InvoiceRegistered","timestamp":"2022-01-10T00:00:00"}
//! {"invoiceId":"A","amount":100,"eventType":"PaymentRegistered","timestamp":"2022-01-15T00:00:00"}"#;
//!
//! let mut engine = ExposureEngine::new(LedgerConfig::default());
//! engine.process_reader(Cursor::new(log)).unwrap();
//!
//! let report = engine.report();
//! assert_eq!(report.month(Month::Jan).peak.to_string(), "100.00");
//! assert_eq!(report.month(Month::Jan).end.to_string(), "0.00");
//! assert_eq!(report.skipped, 0);
//! ```

pub mod account;
pub mod amount;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod month;
pub mod report;
pub mod validator;

pub use account::InvoiceAccount;
pub use amount::Amount;
pub use config::{LedgerConfig, DEFAULT_EPOCH_YEAR};
pub use engine::ExposureEngine;
pub use error::{LedgerError, Rejection, Result};
pub use event::{Event, EventKind, EventRecord};
pub use ledger::{ApplyOutcome, Breakpoint, ExposureLedger, PortfolioState};
pub use month::Month;
pub use report::{ExposureReport, MonthlyExposure};
pub use validator::EventValidator;

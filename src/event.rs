//! Event models for JSON parsing and internal representation.

use crate::amount::Amount;
use crate::error::Rejection;
use crate::month::Month;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Raw event record as read from one JSON line.
///
/// Every field is kept as an untyped JSON value so that a record with a
/// wrongly-typed field is reported with the right rejection instead of
/// failing deserialization as a whole. A JSON `null` reads as absent.
#[derive(Debug, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "invoiceId")]
    pub invoice_id: Option<Value>,

    pub amount: Option<Value>,

    #[serde(rename = "eventType")]
    pub event_type: Option<Value>,

    pub timestamp: Option<Value>,
}

impl EventRecord {
    /// Converts the raw record into a typed event.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// field presence, event type, timestamp, amount. An `invoiceId` that is
    /// not a JSON string counts as missing.
    pub fn parse(&self, epoch_year: i32) -> Result<Event, Rejection> {
        let (Some(invoice_id), Some(amount), Some(event_type), Some(timestamp)) = (
            self.invoice_id.as_ref().and_then(Value::as_str),
            &self.amount,
            &self.event_type,
            &self.timestamp,
        ) else {
            return Err(Rejection::MissingFields);
        };

        let kind = event_type
            .as_str()
            .and_then(EventKind::from_wire)
            .ok_or_else(|| Rejection::UnknownEventType(display_value(event_type)))?;

        let month = timestamp
            .as_str()
            .and_then(|ts| parse_month(ts, epoch_year))
            .ok_or_else(|| Rejection::BadTimestamp(display_value(timestamp)))?;

        let amount = parse_amount(amount).ok_or_else(|| Rejection::BadAmount(display_value(amount)))?;

        Ok(Event {
            kind,
            invoice_id: invoice_id.to_owned(),
            amount,
            month,
        })
    }
}

/// Extracts the month from a `<date>T<time>` timestamp.
///
/// Returns `None` unless there is exactly one `T` separator, the date part
/// is a valid `YYYY-MM-DD` calendar date, and its year is `epoch_year`.
/// The time part is not interpreted.
pub fn parse_month(timestamp: &str, epoch_year: i32) -> Option<Month> {
    let mut parts = timestamp.split('T');
    let (Some(date), Some(_time), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    if date.year() != epoch_year {
        return None;
    }

    Month::from_number(date.month())
}

/// Coerces a JSON number or numeric string into an [`Amount`] no larger
/// in magnitude than [`Amount::MAX_INPUT_UNITS`].
fn parse_amount(value: &Value) -> Option<Amount> {
    let amount = match value {
        Value::Number(n) => Amount::from_str(&n.to_string()).ok(),
        Value::String(s) => Amount::from_str(s).ok(),
        _ => None,
    }?;
    amount.is_within_input_limit().then_some(amount)
}

/// Strings render verbatim, everything else as its JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The three recognized invoice lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Opens an invoice account with its initial amount.
    InvoiceRegistered,

    /// Adds a late fee to an existing invoice.
    LateFeeRegistered,

    /// Records a payment against an existing invoice.
    PaymentRegistered,
}

impl EventKind {
    /// Resolves the `eventType` wire value. Matching is exact.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "InvoiceRegistered" => Some(EventKind::InvoiceRegistered),
            "LateFeeRegistered" => Some(EventKind::LateFeeRegistered),
            "PaymentRegistered" => Some(EventKind::PaymentRegistered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::InvoiceRegistered => "InvoiceRegistered",
            EventKind::LateFeeRegistered => "LateFeeRegistered",
            EventKind::PaymentRegistered => "PaymentRegistered",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated event ready to be applied to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,

    /// Ledger key of the invoice this event refers to.
    pub invoice_id: String,

    /// Meaning depends on `kind`: invoiced amount, fee, or payment.
    pub amount: Amount,

    /// Month bucket derived from the timestamp.
    pub month: Month,
}

impl Event {
    pub fn new(kind: EventKind, invoice_id: impl Into<String>, amount: Amount, month: Month) -> Self {
        Event {
            kind,
            invoice_id: invoice_id.into(),
            amount,
            month,
        }
    }
}

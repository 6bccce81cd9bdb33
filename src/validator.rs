//! Record validation and replay detection.

use crate::config::LedgerConfig;
use crate::error::Rejection;
use crate::event::{Event, EventRecord};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Turns raw record lines into validated [`Event`]s.
///
/// The only state is the set of raw records already seen, which guards
/// against an upstream re-sending the identical message. The set lives for
/// the whole run and is never pruned.
pub struct EventValidator {
    epoch_year: i32,
    seen: HashSet<String>,
}

impl EventValidator {
    pub fn new(config: &LedgerConfig) -> Self {
        EventValidator {
            epoch_year: config.epoch_year,
            seen: HashSet::new(),
        }
    }

    /// Validates one raw record.
    ///
    /// A record that parses as a JSON object is remembered for replay
    /// detection before its fields are checked, so a repeat of a record
    /// rejected for its content is reported as a duplicate.
    pub fn validate(&mut self, raw: &str) -> Result<Event, Rejection> {
        let object: Map<String, Value> =
            serde_json::from_str(raw).map_err(|_| Rejection::Unparsable)?;

        if !self.seen.insert(raw.to_owned()) {
            return Err(Rejection::DuplicateRecord);
        }

        let record: EventRecord =
            serde_json::from_value(Value::Object(object)).map_err(|_| Rejection::Unparsable)?;

        record.parse(self.epoch_year)
    }

    /// Number of distinct records remembered so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::month::Month;

    const REGISTER_A: &str = r#"{"invoiceId":"A","amount":100,"eventType":"InvoiceRegistered","timestamp":"2022-01-10T00:00:00"}"#;

    fn validator() -> EventValidator {
        EventValidator::new(&LedgerConfig::default())
    }

    #[test]
    fn test_valid_record() {
        let event = validator().validate(REGISTER_A).unwrap();
        assert_eq!(event.kind, EventKind::InvoiceRegistered);
        assert_eq!(event.month, Month::Jan);
    }

    #[test]
    fn test_unparsable_records() {
        let mut v = validator();
        for raw in ["", "   ", "not json", "{\"invoiceId\":", "[1,2,3,4]", "42", "\"s\""] {
            assert_eq!(v.validate(raw), Err(Rejection::Unparsable), "input {raw:?}");
        }
        assert_eq!(v.seen_count(), 0);
    }

    #[test]
    fn test_replay_is_rejected_once_seen() {
        let mut v = validator();
        assert!(v.validate(REGISTER_A).is_ok());
        assert_eq!(v.validate(REGISTER_A), Err(Rejection::DuplicateRecord));
        assert_eq!(v.validate(REGISTER_A), Err(Rejection::DuplicateRecord));
        assert_eq!(v.seen_count(), 1);
    }

    #[test]
    fn test_replay_key_is_raw_text_not_invoice() {
        let mut v = validator();
        let spaced = r#"{"invoiceId":"A", "amount":100,"eventType":"InvoiceRegistered","timestamp":"2022-01-10T00:00:00"}"#;
        assert!(v.validate(REGISTER_A).is_ok());
        assert!(v.validate(spaced).is_ok());
    }

    #[test]
    fn test_rejected_record_still_counts_for_replay() {
        let mut v = validator();
        let raw = r#"{"invoiceId":"A","eventType":"InvoiceRegistered"}"#;
        assert_eq!(v.validate(raw), Err(Rejection::MissingFields));
        assert_eq!(v.validate(raw), Err(Rejection::DuplicateRecord));
    }

    #[test]
    fn test_wrong_year_is_bad_timestamp() {
        let raw = r#"{"invoiceId":"A","amount":100,"eventType":"InvoiceRegistered","timestamp":"2021-05-01T00:00:00"}"#;
        assert!(matches!(validator().validate(raw), Err(Rejection::BadTimestamp(_))));
    }

    #[test]
    fn test_epoch_year_is_configurable() {
        let raw = r#"{"invoiceId":"A","amount":100,"eventType":"InvoiceRegistered","timestamp":"2021-05-01T00:00:00"}"#;
        let mut v = EventValidator::new(&LedgerConfig { epoch_year: 2021 });
        assert_eq!(v.validate(raw).unwrap().month, Month::May);
        assert!(matches!(
            v.validate(REGISTER_A),
            Err(Rejection::BadTimestamp(_))
        ));
    }

    #[test]
    fn test_bad_amount() {
        let raw = r#"{"invoiceId":"B","amount":"x","eventType":"InvoiceRegistered","timestamp":"2022-02-01T00:00:00"}"#;
        assert_eq!(
            validator().validate(raw),
            Err(Rejection::BadAmount("x".to_string()))
        );
    }
}

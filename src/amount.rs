//! Monetary amount type backed by `rust_decimal`.
//!
//! Amounts keep full precision while the ledger accumulates them, with
//! trailing zeros dropped after every operation; rounding to
//! [`Amount::REPORT_SCALE`] places happens only when a report is derived.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A currency amount.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use exposure_ledger::Amount;
///
/// let amount = Amount::from_str("10.005").unwrap();
/// assert_eq!(amount.rounded().to_string(), "10.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Decimal places shown in reports.
    pub const REPORT_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Largest magnitude, in whole currency units, accepted from a record.
    pub const MAX_INPUT_UNITS: i64 = 1_000_000_000_000_000;

    pub fn new(value: Decimal) -> Self {
        Amount(value.normalize())
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if `|self|` is at most [`Self::MAX_INPUT_UNITS`].
    pub fn is_within_input_limit(&self) -> bool {
        self.0.abs() <= Decimal::from(Self::MAX_INPUT_UNITS)
    }

    /// Addition that reports overflow instead of saturating.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(|d| Amount(d.normalize()))
    }

    /// Subtraction that reports overflow instead of saturating.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(|d| Amount(d.normalize()))
    }

    /// Rounds to [`Self::REPORT_SCALE`] places (banker's rounding) and pads
    /// so that the value always displays with exactly that many digits.
    pub fn rounded(&self) -> Self {
        let mut value = self.0.round_dp(Self::REPORT_SCALE);
        value.rescale(Self::REPORT_SCALE);
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    /// Accepts plain (`"12.5"`) and scientific (`"1.25e1"`) notation.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = match Decimal::from_str(trimmed) {
            Ok(decimal) => decimal,
            Err(plain_err) => Decimal::from_scientific(trimmed).map_err(|_| plain_err)?,
        };
        Ok(Amount(decimal.normalize()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Operators saturate at the decimal range rather than panic. Input amounts are
// capped by `MAX_INPUT_UNITS`, so a replay never gets near the bounds.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0).normalize())
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0).normalize();
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0).normalize())
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0).normalize();
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

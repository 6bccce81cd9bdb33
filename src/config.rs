//! Run configuration.

/// Epoch year of the reference deployment.
pub const DEFAULT_EPOCH_YEAR: i32 = 2022;

/// Business settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Only events dated in this calendar year are accepted.
    pub epoch_year: i32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            epoch_year: DEFAULT_EPOCH_YEAR,
        }
    }
}

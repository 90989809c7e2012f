use chrono::NaiveDate;
use thiserror::Error;

/// Problems found while deriving attendance figures.
///
/// None of these abort a month: bad days degrade to zero hours with a flag,
/// a bad window degrades to zeroed metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DerivationError {
    #[error("Malformed time input: {0}")]
    MalformedTimeInput(String),

    #[error("Inconsistent attendance record for {employee_id} on {date}: check-out without check-in")]
    InconsistentRecord { employee_id: String, date: NaiveDate },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type DerivationResult<T> = Result<T, DerivationError>;

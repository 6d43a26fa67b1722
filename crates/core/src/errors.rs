use thiserror::Error;

/// Unified error type for the entire portfolio-returns-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    // ── Price Lookup ────────────────────────────────────────────────
    #[error("No price observation for {symbol} on or before {date}")]
    NoPriorObservation { symbol: String, date: String },

    // ── Dates ───────────────────────────────────────────────────────
    #[error("Invalid date '{input}': {reason}")]
    InvalidDateFormat { input: String, reason: String },

    #[error("Invalid date range: start ({start}) and end ({end}) span zero time")]
    InvalidDateRange { start: String, end: String },

    // ── Arithmetic ──────────────────────────────────────────────────
    #[error("Annualized return from {start} to {end} is not a finite number")]
    NonFiniteReturn { start: String, end: String },

    // ── Configuration / Input ───────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

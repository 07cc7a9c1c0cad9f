//! Error taxonomy for the advisory core
//!
//! - `InvalidHumidity` / `InvalidTemperature`: input validation. Recoverable;
//!   the caller shows a message and skips the reading.
//! - `Calculation`: the empirical formulas produced a non-finite value.
//!   Recoverable but worth logging.
//! - `Configuration`: bad calibration, thresholds or capacity. Raised at
//!   construction time, never per call.

use thiserror::Error;

/// Errors produced by the Delta T engine, classifier, chart mapper and history store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisoryError {
    /// Relative humidity outside [0, 100] (or not a number)
    #[error("relative humidity must be between 0 and 100%, got {value}")]
    InvalidHumidity {
        /// Rejected humidity value
        value: f64,
    },

    /// Dry-bulb temperature outside the configured calculation domain
    #[error("dry-bulb temperature {value}°C outside the expected range ({min} to {max}°C)")]
    InvalidTemperature {
        /// Rejected temperature
        value: f64,
        /// Domain lower bound
        min: f64,
        /// Domain upper bound
        max: f64,
    },

    /// Arithmetic failure inside an empirical approximation
    #[error("calculation failed for {quantity}: {detail}")]
    Calculation {
        /// Which derived quantity failed (e.g. "wet bulb")
        quantity: &'static str,
        /// What went wrong
        detail: String,
    },

    /// Precondition violated when building a component
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl AdvisoryError {
    /// Whether the error is about one reading (skip it) rather than the setup (fail fast).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AdvisoryError::InvalidHumidity { .. } | AdvisoryError::InvalidTemperature { .. }
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AdvisoryError>;

//! Injectable reading sources
//!
//! The session pulls readings through [`DataSource`] so a live station
//! client, a replay fixture and the simulator are interchangeable, and tests
//! never depend on randomness or the network.

pub mod fixture;
pub mod simulated;

pub use fixture::FixtureSource;
pub use simulated::{SimulatedSource, SimulationRanges};

use crate::core_types::reading::SensorReading;
use thiserror::Error;

/// Why a source could not deliver a reading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// A finite source has nothing left to give
    #[error("data source exhausted")]
    Exhausted,
    /// The upstream station or API could not be reached
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

/// Port for anything that produces station readings
pub trait DataSource {
    /// Fetch the next reading
    ///
    /// # Errors
    /// Returns a `SourceError` when no reading can be produced.
    fn fetch(&mut self) -> Result<SensorReading, SourceError>;

    /// Human-readable name for logs
    fn name(&self) -> &str;
}

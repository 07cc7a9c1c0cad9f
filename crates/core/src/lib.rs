//! Spray Advisory Core Library
//!
//! Turns farm weather station readings into pesticide spray advice. The
//! central quantity is Delta T (dry bulb minus wet bulb), which together with
//! wind speed and a two-height inversion check decides whether conditions
//! are suitable for spraying.
//!
//! ## Pipeline
//!
//! - [`physics`]: Stull wet bulb, Delta T, dew point and feels-like temperature
//! - [`advisory`]: Delta T, wind and inversion categories with advice text
//! - [`chart`]: pixel position of a reading on the reference Delta T chart
//! - [`history`]: bounded per-session history with trail and trend views
//! - [`source`]: fixture and simulated reading sources
//! - [`session`]: ties the above together for one station

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Calculation and classification
pub mod advisory;
pub mod chart;
pub mod physics;

// Session state and inputs
pub mod history;
pub mod session;
pub mod source;

// Re-export core types
pub use core_types::{
    Celsius, CelsiusDelta, Degrees, Hectopascals, KilometersPerHour, Percent, SensorReading,
};
pub use error::{AdvisoryError, Result};

// Re-export the pipeline
pub use advisory::{
    ConditionClassifier, DeltaTCategory, DerivedMetrics, InversionStatus, SprayAssessment,
    WindCondition,
};
pub use chart::{map_to_pixel, ChartCalibration, PixelPoint};
pub use config::AdvisorConfig;
pub use history::{HistoryRecord, HistoryStore, HistoryWindow, QueryOrder};
pub use physics::{DeltaTEngine, DeltaTResult, TemperatureDomain};
pub use session::{AdvisorySession, SessionError, SessionUpdate};
pub use source::{DataSource, FixtureSource, SimulatedSource, SourceError};

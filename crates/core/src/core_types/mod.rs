//! Core types and utilities

pub mod reading;
pub mod units;

pub use reading::SensorReading;
pub use units::*;

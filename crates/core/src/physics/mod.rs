//! Psychrometric calculations for spray advisories
//!
//! - [`delta_t`]: Stull wet bulb, Delta T and dew point with input validation
//! - [`feels_like`]: the dashboard's perceived-temperature heuristic, kept
//!   separate so it can be replaced without touching Delta T

pub mod delta_t;
pub mod feels_like;

pub use delta_t::{
    linear_dew_point, stull_wet_bulb, DeltaTEngine, DeltaTResult, TemperatureDomain,
};
pub use feels_like::{ApparentTemperature, DashboardHeuristic};

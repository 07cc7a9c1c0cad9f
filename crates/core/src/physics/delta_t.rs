//! Wet-bulb temperature and Delta T
//!
//! Delta T is the dry-bulb minus wet-bulb temperature and is the standard
//! indicator for pesticide spray conditions: low values mean droplets persist
//! and drift, high values mean they evaporate before reaching the target.
//!
//! # References
//! - Stull, R. (2011). "Wet-Bulb Temperature from Relative Humidity and Air
//!   Temperature." Journal of Applied Meteorology and Climatology, 50(11), 2267-2269

use crate::core_types::reading::SensorReading;
use crate::core_types::units::{Celsius, CelsiusDelta, Percent};
use crate::error::{AdvisoryError, Result};
use crate::physics::feels_like::{ApparentTemperature, DashboardHeuristic};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Valid dry-bulb range for the calculation (inclusive on both ends).
///
/// Station variants disagree on this range: early ones accept -50..60°C,
/// later ones 0..50°C. Both are provided as presets; neither is implied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureDomain {
    /// Lowest accepted dry-bulb temperature (°C)
    pub min: f64,
    /// Highest accepted dry-bulb temperature (°C)
    pub max: f64,
}

impl TemperatureDomain {
    /// -50..60°C, used by the early calculator pages
    pub const WIDE: TemperatureDomain = TemperatureDomain {
        min: -50.0,
        max: 60.0,
    };

    /// 0..50°C, used by the later dashboard pages
    pub const NARROW: TemperatureDomain = TemperatureDomain { min: 0.0, max: 50.0 };

    /// Create a validated domain
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if a bound is not finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let domain = Self { min, max };
        domain.validate()?;
        Ok(domain)
    }

    /// Check the bounds
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if a bound is not finite or `min >= max`.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(AdvisoryError::Configuration(format!(
                "temperature domain bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(AdvisoryError::Configuration(format!(
                "temperature domain min ({}) must be below max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Whether `value` lies inside the domain (NaN never does)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for TemperatureDomain {
    fn default() -> Self {
        Self::WIDE
    }
}

/// Output of one Delta T calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaTResult {
    /// Stull wet-bulb estimate
    pub wet_bulb: Celsius,
    /// Dry bulb minus wet bulb
    pub delta_t: CelsiusDelta,
    /// Linear dew point approximation `t - (100 - rh)/5`
    pub dew_point: Celsius,
    /// Perceived temperature from the configured heuristic
    pub feels_like: Celsius,
}

/// Stull (2011) empirical wet-bulb temperature
///
/// Tw = T×atan(0.151977×(RH + 8.313659)^0.5) + atan(T + RH) - atan(RH - 1.676331)
///      + 0.00391838×RH^1.5×atan(0.023101×RH) - 4.686035
///
/// # Arguments
/// * `t` - Dry-bulb temperature (°C)
/// * `rh` - Relative humidity as a percentage (60 for 60%)
pub fn stull_wet_bulb(t: f64, rh: f64) -> f64 {
    t * (0.151977 * (rh + 8.313659).sqrt()).atan() + (t + rh).atan() - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

/// Simple dew point heuristic (°C). Not Magnus-Tetens.
pub fn linear_dew_point(t: f64, rh: f64) -> f64 {
    t - (100.0 - rh) / 5.0
}

/// Validating Delta T calculator.
///
/// Pure and deterministic: the same inputs always give bit-identical output.
#[derive(Debug, Clone, Default)]
pub struct DeltaTEngine<A: ApparentTemperature = DashboardHeuristic> {
    domain: TemperatureDomain,
    apparent: A,
}

impl DeltaTEngine<DashboardHeuristic> {
    /// Create an engine accepting dry-bulb temperatures inside `domain`
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the domain is invalid.
    pub fn new(domain: TemperatureDomain) -> Result<Self> {
        domain.validate()?;
        Ok(Self {
            domain,
            apparent: DashboardHeuristic,
        })
    }
}

impl<A: ApparentTemperature> DeltaTEngine<A> {
    /// Swap the perceived-temperature model, keeping the domain
    pub fn with_apparent_model<B: ApparentTemperature>(self, apparent: B) -> DeltaTEngine<B> {
        DeltaTEngine {
            domain: self.domain,
            apparent,
        }
    }

    /// Configured dry-bulb domain
    pub fn domain(&self) -> TemperatureDomain {
        self.domain
    }

    /// Compute wet bulb, Delta T, dew point and feels-like temperature.
    ///
    /// # Errors
    /// - `InvalidHumidity` if humidity is outside [0, 100] or NaN
    /// - `InvalidTemperature` if the dry bulb is outside the configured domain or NaN
    /// - `Calculation` if an approximation produces a non-finite value
    pub fn compute(&self, dry_bulb: Celsius, humidity: Percent) -> Result<DeltaTResult> {
        let t = *dry_bulb;
        let rh = *humidity;

        if !(0.0..=100.0).contains(&rh) {
            return Err(AdvisoryError::InvalidHumidity { value: rh });
        }
        if !self.domain.contains(t) {
            return Err(AdvisoryError::InvalidTemperature {
                value: t,
                min: self.domain.min,
                max: self.domain.max,
            });
        }

        let wet_bulb = finite("wet bulb", stull_wet_bulb(t, rh))?;
        let dew_point = finite("dew point", linear_dew_point(t, rh))?;
        let feels_like = finite("feels like", *self.apparent.apparent(dry_bulb, humidity))?;

        Ok(DeltaTResult {
            wet_bulb: Celsius::new(wet_bulb),
            delta_t: CelsiusDelta::new(t - wet_bulb),
            dew_point: Celsius::new(dew_point),
            feels_like: Celsius::new(feels_like),
        })
    }

    /// Compute from a station reading (elevated sensor + humidity)
    ///
    /// # Errors
    /// Same as [`DeltaTEngine::compute`].
    pub fn compute_reading(&self, reading: &SensorReading) -> Result<DeltaTResult> {
        self.compute(reading.upper_temp, reading.humidity)
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        warn!("Non-finite {} result: {}", quantity, value);
        Err(AdvisoryError::Calculation {
            quantity,
            detail: format!("approximation produced {value}"),
        })
    }
}

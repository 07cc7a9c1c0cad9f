//! Seeded weather generator for demos and soak tests
//!
//! Produces a bounded random walk so consecutive readings look like a real
//! station rather than independent noise. The same seed always yields the
//! same sequence.

use crate::core_types::reading::SensorReading;
use crate::core_types::units::{Celsius, Degrees, Hectopascals, KilometersPerHour, Percent};
use crate::error::{AdvisoryError, Result};
use crate::source::{DataSource, SourceError};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Ranges the random walk stays inside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRanges {
    /// Elevated sensor temperature (°C)
    pub temperature: RangeInclusive<f64>,
    /// Relative humidity (%)
    pub humidity: RangeInclusive<f64>,
    /// Mean wind speed (km/h)
    pub wind_speed: RangeInclusive<f64>,
    /// Station pressure (hPa)
    pub pressure: RangeInclusive<f64>,
    /// Largest ground-vs-elevated sensor spread (°C)
    pub max_sensor_spread: f64,
}

impl Default for SimulationRanges {
    fn default() -> Self {
        Self {
            temperature: 15.0..=35.0,
            humidity: 30.0..=95.0,
            wind_speed: 0.0..=20.0,
            pressure: 1005.0..=1025.0,
            max_sensor_spread: 2.0,
        }
    }
}

impl SimulationRanges {
    /// Check every range can be sampled
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if a bound is not finite, a
    /// range is inverted, wind can go negative or the sensor spread is negative.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("wind_speed", &self.wind_speed),
            ("pressure", &self.pressure),
        ];
        for (name, range) in ranges {
            if !range.start().is_finite() || !range.end().is_finite() {
                return Err(AdvisoryError::Configuration(format!(
                    "simulation range {name} must be finite, got {range:?}"
                )));
            }
            if range.start() > range.end() {
                return Err(AdvisoryError::Configuration(format!(
                    "simulation range {name} is inverted: {range:?}"
                )));
            }
        }
        if *self.wind_speed.start() < 0.0 {
            return Err(AdvisoryError::Configuration(format!(
                "simulated wind speed cannot be negative: {:?}",
                self.wind_speed
            )));
        }
        if !(self.max_sensor_spread.is_finite() && self.max_sensor_spread >= 0.0) {
            return Err(AdvisoryError::Configuration(format!(
                "sensor spread must be finite and non-negative, got {}",
                self.max_sensor_spread
            )));
        }
        Ok(())
    }
}

/// Random-walk station simulator
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    rng: StdRng,
    ranges: SimulationRanges,
    interval: Duration,
    next_timestamp: Option<DateTime<Utc>>,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    pressure: f64,
    wind_direction: f64,
}

impl SimulatedSource {
    /// Create a simulator starting at `start`, one reading every `interval`
    pub fn new(seed: u64, start: DateTime<Utc>, interval: Duration) -> Self {
        Self::build(seed, start, interval, SimulationRanges::default())
    }

    /// Create a simulator with custom bounds
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the ranges are invalid.
    pub fn with_ranges(
        seed: u64,
        start: DateTime<Utc>,
        interval: Duration,
        ranges: SimulationRanges,
    ) -> Result<Self> {
        ranges.validate()?;
        Ok(Self::build(seed, start, interval, ranges))
    }

    fn build(
        seed: u64,
        start: DateTime<Utc>,
        interval: Duration,
        ranges: SimulationRanges,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let temperature = rng.random_range(ranges.temperature.clone());
        let humidity = rng.random_range(ranges.humidity.clone());
        let wind_speed = rng.random_range(ranges.wind_speed.clone());
        let pressure = rng.random_range(ranges.pressure.clone());
        let wind_direction = rng.random_range(0.0..360.0);

        Self {
            rng,
            ranges,
            interval,
            next_timestamp: Some(start),
            temperature,
            humidity,
            wind_speed,
            pressure,
            wind_direction,
        }
    }

    fn step(&mut self, value: f64, max_step: f64, range: &RangeInclusive<f64>) -> f64 {
        let delta = self.rng.random_range(-max_step..=max_step);
        (value + delta).clamp(*range.start(), *range.end())
    }
}

impl DataSource for SimulatedSource {
    fn fetch(&mut self) -> std::result::Result<SensorReading, SourceError> {
        // Timestamps past the representable range end the sequence
        let timestamp = self.next_timestamp.ok_or(SourceError::Exhausted)?;
        self.next_timestamp = timestamp.checked_add_signed(self.interval);

        let ranges = self.ranges.clone();
        self.temperature = self.step(self.temperature, 0.8, &ranges.temperature);
        self.humidity = self.step(self.humidity, 3.0, &ranges.humidity);
        self.wind_speed = self.step(self.wind_speed, 1.5, &ranges.wind_speed);
        self.pressure = self.step(self.pressure, 0.4, &ranges.pressure);
        self.wind_direction =
            wrap_degrees(self.wind_direction + self.rng.random_range(-20.0..=20.0));

        let spread = ranges.max_sensor_spread;
        let lower_temp = self.temperature + self.rng.random_range(-spread..=spread);
        let gust = self.wind_speed * self.rng.random_range(1.0..=1.6);

        Ok(
            SensorReading::new(
                timestamp,
                Celsius::new(self.temperature),
                Percent::new(self.humidity),
            )
            .with_lower_temp(Celsius::new(lower_temp))
            .with_wind(
                KilometersPerHour::new(self.wind_speed),
                Some(KilometersPerHour::new(gust)),
            )
            .with_wind_direction(Degrees::new(self.wind_direction))
            .with_pressure(Hectopascals::new(self.pressure)),
        )
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Wrap into `[0, 360)`. `rem_euclid` rounds tiny negative inputs up to 360.
fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 5, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimulatedSource::new(42, start(), Duration::minutes(5));
        let mut b = SimulatedSource::new(42, start(), Duration::minutes(5));
        for _ in 0..20 {
            assert_eq!(a.fetch(), b.fetch());
        }
    }

    #[test]
    fn test_readings_stay_in_range() {
        let ranges = SimulationRanges::default();
        let mut source = SimulatedSource::new(7, start(), Duration::minutes(1));
        for _ in 0..500 {
            let r = source.fetch().unwrap();
            assert!(ranges.temperature.contains(&*r.upper_temp));
            assert!(ranges.humidity.contains(&*r.humidity));
            let wind = r.wind_speed.unwrap();
            assert!(ranges.wind_speed.contains(&*wind));
            assert!(*r.wind_gust.unwrap() >= *wind);
            assert!((*r.lower_temp.unwrap() - *r.upper_temp).abs() <= ranges.max_sensor_spread);
            assert!((0.0..360.0).contains(&*r.wind_direction.unwrap()));
        }
    }

    #[test]
    fn test_timestamps_advance_by_interval() {
        let mut source = SimulatedSource::new(1, start(), Duration::minutes(10));
        let first = source.fetch().unwrap().timestamp;
        let second = source.fetch().unwrap().timestamp;
        assert_eq!(first, start());
        assert_eq!(second - first, Duration::minutes(10));
    }

    #[test]
    fn test_wrap_degrees_stays_below_full_turn() {
        assert_eq!(wrap_degrees(-1e-20), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }

    #[test]
    fn test_default_ranges_are_valid() {
        assert!(SimulationRanges::default().validate().is_ok());
        let source =
            SimulatedSource::with_ranges(3, start(), Duration::minutes(1), SimulationRanges::default());
        assert!(source.is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let ranges = SimulationRanges {
            temperature: 35.0..=15.0,
            ..SimulationRanges::default()
        };
        assert!(matches!(
            SimulatedSource::with_ranges(1, start(), Duration::minutes(1), ranges),
            Err(AdvisoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_non_finite_range_rejected() {
        let ranges = SimulationRanges {
            pressure: 1000.0..=f64::INFINITY,
            ..SimulationRanges::default()
        };
        assert!(ranges.validate().is_err());

        let ranges = SimulationRanges {
            humidity: f64::NAN..=90.0,
            ..SimulationRanges::default()
        };
        assert!(ranges.validate().is_err());
    }

    #[test]
    fn test_negative_wind_rejected() {
        let ranges = SimulationRanges {
            wind_speed: -5.0..=10.0,
            ..SimulationRanges::default()
        };
        assert!(ranges.validate().is_err());
    }

    #[test]
    fn test_negative_sensor_spread_rejected() {
        let ranges = SimulationRanges {
            max_sensor_spread: -1.0,
            ..SimulationRanges::default()
        };
        assert!(matches!(
            SimulatedSource::with_ranges(1, start(), Duration::minutes(1), ranges),
            Err(AdvisoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_fixed_ranges_pin_values() {
        let ranges = SimulationRanges {
            temperature: 20.0..=20.0,
            max_sensor_spread: 0.0,
            ..SimulationRanges::default()
        };
        let mut source =
            SimulatedSource::with_ranges(9, start(), Duration::minutes(1), ranges).unwrap();
        let reading = source.fetch().unwrap();
        assert_eq!(*reading.upper_temp, 20.0);
        assert_eq!(reading.lower_temp, Some(Celsius::new(20.0)));
    }

    #[test]
    fn test_timestamp_overflow_exhausts_source() {
        let mut source = SimulatedSource::new(5, DateTime::<Utc>::MAX_UTC, Duration::minutes(1));
        assert_eq!(source.fetch().unwrap().timestamp, DateTime::<Utc>::MAX_UTC);
        assert_eq!(source.fetch(), Err(SourceError::Exhausted));
    }
}

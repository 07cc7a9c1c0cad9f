//! Sensor reading entity
//!
//! One observation from the station: two temperature sensors at different
//! heights plus humidity, wind and pressure. Readings come from an external
//! collaborator (live API poll, replay fixture or simulator) and are never
//! assumed to be in range; the Delta T engine validates them.

use crate::core_types::units::{Celsius, Degrees, Hectopascals, KilometersPerHour, Percent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single station observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Observation time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Ground-level sensor, used only for inversion detection
    pub lower_temp: Option<Celsius>,
    /// Elevated sensor, the dry-bulb temperature for Delta T
    pub upper_temp: Celsius,
    /// Relative humidity
    pub humidity: Percent,
    /// Mean wind speed
    pub wind_speed: Option<KilometersPerHour>,
    /// Peak gust
    pub wind_gust: Option<KilometersPerHour>,
    /// Station pressure
    pub pressure: Option<Hectopascals>,
    /// Direction the wind is blowing from
    pub wind_direction: Option<Degrees>,
}

impl SensorReading {
    /// Create a reading with only the quantities Delta T needs.
    ///
    /// Optional channels start empty; fill them with the `with_*` builders.
    pub fn new(timestamp: DateTime<Utc>, upper_temp: Celsius, humidity: Percent) -> Self {
        Self {
            timestamp,
            lower_temp: None,
            upper_temp,
            humidity,
            wind_speed: None,
            wind_gust: None,
            pressure: None,
            wind_direction: None,
        }
    }

    /// Attach the ground-level temperature
    pub fn with_lower_temp(mut self, lower_temp: Celsius) -> Self {
        self.lower_temp = Some(lower_temp);
        self
    }

    /// Attach mean wind speed and gust
    pub fn with_wind(mut self, speed: KilometersPerHour, gust: Option<KilometersPerHour>) -> Self {
        self.wind_speed = Some(speed);
        self.wind_gust = gust;
        self
    }

    /// Attach wind direction
    pub fn with_wind_direction(mut self, direction: Degrees) -> Self {
        self.wind_direction = Some(direction);
        self
    }

    /// Attach station pressure
    pub fn with_pressure(mut self, pressure: Hectopascals) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder_fills_optional_channels() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 3, 6, 30, 0).unwrap();
        let reading = SensorReading::new(ts, Celsius::new(21.0), Percent::new(72.0))
            .with_lower_temp(Celsius::new(19.5))
            .with_wind(KilometersPerHour::new(6.0), Some(KilometersPerHour::new(11.0)))
            .with_wind_direction(Degrees::new(135.0))
            .with_pressure(Hectopascals::new(1016.0));

        assert_eq!(reading.timestamp, ts);
        assert_eq!(reading.lower_temp, Some(Celsius::new(19.5)));
        assert_eq!(reading.wind_speed, Some(KilometersPerHour::new(6.0)));
        assert_eq!(reading.wind_gust, Some(KilometersPerHour::new(11.0)));
        assert_eq!(reading.wind_direction.map(Degrees::compass_point), Some("SE"));
        assert_eq!(reading.pressure, Some(Hectopascals::new(1016.0)));
    }

    #[test]
    fn test_new_leaves_optional_channels_empty() {
        let reading = SensorReading::new(Utc::now(), Celsius::new(20.0), Percent::new(50.0));
        assert!(reading.lower_temp.is_none());
        assert!(reading.wind_speed.is_none());
        assert!(reading.pressure.is_none());
    }
}

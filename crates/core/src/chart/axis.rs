//! Domain-to-pixel mapping for the reference Delta T chart
//!
//! The dashboard overlays the current reading on a fixed chart image. Each
//! image axis is calibrated by two anchor points: the pixel where the smallest
//! physical value sits and the pixel where the largest sits. Vertical axes put
//! the pixel origin at the top, so their `pixel_min` is numerically larger
//! than `pixel_max`; the mapping itself does not care.

use crate::core_types::units::{Celsius, Percent};
use crate::error::{AdvisoryError, Result};
use serde::{Deserialize, Serialize};

/// Map `value` from `[domain_min, domain_max]` onto `[pixel_min, pixel_max]`.
///
/// - `value` is clamped into the domain first (no extrapolation off the chart)
/// - a degenerate domain (`domain_min == domain_max`, or NaN bounds) returns `pixel_min`
/// - the endpoints map exactly: `domain_min → pixel_min`, `domain_max → pixel_max`
///
/// ```
/// use spray_advisor_core::chart::map_to_pixel;
///
/// assert_eq!(map_to_pixel(25.0, 0.0, 50.0, 198.0, 880.0), 539.0);
/// assert_eq!(map_to_pixel(75.0, 0.0, 50.0, 198.0, 880.0), 880.0);
/// ```
pub fn map_to_pixel(
    value: f64,
    domain_min: f64,
    domain_max: f64,
    pixel_min: f64,
    pixel_max: f64,
) -> f64 {
    if !(domain_min < domain_max || domain_min > domain_max) {
        return pixel_min;
    }

    // Reversed domains are clamped against their real lower/upper ends
    let (lo, hi) = if domain_min < domain_max {
        (domain_min, domain_max)
    } else {
        (domain_max, domain_min)
    };
    let clamped = value.clamp(lo, hi);

    let fraction = (clamped - domain_min) / (domain_max - domain_min);
    if fraction <= 0.0 {
        pixel_min
    } else if fraction >= 1.0 {
        pixel_max
    } else {
        pixel_min + fraction * (pixel_max - pixel_min)
    }
}

/// Calibration of one chart axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    /// Smallest physical value shown on the axis
    pub domain_min: f64,
    /// Largest physical value shown on the axis
    pub domain_max: f64,
    /// Pixel coordinate of `domain_min`
    pub pixel_min: f64,
    /// Pixel coordinate of `domain_max`
    pub pixel_max: f64,
}

impl AxisCalibration {
    /// Create a validated calibration
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if any value is not finite or
    /// `domain_min >= domain_max`.
    pub fn new(domain_min: f64, domain_max: f64, pixel_min: f64, pixel_max: f64) -> Result<Self> {
        let axis = Self {
            domain_min,
            domain_max,
            pixel_min,
            pixel_max,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Check the calibration is usable
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if any value is not finite or
    /// `domain_min >= domain_max`.
    pub fn validate(&self) -> Result<()> {
        let all_finite = [
            self.domain_min,
            self.domain_max,
            self.pixel_min,
            self.pixel_max,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(AdvisoryError::Configuration(format!(
                "axis calibration must be finite: {self:?}"
            )));
        }
        if self.domain_min >= self.domain_max {
            return Err(AdvisoryError::Configuration(format!(
                "axis domain is degenerate or reversed: [{}, {}]",
                self.domain_min, self.domain_max
            )));
        }
        Ok(())
    }

    /// Pixel coordinate for a physical value
    pub fn map(&self, value: f64) -> f64 {
        map_to_pixel(
            value,
            self.domain_min,
            self.domain_max,
            self.pixel_min,
            self.pixel_max,
        )
    }
}

/// Pixel position on the chart image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal pixel (0 = left edge)
    pub x: f64,
    /// Vertical pixel (0 = top edge)
    pub y: f64,
}

impl PixelPoint {
    /// Round to integer pixel coordinates for drawing
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Calibration of a temperature (x) × humidity (y) reference chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartCalibration {
    /// Dry-bulb temperature along x
    pub temperature: AxisCalibration,
    /// Relative humidity along y
    pub humidity: AxisCalibration,
}

impl Default for ChartCalibration {
    /// Preset for the stock Delta T chart image: 0-50°C across x = 198..880,
    /// 0-100% humidity up the y axis from y = 560 to y = 60.
    fn default() -> Self {
        Self {
            temperature: AxisCalibration {
                domain_min: 0.0,
                domain_max: 50.0,
                pixel_min: 198.0,
                pixel_max: 880.0,
            },
            humidity: AxisCalibration {
                domain_min: 0.0,
                domain_max: 100.0,
                pixel_min: 560.0,
                pixel_max: 60.0,
            },
        }
    }
}

impl ChartCalibration {
    /// Create from two validated axes
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if either axis is invalid.
    pub fn new(temperature: AxisCalibration, humidity: AxisCalibration) -> Result<Self> {
        let chart = Self {
            temperature,
            humidity,
        };
        chart.validate()?;
        Ok(chart)
    }

    /// Validate both axes
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if either axis is invalid.
    pub fn validate(&self) -> Result<()> {
        self.temperature.validate()?;
        self.humidity.validate()
    }

    /// Pixel position of a (temperature, humidity) pair
    pub fn locate(&self, temperature: Celsius, humidity: Percent) -> PixelPoint {
        PixelPoint {
            x: self.temperature.map(*temperature),
            y: self.humidity.map(*humidity),
        }
    }
}

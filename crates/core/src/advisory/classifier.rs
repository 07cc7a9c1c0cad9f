//! Spray-suitability classification
//!
//! Turns Delta T, wind speed and the two-height temperature spread into the
//! categories shown on the dashboard.
//!
//! Boundaries (inclusive/exclusive exactly as listed):
//!
//! | Delta T       | Category          |
//! |---------------|-------------------|
//! | `< 2`         | `UnsuitableLow`   |
//! | `[2, 8]`      | `Ideal`           |
//! | `(8, 10]`     | `Caution`         |
//! | `> 10`        | `UnsuitableHigh`  |
//!
//! | Wind (km/h)        | Condition         |
//! |--------------------|-------------------|
//! | `<= 3`             | `RiskInversion`   |
//! | `(3, upper]`       | `Excellent`       |
//! | `> upper`          | `DangerousDrift`  |

use crate::core_types::reading::SensorReading;
use crate::core_types::units::{Celsius, CelsiusDelta, KilometersPerHour};
use crate::error::{AdvisoryError, Result};
use crate::physics::DeltaTResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delta T suitability category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeltaTCategory {
    /// Too humid or cool: droplets persist, drift and runoff risk
    UnsuitableLow,
    /// Acceptable spraying window
    Ideal,
    /// Borderline, monitor conditions
    Caution,
    /// Droplets evaporate before reaching the target
    UnsuitableHigh,
}

impl DeltaTCategory {
    /// Short label for tables
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnsuitableLow => "Unsuitable (low)",
            Self::Ideal => "Ideal",
            Self::Caution => "Caution",
            Self::UnsuitableHigh => "Unsuitable (high)",
        }
    }

    /// Whether spraying is acceptable in this category
    pub const fn is_sprayable(&self) -> bool {
        matches!(self, Self::Ideal)
    }
}

impl fmt::Display for DeltaTCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wind suitability condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindCondition {
    /// Too calm, an inversion may be trapping droplets near the ground
    RiskInversion,
    /// Good spraying wind
    Excellent,
    /// Wind will carry droplets off target
    DangerousDrift,
}

impl WindCondition {
    /// Short label for tables
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RiskInversion => "Inversion risk",
            Self::Excellent => "Excellent",
            Self::DangerousDrift => "Dangerous drift",
        }
    }
}

impl fmt::Display for WindCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thermal inversion status from the two temperature sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InversionStatus {
    /// Air cools with height, no inversion
    Released,
    /// Warmer air aloft with calm wind: do not spray
    InversionDetected,
    /// Warmer air aloft but enough wind to mix it
    CautionPossible,
    /// Both sensors read the same
    Stable,
    /// A sensor or the wind reading is missing
    InsufficientData,
}

impl InversionStatus {
    /// Short label for tables
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Released => "Released",
            Self::InversionDetected => "Inversion detected",
            Self::CautionPossible => "Possible inversion",
            Self::Stable => "Stable",
            Self::InsufficientData => "Insufficient data",
        }
    }

    /// Dashboard advice text
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Released => "Temperature falls with height; no inversion.",
            Self::InversionDetected => {
                "Warmer air above calm ground air: thermal inversion, do not spray."
            }
            Self::CautionPossible => {
                "Warmer air above ground air but wind is mixing it; spray with caution."
            }
            Self::Stable => "Both sensors agree; no temperature gradient.",
            Self::InsufficientData => "Waiting for both temperature sensors and wind data.",
        }
    }
}

impl fmt::Display for InversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category together with the human-facing explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment<C> {
    /// Machine-readable category
    pub category: C,
    /// Free-text explanation including the measured value
    pub description: String,
}

/// Delta T classification result
pub type ConditionAssessment = Assessment<DeltaTCategory>;

/// Wind classification result
pub type WindAssessment = Assessment<WindCondition>;

/// Upper bound of the "excellent" wind band.
///
/// Station variants use either 10 or 12 km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WindUpperBound {
    /// 10 km/h
    Strict,
    /// 12 km/h
    Relaxed,
}

impl WindUpperBound {
    /// Bound in km/h
    pub const fn kmh(&self) -> f64 {
        match self {
            Self::Strict => 10.0,
            Self::Relaxed => 12.0,
        }
    }
}

/// Classification boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Below this Delta T: unsuitable (low)
    pub delta_t_low: f64,
    /// Up to and including this Delta T: ideal
    pub delta_t_ideal_max: f64,
    /// Up to and including this Delta T: caution; above: unsuitable (high)
    pub delta_t_caution_max: f64,
    /// Wind at or below this is too calm; inversions need wind strictly below it
    pub calm_wind_kmh: f64,
    /// Top of the excellent wind band
    pub wind_excellent_max_kmh: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            delta_t_low: 2.0,
            delta_t_ideal_max: 8.0,
            delta_t_caution_max: 10.0,
            calm_wind_kmh: 3.0,
            wind_excellent_max_kmh: WindUpperBound::Strict.kmh(),
        }
    }
}

impl ClassifierThresholds {
    /// Default Delta T bands with the chosen wind bound
    pub fn with_wind_bound(bound: WindUpperBound) -> Self {
        Self {
            wind_excellent_max_kmh: bound.kmh(),
            ..Self::default()
        }
    }

    /// Check the bands are finite and strictly increasing
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("delta_t_low", self.delta_t_low),
            ("delta_t_ideal_max", self.delta_t_ideal_max),
            ("delta_t_caution_max", self.delta_t_caution_max),
            ("calm_wind_kmh", self.calm_wind_kmh),
            ("wind_excellent_max_kmh", self.wind_excellent_max_kmh),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AdvisoryError::Configuration(format!(
                "threshold {name} must be finite, got {value}"
            )));
        }
        if !(self.delta_t_low < self.delta_t_ideal_max
            && self.delta_t_ideal_max < self.delta_t_caution_max)
        {
            return Err(AdvisoryError::Configuration(format!(
                "Delta T bands must increase: {} < {} < {}",
                self.delta_t_low, self.delta_t_ideal_max, self.delta_t_caution_max
            )));
        }
        if !(0.0..self.wind_excellent_max_kmh).contains(&self.calm_wind_kmh) {
            return Err(AdvisoryError::Configuration(format!(
                "wind bands must satisfy 0 <= {} < {}",
                self.calm_wind_kmh, self.wind_excellent_max_kmh
            )));
        }
        Ok(())
    }
}

/// Combined verdict for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayAssessment {
    /// Delta T band
    pub delta_t: ConditionAssessment,
    /// Wind band, `None` when the station sent no wind speed
    pub wind: Option<WindAssessment>,
    /// Two-height inversion check
    pub inversion: InversionStatus,
}

impl SprayAssessment {
    /// Ideal Delta T, excellent wind and no detected inversion
    pub fn spray_recommended(&self) -> bool {
        self.delta_t.category.is_sprayable()
            && matches!(
                self.wind.as_ref().map(|w| w.category),
                Some(WindCondition::Excellent)
            )
            && self.inversion != InversionStatus::InversionDetected
    }
}

/// Stateless classifier over validated thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionClassifier {
    thresholds: ClassifierThresholds,
}

impl ConditionClassifier {
    /// Create a classifier
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the thresholds are inconsistent.
    pub fn new(thresholds: ClassifierThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Place a Delta T value into exactly one band.
    ///
    /// NaN fails every comparison and ends up `UnsuitableHigh`.
    pub fn classify_delta_t(&self, delta_t: CelsiusDelta) -> ConditionAssessment {
        let th = &self.thresholds;
        let d = *delta_t;

        let (category, description) = if d < th.delta_t_low {
            (
                DeltaTCategory::UnsuitableLow,
                format!(
                    "Low Delta T (< {:.0}°C): runoff and drift risk, air too humid or cool.",
                    th.delta_t_low
                ),
            )
        } else if d <= th.delta_t_ideal_max {
            (
                DeltaTCategory::Ideal,
                format!(
                    "Ideal Delta T ({:.0}-{:.0}°C) for spraying.",
                    th.delta_t_low, th.delta_t_ideal_max
                ),
            )
        } else if d <= th.delta_t_caution_max {
            (
                DeltaTCategory::Caution,
                format!("Delta T at the limit ({d:.1}°C): monitor conditions."),
            )
        } else {
            (
                DeltaTCategory::UnsuitableHigh,
                format!(
                    "High Delta T (> {:.0}°C): excessive droplet evaporation risk.",
                    th.delta_t_caution_max
                ),
            )
        };

        Assessment {
            category,
            description,
        }
    }

    /// Place a wind speed into a band
    pub fn classify_wind(&self, wind_speed: KilometersPerHour) -> WindAssessment {
        let th = &self.thresholds;
        let w = *wind_speed;

        let (category, description) = if w <= th.calm_wind_kmh {
            (
                WindCondition::RiskInversion,
                format!(
                    "Wind {w:.1} km/h: too calm (<= {:.0} km/h), inversion risk.",
                    th.calm_wind_kmh
                ),
            )
        } else if w <= th.wind_excellent_max_kmh {
            (
                WindCondition::Excellent,
                format!(
                    "Wind {w:.1} km/h: excellent for spraying ({:.0}-{:.0} km/h).",
                    th.calm_wind_kmh, th.wind_excellent_max_kmh
                ),
            )
        } else {
            (
                WindCondition::DangerousDrift,
                format!(
                    "Wind {w:.1} km/h: above {:.0} km/h, dangerous drift.",
                    th.wind_excellent_max_kmh
                ),
            )
        };

        Assessment {
            category,
            description,
        }
    }

    /// Compare ground and elevated sensors.
    ///
    /// Missing or NaN inputs give `InsufficientData`, which is a valid state
    /// rather than an error.
    pub fn classify_inversion(
        &self,
        lower: Option<Celsius>,
        upper: Option<Celsius>,
        wind_speed: Option<KilometersPerHour>,
    ) -> InversionStatus {
        let (Some(lower), Some(upper), Some(wind)) = (lower, upper, wind_speed) else {
            return InversionStatus::InsufficientData;
        };
        if lower.is_nan() || upper.is_nan() || wind.is_nan() {
            return InversionStatus::InsufficientData;
        }

        if *upper < *lower {
            InversionStatus::Released
        } else if *upper > *lower {
            if *wind < self.thresholds.calm_wind_kmh {
                InversionStatus::InversionDetected
            } else {
                InversionStatus::CautionPossible
            }
        } else {
            InversionStatus::Stable
        }
    }

    /// Classify everything known about one reading
    pub fn assess(&self, reading: &SensorReading, result: &DeltaTResult) -> SprayAssessment {
        SprayAssessment {
            delta_t: self.classify_delta_t(result.delta_t),
            wind: reading.wind_speed.map(|w| self.classify_wind(w)),
            inversion: self.classify_inversion(
                reading.lower_temp,
                Some(reading.upper_temp),
                reading.wind_speed,
            ),
        }
    }
}

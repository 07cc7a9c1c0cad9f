//! Per-reading derived metrics

use crate::advisory::classifier::{ConditionAssessment, ConditionClassifier};
use crate::core_types::units::{Celsius, CelsiusDelta};
use crate::physics::DeltaTResult;
use serde::{Deserialize, Serialize};

/// Everything computed from one reading's temperature and humidity.
///
/// Created once per reading and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Stull wet-bulb estimate
    pub wet_bulb: Celsius,
    /// Dry bulb minus wet bulb
    pub delta_t: CelsiusDelta,
    /// Linear dew point approximation
    pub dew_point: Celsius,
    /// Perceived temperature
    pub feels_like: Celsius,
    /// Delta T suitability band and advice
    pub condition: ConditionAssessment,
}

impl DerivedMetrics {
    /// Attach the Delta T classification to a calculation result
    pub fn new(result: &DeltaTResult, classifier: &ConditionClassifier) -> Self {
        Self {
            wet_bulb: result.wet_bulb,
            delta_t: result.delta_t,
            dew_point: result.dew_point,
            feels_like: result.feels_like,
            condition: classifier.classify_delta_t(result.delta_t),
        }
    }
}

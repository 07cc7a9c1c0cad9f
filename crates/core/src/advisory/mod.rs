//! Spray advisory classification
//!
//! Converts Delta T, wind and the two-height temperature spread into the
//! categories and advice text the dashboard displays.

pub mod classifier;
pub mod metrics;

pub use classifier::{
    Assessment, ClassifierThresholds, ConditionAssessment, ConditionClassifier, DeltaTCategory,
    InversionStatus, SprayAssessment, WindAssessment, WindCondition, WindUpperBound,
};
pub use metrics::DerivedMetrics;

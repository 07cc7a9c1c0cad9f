//! Advisory session: one station's readings flowing through the pipeline
//!
//! Each accepted reading is computed, classified, placed on the chart and
//! appended to history. Rejected readings are logged and leave the session
//! untouched.

use crate::advisory::{ConditionClassifier, DerivedMetrics, SprayAssessment};
use crate::chart::{ChartCalibration, PixelPoint};
use crate::config::AdvisorConfig;
use crate::core_types::reading::SensorReading;
use crate::error::{AdvisoryError, Result};
use crate::history::{
    trail, trend_series, HistoryRecord, HistoryStore, HistoryWindow, QueryOrder, TrendPoint,
};
use crate::physics::DeltaTEngine;
use crate::source::{DataSource, SourceError};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure while polling a data source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The source could not deliver a reading
    #[error("data source failed: {0}")]
    Source(#[from] SourceError),

    /// The reading was delivered but rejected
    #[error(transparent)]
    Advisory(#[from] AdvisoryError),
}

/// Result of ingesting one reading
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    /// Stored record (reading + metrics)
    pub record: HistoryRecord,
    /// Delta T, wind and inversion verdict
    pub assessment: SprayAssessment,
    /// Where the reading sits on the reference chart
    pub position: PixelPoint,
}

/// Stateful pipeline for one station
#[derive(Debug, Clone)]
pub struct AdvisorySession {
    engine: DeltaTEngine,
    classifier: ConditionClassifier,
    history: HistoryStore,
    chart: ChartCalibration,
    last_update: Option<DateTime<Utc>>,
}

impl AdvisorySession {
    /// Assemble a session from already-built components
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if the chart calibration is invalid.
    pub fn new(
        engine: DeltaTEngine,
        classifier: ConditionClassifier,
        history: HistoryStore,
        chart: ChartCalibration,
    ) -> Result<Self> {
        chart.validate()?;
        Ok(Self {
            engine,
            classifier,
            history,
            chart,
            last_update: None,
        })
    }

    /// Build every component from a configuration
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if any section is invalid.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        config.validate()?;
        let session = Self::new(
            DeltaTEngine::new(config.temperature_domain)?,
            ConditionClassifier::new(config.thresholds)?,
            HistoryStore::new(config.history_capacity)?,
            config.chart,
        )?;
        info!(
            "Advisory session ready: domain [{}, {}]°C, history capacity {}",
            config.temperature_domain.min, config.temperature_domain.max, config.history_capacity
        );
        Ok(session)
    }

    /// Process one reading.
    ///
    /// # Errors
    /// Returns the engine's error if the reading is out of range or the
    /// calculation fails. Nothing is stored in that case.
    pub fn ingest(&mut self, reading: SensorReading) -> Result<SessionUpdate> {
        let result = match self.engine.compute_reading(&reading) {
            Ok(result) => result,
            Err(e) => {
                warn!("Rejected reading at {}: {}", reading.timestamp, e);
                return Err(e);
            }
        };

        let assessment = self.classifier.assess(&reading, &result);
        let metrics = DerivedMetrics::new(&result, &self.classifier);
        let position = self.chart.locate(reading.upper_temp, reading.humidity);

        debug!(
            "Reading at {}: {} / {}% -> Delta T {} ({})",
            reading.timestamp,
            reading.upper_temp,
            *reading.humidity,
            metrics.delta_t,
            metrics.condition.category
        );

        self.last_update = Some(reading.timestamp);
        let record = HistoryRecord::new(reading, metrics);
        self.history.append(record.clone());

        Ok(SessionUpdate {
            record,
            assessment,
            position,
        })
    }

    /// Fetch one reading from `source` and ingest it
    ///
    /// # Errors
    /// `SessionError::Source` if the source fails, `SessionError::Advisory`
    /// if the reading is rejected.
    pub fn poll<S: DataSource>(
        &mut self,
        source: &mut S,
    ) -> std::result::Result<SessionUpdate, SessionError> {
        let reading = source.fetch().inspect_err(|e| {
            warn!("Source '{}' failed: {}", source.name(), e);
        })?;
        Ok(self.ingest(reading)?)
    }

    /// Stored history
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Timestamp of the last accepted reading
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Active classifier
    pub fn classifier(&self) -> &ConditionClassifier {
        &self.classifier
    }

    /// Active chart calibration
    pub fn chart(&self) -> &ChartCalibration {
        &self.chart
    }

    /// Chart trail of the readings in `window`, oldest first
    pub fn trail(&self, window: HistoryWindow) -> Vec<PixelPoint> {
        trail(
            self.history.query(window, QueryOrder::Chronological),
            &self.chart,
        )
    }

    /// Trend samples of the readings in `window`, oldest first
    pub fn trend(&self, window: HistoryWindow) -> Vec<TrendPoint> {
        trend_series(self.history.query(window, QueryOrder::Chronological))
    }
}

impl Default for AdvisorySession {
    fn default() -> Self {
        Self {
            engine: DeltaTEngine::default(),
            classifier: ConditionClassifier::default(),
            history: HistoryStore::default(),
            chart: ChartCalibration::default(),
            last_update: None,
        }
    }
}

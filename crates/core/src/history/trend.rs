//! Trails and trend series built from history queries

use crate::chart::{ChartCalibration, PixelPoint};
use crate::core_types::units::{Celsius, CelsiusDelta, KilometersPerHour, Percent};
use crate::history::store::HistoryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of the trend charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Delta T
    pub delta_t: CelsiusDelta,
    /// Elevated (dry-bulb) temperature
    pub temperature: Celsius,
    /// Relative humidity
    pub humidity: Percent,
    /// Mean wind, when reported
    pub wind_speed: Option<KilometersPerHour>,
}

impl From<&HistoryRecord> for TrendPoint {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            timestamp: record.timestamp(),
            delta_t: record.metrics.delta_t,
            temperature: record.reading.upper_temp,
            humidity: record.reading.humidity,
            wind_speed: record.reading.wind_speed,
        }
    }
}

/// Chart positions of each record, in the order given.
///
/// Feed it a chronological query to draw the trail leading up to the
/// current reading.
pub fn trail<'a, I>(records: I, chart: &ChartCalibration) -> Vec<PixelPoint>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    records
        .into_iter()
        .map(|r| chart.locate(r.reading.upper_temp, r.reading.humidity))
        .collect()
}

/// Trend samples for each record, in the order given
pub fn trend_series<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    records.into_iter().map(TrendPoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{ConditionClassifier, DerivedMetrics};
    use crate::core_types::reading::SensorReading;
    use crate::physics::{DeltaTEngine, TemperatureDomain};

    fn record(t: f64, rh: f64) -> HistoryRecord {
        let engine = DeltaTEngine::new(TemperatureDomain::WIDE).unwrap();
        let reading = SensorReading::new(Utc::now(), Celsius::new(t), Percent::new(rh))
            .with_wind(KilometersPerHour::new(5.0), None);
        let result = engine.compute_reading(&reading).unwrap();
        HistoryRecord::new(
            reading,
            DerivedMetrics::new(&result, &ConditionClassifier::default()),
        )
    }

    #[test]
    fn test_trail_follows_record_order() {
        let records = [record(10.0, 0.0), record(25.0, 50.0), record(50.0, 100.0)];
        let points = trail(&records, &ChartCalibration::default());
        assert_eq!(
            points.iter().map(PixelPoint::rounded).collect::<Vec<_>>(),
            vec![(334, 560), (539, 310), (880, 60)]
        );
    }

    #[test]
    fn test_trend_series_copies_fields() {
        let records = [record(25.0, 60.0)];
        let series = trend_series(&records);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].temperature, Celsius::new(25.0));
        assert_eq!(series[0].humidity, Percent::new(60.0));
        assert_eq!(series[0].delta_t, records[0].metrics.delta_t);
        assert_eq!(series[0].wind_speed, Some(KilometersPerHour::new(5.0)));
    }
}

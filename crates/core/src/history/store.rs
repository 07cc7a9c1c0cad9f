//! Bounded in-memory reading history
//!
//! Keeps the most recent `capacity` records in arrival order for trails,
//! trend charts and "latest first" tables. Nothing is persisted; a restart
//! starts from an empty store.
//!
//! Arrival order is the only order the store guarantees. Timestamps from a
//! drifting clock or a replay are stored as received and never re-sorted.

use crate::advisory::DerivedMetrics;
use crate::core_types::reading::SensorReading;
use crate::core_types::units::CelsiusDelta;
use crate::error::{AdvisoryError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::vec_deque;
use std::collections::VecDeque;
use tracing::trace;

/// Default number of records kept per session
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// One stored observation and what was derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Raw station reading
    pub reading: SensorReading,
    /// Delta T and friends computed from it
    pub metrics: DerivedMetrics,
}

impl HistoryRecord {
    /// Pair a reading with its metrics
    pub fn new(reading: SensorReading, metrics: DerivedMetrics) -> Self {
        Self { reading, metrics }
    }

    /// Observation time
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.reading.timestamp
    }
}

/// Which records a query selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Every stored record
    All,
    /// Records stamped at or after `now - duration`
    Last(Duration),
    /// Records stamped within `[start, end]` (inclusive)
    Range {
        /// Earliest accepted timestamp
        start: DateTime<Utc>,
        /// Latest accepted timestamp
        end: DateTime<Utc>,
    },
}

impl HistoryWindow {
    /// Convenience for "last N hours". Hour counts beyond what `Duration`
    /// can hold saturate, so a huge count means "everything".
    pub fn last_hours(hours: i64) -> Self {
        let duration = Duration::try_hours(hours).unwrap_or(if hours < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        });
        HistoryWindow::Last(duration)
    }

    fn resolve(self, now: DateTime<Utc>) -> TimeBounds {
        match self {
            HistoryWindow::All => TimeBounds {
                start: None,
                end: None,
            },
            // Only a lower bound: records from a clock running slightly ahead still show up
            HistoryWindow::Last(duration) => {
                let start = match now.checked_sub_signed(duration) {
                    Some(start) => Some(start),
                    // Reaches past the earliest representable instant
                    None if duration > Duration::zero() => None,
                    None => Some(DateTime::<Utc>::MAX_UTC),
                };
                TimeBounds { start, end: None }
            }
            HistoryWindow::Range { start, end } => TimeBounds {
                start: Some(start),
                end: Some(end),
            },
        }
    }
}

/// Order in which query results are yielded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryOrder {
    /// Oldest arrival first (trend plotting)
    #[default]
    Chronological,
    /// Newest arrival first (tables)
    LatestFirst,
}

#[derive(Debug, Clone, Copy)]
struct TimeBounds {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeBounds {
    fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| ts >= start) && self.end.is_none_or(|end| ts <= end)
    }
}

/// Lazy query over a [`HistoryStore`].
///
/// Cloning restarts nothing and copies the current position, so a fresh
/// clone taken before iteration can be replayed any number of times.
#[derive(Debug, Clone)]
pub struct HistoryIter<'a> {
    inner: vec_deque::Iter<'a, HistoryRecord>,
    bounds: TimeBounds,
    order: QueryOrder,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = &'a HistoryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.order {
                QueryOrder::Chronological => self.inner.next()?,
                QueryOrder::LatestFirst => self.inner.next_back()?,
            };
            if self.bounds.contains(record.timestamp()) {
                return Some(record);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Summary of the stored records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Number of records
    pub count: usize,
    /// Earliest timestamp present
    pub oldest: DateTime<Utc>,
    /// Latest timestamp present
    pub newest: DateTime<Utc>,
    /// Lowest Delta T
    pub min_delta_t: CelsiusDelta,
    /// Highest Delta T
    pub max_delta_t: CelsiusDelta,
    /// Mean Delta T
    pub mean_delta_t: CelsiusDelta,
}

/// FIFO history bounded at `capacity` records.
///
/// Records are immutable once appended; the only removal path is eviction of
/// the oldest arrival when the store is full. Owned by a single session and
/// not synchronised: wrap it in a lock if several writers must share one.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
}

impl HistoryStore {
    /// Create an empty store
    ///
    /// # Errors
    /// Returns `AdvisoryError::Configuration` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AdvisoryError::Configuration(
                "history capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append at the tail, evicting the oldest records beyond capacity
    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            if let Some(evicted) = self.records.pop_front() {
                trace!("Evicted history record from {}", evicted.timestamp());
            }
        }
    }

    /// Query relative to the current wall clock
    pub fn query(&self, window: HistoryWindow, order: QueryOrder) -> HistoryIter<'_> {
        self.query_at(Utc::now(), window, order)
    }

    /// Query with an explicit "now" for relative windows
    pub fn query_at(
        &self,
        now: DateTime<Utc>,
        window: HistoryWindow,
        order: QueryOrder,
    ) -> HistoryIter<'_> {
        HistoryIter {
            inner: self.records.iter(),
            bounds: window.resolve(now),
            order,
        }
    }

    /// Most recent arrival
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.back()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Summary over all stored records, `None` when empty
    pub fn stats(&self) -> Option<HistoryStats> {
        let first = self.records.front()?;
        let mut stats = HistoryStats {
            count: self.records.len(),
            oldest: first.timestamp(),
            newest: first.timestamp(),
            min_delta_t: first.metrics.delta_t,
            max_delta_t: first.metrics.delta_t,
            mean_delta_t: CelsiusDelta::default(),
        };

        let mut sum = 0.0;
        for record in &self.records {
            let ts = record.timestamp();
            let delta_t = record.metrics.delta_t;
            stats.oldest = stats.oldest.min(ts);
            stats.newest = stats.newest.max(ts);
            stats.min_delta_t = stats.min_delta_t.min(delta_t);
            stats.max_delta_t = stats.max_delta_t.max(delta_t);
            sum += *delta_t;
        }
        stats.mean_delta_t = CelsiusDelta::new(sum / self.records.len() as f64);

        Some(stats)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            records: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::ConditionClassifier;
    use crate::core_types::units::{Celsius, Percent};
    use crate::physics::DeltaTResult;
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 6, 0, 0).unwrap()
    }

    /// Record `minutes` after the base time with the given Delta T
    fn record(minutes: i64, delta_t: f64) -> HistoryRecord {
        let reading = SensorReading::new(
            base_time() + Duration::minutes(minutes),
            Celsius::new(20.0 + delta_t),
            Percent::new(50.0),
        );
        let result = DeltaTResult {
            wet_bulb: Celsius::new(20.0),
            delta_t: CelsiusDelta::new(delta_t),
            dew_point: Celsius::new(10.0),
            feels_like: Celsius::new(20.0 + delta_t),
        };
        HistoryRecord::new(
            reading,
            DerivedMetrics::new(&result, &ConditionClassifier::default()),
        )
    }

    fn minutes_of(iter: HistoryIter<'_>) -> Vec<i64> {
        iter.map(|r| (r.timestamp() - base_time()).num_minutes())
            .collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            HistoryStore::new(0),
            Err(AdvisoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_eviction_keeps_latest_in_order() {
        let mut store = HistoryStore::new(3).unwrap();
        for i in 0..5 {
            store.append(record(i, 4.0));
            assert!(store.len() <= 3);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(
            minutes_of(store.query_at(base_time(), HistoryWindow::All, QueryOrder::Chronological)),
            vec![2, 3, 4]
        );
    }

    #[test]
    fn test_latest_first_order() {
        let mut store = HistoryStore::new(10).unwrap();
        for i in 0..4 {
            store.append(record(i * 10, 4.0));
        }
        assert_eq!(
            minutes_of(store.query_at(base_time(), HistoryWindow::All, QueryOrder::LatestFirst)),
            vec![30, 20, 10, 0]
        );
        assert_eq!(
            (store.latest().unwrap().timestamp() - base_time()).num_minutes(),
            30
        );
    }

    #[test]
    fn test_relative_window() {
        let mut store = HistoryStore::new(100).unwrap();
        for i in 0..6 {
            store.append(record(i * 60, 4.0));
        }
        let now = base_time() + Duration::hours(5);
        let window = HistoryWindow::last_hours(2);
        assert_eq!(
            minutes_of(store.query_at(now, window, QueryOrder::Chronological)),
            vec![180, 240, 300]
        );
    }

    #[test]
    fn test_unbounded_relative_window_returns_everything() {
        let mut store = HistoryStore::new(10).unwrap();
        for i in 0..4 {
            store.append(record(i * 60, 4.0));
        }
        let now = base_time() + Duration::hours(4);

        let forever = HistoryWindow::Last(Duration::MAX);
        assert_eq!(
            minutes_of(store.query_at(now, forever, QueryOrder::Chronological)),
            vec![0, 60, 120, 180]
        );

        let centuries = HistoryWindow::last_hours(24 * 365 * 300_000);
        assert_eq!(
            store
                .query_at(now, centuries, QueryOrder::Chronological)
                .count(),
            4
        );
        let saturated = HistoryWindow::last_hours(i64::MAX);
        assert_eq!(store.query(saturated, QueryOrder::LatestFirst).count(), 4);
    }

    #[test]
    fn test_negative_overflowing_window_is_empty() {
        let mut store = HistoryStore::new(10).unwrap();
        store.append(record(0, 4.0));
        let window = HistoryWindow::Last(Duration::MIN);
        assert_eq!(
            store
                .query_at(base_time(), window, QueryOrder::Chronological)
                .count(),
            0
        );
    }

    #[test]
    fn test_absolute_range_is_inclusive() {
        let mut store = HistoryStore::new(100).unwrap();
        for i in 0..6 {
            store.append(record(i * 15, 4.0));
        }
        let window = HistoryWindow::Range {
            start: base_time() + Duration::minutes(15),
            end: base_time() + Duration::minutes(45),
        };
        assert_eq!(
            minutes_of(store.query_at(base_time(), window, QueryOrder::Chronological)),
            vec![15, 30, 45]
        );
    }

    #[test]
    fn test_arrival_order_not_resorted() {
        let mut store = HistoryStore::new(10).unwrap();
        store.append(record(30, 4.0));
        store.append(record(10, 4.0));
        store.append(record(20, 4.0));
        assert_eq!(
            minutes_of(store.query_at(base_time(), HistoryWindow::All, QueryOrder::Chronological)),
            vec![30, 10, 20]
        );
    }

    #[test]
    fn test_query_is_restartable() {
        let mut store = HistoryStore::new(10).unwrap();
        for i in 0..3 {
            store.append(record(i, 4.0));
        }
        let query = store.query_at(base_time(), HistoryWindow::All, QueryOrder::Chronological);
        assert_eq!(query.clone().count(), 3);
        assert_eq!(query.clone().count(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_stats() {
        let mut store = HistoryStore::new(10).unwrap();
        assert!(store.stats().is_none());

        store.append(record(20, 1.0));
        store.append(record(0, 5.0));
        store.append(record(10, 9.0));

        let stats = store.stats().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.oldest, base_time());
        assert_eq!(stats.newest, base_time() + Duration::minutes(20));
        assert_eq!(stats.min_delta_t, CelsiusDelta::new(1.0));
        assert_eq!(stats.max_delta_t, CelsiusDelta::new(9.0));
        assert!((*stats.mean_delta_t - 5.0).abs() < 1e-12);
    }
}

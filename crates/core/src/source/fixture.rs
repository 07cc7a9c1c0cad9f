//! Replay of a fixed reading list

use crate::core_types::reading::SensorReading;
use crate::source::{DataSource, SourceError};
use std::collections::VecDeque;

/// Yields the given readings in order, then `SourceError::Exhausted`
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    readings: VecDeque<SensorReading>,
}

impl FixtureSource {
    /// Create a source replaying `readings`
    pub fn new(readings: impl IntoIterator<Item = SensorReading>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    /// Readings not yet fetched
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl DataSource for FixtureSource {
    fn fetch(&mut self) -> Result<SensorReading, SourceError> {
        self.readings.pop_front().ok_or(SourceError::Exhausted)
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Celsius, Percent};
    use chrono::Utc;

    #[test]
    fn test_replays_then_exhausts() {
        let first = SensorReading::new(Utc::now(), Celsius::new(18.0), Percent::new(70.0));
        let second = SensorReading::new(Utc::now(), Celsius::new(19.0), Percent::new(65.0));
        let mut source = FixtureSource::new([first.clone(), second.clone()]);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.fetch(), Ok(first));
        assert_eq!(source.fetch(), Ok(second));
        assert_eq!(source.fetch(), Err(SourceError::Exhausted));
        assert_eq!(source.remaining(), 0);
    }
}

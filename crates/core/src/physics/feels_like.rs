//! "Feels like" temperature heuristic
//!
//! This is NOT a standard heat index. It reproduces the dashboard's piecewise
//! heuristic exactly so displayed values stay comparable with the historical
//! station pages. It lives apart from the Delta T engine so it can be swapped
//! for a standard formula through [`ApparentTemperature`] without touching the
//! wet-bulb code.

use crate::core_types::units::{Celsius, Percent};

/// Model turning dry-bulb temperature and humidity into a perceived temperature
pub trait ApparentTemperature {
    /// Perceived temperature for the given conditions
    fn apparent(&self, dry_bulb: Celsius, humidity: Percent) -> Celsius;
}

/// The dashboard's piecewise heuristic.
///
/// Starting from the dry-bulb temperature `t`, the following rules are
/// applied in order and the last matching rule wins:
///
/// 1. `rh >= 40`: `t + 0.33×e - 4.0` (Steadman vapour-pressure term, no wind)
///    - `t > 27`: replaced by `t + 0.5555×(e - 10)` (humidex-style)
/// 2. `rh < 50` and `t > 25`: `t + (t - 25)/5`
/// 3. `rh > 70` and `t > 25`: `t + (rh - 70)/10 + (t - 25)/3`
///
/// where `e = (rh/100) × 6.105 × exp(17.27×t / (237.7 + t))` in hPa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardHeuristic;

impl ApparentTemperature for DashboardHeuristic {
    fn apparent(&self, dry_bulb: Celsius, humidity: Percent) -> Celsius {
        Celsius::new(dashboard_feels_like(*dry_bulb, *humidity))
    }
}

/// Water vapour pressure (hPa) from temperature (°C) and relative humidity (%)
pub(crate) fn vapour_pressure(t: f64, rh: f64) -> f64 {
    (rh / 100.0) * 6.105 * (17.27 * t / (237.7 + t)).exp()
}

fn dashboard_feels_like(t: f64, rh: f64) -> f64 {
    let mut feels = t;

    if rh >= 40.0 {
        let e = vapour_pressure(t, rh);
        feels = t + 0.33 * e - 4.0;
        if t > 27.0 {
            feels = t + 0.5555 * (e - 10.0);
        }
    }
    if rh < 50.0 && t > 25.0 {
        feels = t + (t - 25.0) / 5.0;
    }
    if rh > 70.0 && t > 25.0 {
        feels = t + (rh - 70.0) / 10.0 + (t - 25.0) / 3.0;
    }

    feels
}

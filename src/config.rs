//! Planner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::task::GeoPoint;

/// Average city driving speed.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Parking/walking overhead added at every stop.
pub const DEFAULT_BUFFER_MINUTES: u32 = 5;

/// Half-width of the box synthetic coordinates are spread over, in degrees.
pub const DEFAULT_SYNTHETIC_SPREAD_DEG: f64 = 0.05;

/// Reference point for tasks that carry no usable coordinates.
pub const DEFAULT_HOME_BASE: GeoPoint = GeoPoint::new(37.7749, -122.4194);

/// Immutable settings shared by every planning call.
///
/// Missing keys in a TOML file fall back to the defaults, so a file only
/// needs to name what it overrides:
///
/// ```toml
/// average_speed_kmh = 25.0
///
/// [home_base]
/// latitude = 40.7128
/// longitude = -74.0060
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Assumed average travel speed in km/h.
    pub average_speed_kmh: f64,
    /// Fixed overhead per stop in minutes.
    pub buffer_minutes_per_stop: u32,
    /// Centre of the synthetic-coordinate box.
    pub home_base: GeoPoint,
    /// Synthetic offsets fall in `[-spread, +spread]` degrees.
    pub synthetic_spread_deg: f64,
    /// Upper bound on improvement passes for refining strategies.
    pub local_search_iterations: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_SPEED_KMH,
            buffer_minutes_per_stop: DEFAULT_BUFFER_MINUTES,
            home_base: DEFAULT_HOME_BASE,
            synthetic_spread_deg: DEFAULT_SYNTHETIC_SPREAD_DEG,
            local_search_iterations: 100,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, PlanError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        validate_speed(self.average_speed_kmh)?;
        if !self.home_base.is_valid() {
            return Err(PlanError::invalid_config(
                "home_base",
                format!(
                    "({}, {}) is outside latitude/longitude bounds",
                    self.home_base.latitude, self.home_base.longitude
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.synthetic_spread_deg) {
            return Err(PlanError::invalid_config(
                "synthetic_spread_deg",
                format!("{} is not within [0, 1]", self.synthetic_spread_deg),
            ));
        }
        Ok(())
    }

    /// Copy with per-request overrides applied and checked.
    pub(crate) fn with_overrides(
        &self,
        average_speed_kmh: Option<f64>,
        buffer_minutes_per_stop: Option<u32>,
    ) -> Result<Self, PlanError> {
        let mut config = self.clone();
        if let Some(speed) = average_speed_kmh {
            validate_speed(speed)?;
            config.average_speed_kmh = speed;
        }
        if let Some(buffer) = buffer_minutes_per_stop {
            config.buffer_minutes_per_stop = buffer;
        }
        Ok(config)
    }
}

fn validate_speed(speed: f64) -> Result<(), PlanError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(PlanError::invalid_config(
            "average_speed_kmh",
            format!("{speed} must be a positive number"),
        ))
    }
}

//! Coordinate resolution for tasks.
//!
//! Tasks that arrive without usable coordinates still need a position to be
//! routed. They get one derived from a SHA-256 digest of their identifier, so
//! the same task lands on the same spot in every process and every run.

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::config::PlannerConfig;
use crate::task::{GeoPoint, Task};

/// A task position together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub point: GeoPoint,
    /// True when the position was synthesized rather than supplied.
    pub synthetic: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CoordinateResolver {
    home_base: GeoPoint,
    spread_deg: f64,
}

impl CoordinateResolver {
    pub fn new(home_base: GeoPoint, spread_deg: f64) -> Self {
        Self {
            home_base,
            spread_deg,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.home_base, config.synthetic_spread_deg)
    }

    pub fn resolve(&self, task: &Task) -> ResolvedPosition {
        if let Some(point) = task.valid_coordinates() {
            return ResolvedPosition {
                point,
                synthetic: false,
            };
        }

        if let Some(bad) = task.coordinates {
            warn!(
                task_id = %task.id,
                latitude = bad.latitude,
                longitude = bad.longitude,
                "discarding out-of-range coordinates"
            );
        }

        ResolvedPosition {
            point: self.synthesize(&task.id),
            synthetic: true,
        }
    }

    /// Deterministic position near the home base for `id`.
    pub fn synthesize(&self, id: &str) -> GeoPoint {
        let digest = Sha256::digest(id.as_bytes());
        let (lat_bytes, rest) = digest.split_at(8);
        let lng_bytes = &rest[..8];

        let latitude = self.home_base.latitude + self.offset(lat_bytes);
        let longitude = self.home_base.longitude + self.offset(lng_bytes);

        GeoPoint::new(latitude.clamp(-90.0, 90.0), longitude.clamp(-180.0, 180.0))
    }

    /// Map 8 digest bytes uniformly onto `[-spread, +spread]`.
    fn offset(&self, bytes: &[u8]) -> f64 {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        let unit = u64::from_be_bytes(word) as f64 / u64::MAX as f64;
        (unit * 2.0 - 1.0) * self.spread_deg
    }
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

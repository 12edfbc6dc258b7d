//! Total time estimates for an ordered route.

use crate::config::PlannerConfig;

/// One stop as the estimator sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Distance from the previous stop; zero for the first stop.
    pub distance_km: f64,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct TimeEstimator {
    /// Assumed average travel speed in km/h.
    pub speed_kmh: f64,
    pub buffer_minutes: u32,
}

impl TimeEstimator {
    pub fn new(speed_kmh: f64, buffer_minutes: u32) -> Self {
        Self {
            speed_kmh,
            buffer_minutes,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.average_speed_kmh, config.buffer_minutes_per_stop)
    }

    /// Convert distance in km to travel time in minutes.
    pub fn travel_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }

    /// Travel + execution + buffer over every leg, rounded to whole minutes.
    pub fn estimate(&self, legs: &[Leg]) -> u32 {
        let total: f64 = legs
            .iter()
            .map(|leg| {
                self.travel_minutes(leg.distance_km)
                    + f64::from(leg.duration_minutes)
                    + f64::from(self.buffer_minutes)
            })
            .sum();

        if total.is_finite() && total > 0.0 {
            total.round() as u32
        } else {
            0
        }
    }
}

impl Default for TimeEstimator {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(distance_km: f64, duration_minutes: u32) -> Leg {
        Leg {
            distance_km,
            duration_minutes,
        }
    }

    #[test]
    fn test_reasonable_travel_time() {
        let estimator = TimeEstimator::new(40.0, 5);
        // 10 km at 40 km/h = 15 minutes
        assert_eq!(estimator.travel_minutes(10.0), 15.0);
    }

    #[test]
    fn test_sums_travel_execution_and_buffer() {
        let estimator = TimeEstimator::default();
        let legs = [leg(0.0, 10), leg(20.0, 15), leg(10.0, 30)];
        // 45 travel + 55 execution + 15 buffer
        assert_eq!(estimator.estimate(&legs), 115);
    }

    #[test]
    fn test_rounds_to_nearest_minute() {
        let estimator = TimeEstimator::new(40.0, 0);
        // 1.2 km = 1.8 minutes
        assert_eq!(estimator.estimate(&[leg(0.0, 0), leg(1.2, 0)]), 2);
        // 0.6 km = 0.9 minutes
        assert_eq!(estimator.estimate(&[leg(0.0, 0), leg(0.6, 0)]), 1);
        // 0.2 km = 0.3 minutes
        assert_eq!(estimator.estimate(&[leg(0.0, 0), leg(0.2, 0)]), 0);
    }

    #[test]
    fn test_zero_inputs_degrade_gracefully() {
        let estimator = TimeEstimator::new(40.0, 0);
        assert_eq!(estimator.estimate(&[]), 0);
        assert_eq!(estimator.estimate(&[leg(0.0, 0), leg(0.0, 0)]), 0);

        let buffered = TimeEstimator::default();
        assert_eq!(buffered.estimate(&[leg(0.0, 0), leg(0.0, 0)]), 10);
    }
}

//! Route planning entry point.
//!
//! Runs resolve -> order -> estimate -> format for one request. Nothing is
//! kept between calls, so one planner can serve any number of threads.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::estimator::{Leg, TimeEstimator};
use crate::haversine::haversine_km;
use crate::optimizer::NearestNeighbor;
use crate::plan::{RoutePlan, RouteStop};
use crate::resolver::{CoordinateResolver, ResolvedPosition};
use crate::task::{GeoPoint, Task, validate_tasks};
use crate::traits::OrderingStrategy;

/// Everything needed to plan one route.
///
/// `tasks` are expected to be pre-filtered to those with a location
/// (see [`crate::task::select_eligible`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub start_location: Option<GeoPoint>,
    #[serde(default)]
    pub average_speed_kmh: Option<f64>,
    #[serde(default)]
    pub buffer_minutes_per_stop: Option<u32>,
}

impl PlanRequest {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    pub fn starting_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.start_location = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = Some(kmh);
        self
    }

    pub fn buffer(mut self, minutes: u32) -> Self {
        self.buffer_minutes_per_stop = Some(minutes);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RoutePlanner<S = NearestNeighbor> {
    config: PlannerConfig,
    strategy: S,
}

impl RoutePlanner {
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        Self::with_strategy(config, NearestNeighbor::default())
    }
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            strategy: NearestNeighbor::default(),
        }
    }
}

impl<S: OrderingStrategy> RoutePlanner<S> {
    pub fn with_strategy(config: PlannerConfig, strategy: S) -> Result<Self, PlanError> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<RoutePlan, PlanError> {
        validate_tasks(&request.tasks)?;
        let config = self
            .config
            .with_overrides(request.average_speed_kmh, request.buffer_minutes_per_stop)?;

        if request.tasks.len() < 2 {
            debug!(task_count = request.tasks.len(), "not enough tasks to route");
            return Ok(RoutePlan::insufficient(request.tasks.len()));
        }

        let resolver = CoordinateResolver::from_config(&config);
        let resolved: Vec<ResolvedPosition> =
            request.tasks.iter().map(|task| resolver.resolve(task)).collect();
        let points: Vec<(f64, f64)> = resolved.iter().map(|r| r.point.as_tuple()).collect();

        let start = match request.start_location {
            Some(point) if point.is_valid() => Some(point.as_tuple()),
            Some(point) => {
                warn!(
                    latitude = point.latitude,
                    longitude = point.longitude,
                    "ignoring out-of-range start location"
                );
                None
            }
            None => None,
        };

        let order = self.strategy.order(&points, start);
        debug!(?order, "ordered stops");
        check_permutation(&order, points.len())?;

        let route = build_stops(&request.tasks, &resolved, &order);
        let total_distance_km: f64 = route.iter().map(|stop| stop.distance_from_previous_km).sum();

        let legs: Vec<Leg> = route
            .iter()
            .map(|stop| Leg {
                distance_km: stop.distance_from_previous_km,
                duration_minutes: stop.estimated_duration_minutes,
            })
            .collect();
        let estimated_time_minutes = TimeEstimator::from_config(&config).estimate(&legs);

        debug!(
            stops = route.len(),
            total_distance_km, estimated_time_minutes, "route planned"
        );

        Ok(RoutePlan {
            task_count: route.len(),
            route,
            total_distance_km,
            estimated_time_minutes,
            optimized: true,
            message: None,
        })
    }
}

impl<S: OrderingStrategy + Sync> RoutePlanner<S> {
    /// Plan independent requests in parallel; results keep request order.
    pub fn plan_batch(&self, requests: &[PlanRequest]) -> Vec<Result<RoutePlan, PlanError>> {
        requests.par_iter().map(|request| self.plan(request)).collect()
    }
}

/// Plan with the default configuration and nearest-neighbor ordering.
pub fn plan_route(request: &PlanRequest) -> Result<RoutePlan, PlanError> {
    RoutePlanner::<NearestNeighbor>::default().plan(request)
}

/// Every task index must appear exactly once.
fn check_permutation(order: &[usize], expected: usize) -> Result<(), PlanError> {
    let mut seen = vec![false; expected];
    let valid = order.len() == expected
        && order
            .iter()
            .all(|&idx| idx < expected && !std::mem::replace(&mut seen[idx], true));
    if valid {
        Ok(())
    } else {
        Err(PlanError::InvalidOrdering {
            expected,
            order: order.to_vec(),
        })
    }
}

fn build_stops(
    tasks: &[Task],
    resolved: &[ResolvedPosition],
    order: &[usize],
) -> Vec<RouteStop> {
    let mut stops = Vec::with_capacity(order.len());
    let mut previous: Option<(f64, f64)> = None;

    for (position_index, &task_idx) in order.iter().enumerate() {
        let task = &tasks[task_idx];
        let position = resolved[task_idx];
        let coordinates = position.point.as_tuple();
        let distance_from_previous_km =
            previous.map_or(0.0, |prev| haversine_km(prev, coordinates));

        stops.push(RouteStop {
            task_id: task.id.clone(),
            title: task.title.clone(),
            location: task.location.clone(),
            coordinates,
            distance_from_previous_km,
            estimated_duration_minutes: task.duration_minutes(),
            position_index,
            synthetic_coordinates: position.synthetic,
        });
        previous = Some(coordinates);
    }

    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::INSUFFICIENT_TASKS_MESSAGE;

    #[test]
    fn test_fewer_than_two_tasks() {
        for tasks in [vec![], vec![Task::new("1", "Bank").at(37.0, -122.0)]] {
            let count = tasks.len();
            let plan = plan_route(&PlanRequest::new(tasks)).unwrap();
            assert!(!plan.optimized);
            assert!(plan.route.is_empty());
            assert_eq!(plan.task_count, count);
            assert_eq!(plan.message.as_deref(), Some(INSUFFICIENT_TASKS_MESSAGE));
        }
    }

    #[test]
    fn test_missing_id_fails_fast() {
        let tasks = vec![Task::new("1", "Bank"), Task::new("", "Gym")];
        let err = plan_route(&PlanRequest::new(tasks)).unwrap_err();
        assert!(matches!(err, PlanError::MissingField { index: 1, field: "id" }));
    }

    #[test]
    fn test_missing_title_fails_even_for_single_task() {
        let err = plan_route(&PlanRequest::new(vec![Task::new("1", "")])).unwrap_err();
        assert!(matches!(err, PlanError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_bad_speed_override() {
        let request = PlanRequest::new(vec![Task::new("1", "A"), Task::new("2", "B")]).speed(0.0);
        assert!(matches!(
            plan_route(&request),
            Err(PlanError::InvalidConfig { key: "average_speed_kmh", .. })
        ));
    }

    #[test]
    fn test_invalid_start_is_ignored() {
        let tasks = vec![
            Task::new("a", "A").at(0.0, 0.0),
            Task::new("b", "B").at(0.0, 1.0),
        ];
        let without = plan_route(&PlanRequest::new(tasks.clone())).unwrap();
        let with_bad = plan_route(&PlanRequest::new(tasks).starting_at(120.0, 0.0)).unwrap();
        assert_eq!(without, with_bad);
    }

    #[test]
    fn test_first_stop_has_zero_distance() {
        let tasks = vec![
            Task::new("a", "A").at(0.0, 5.0),
            Task::new("b", "B").at(0.0, 1.0),
        ];
        let plan = plan_route(&PlanRequest::new(tasks).starting_at(0.0, 0.0)).unwrap();
        assert_eq!(plan.route[0].task_id, "b");
        assert_eq!(plan.route[0].distance_from_previous_km, 0.0);
        assert_eq!(plan.route[0].position_index, 0);
        assert_eq!(plan.route[1].position_index, 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PlannerConfig {
            average_speed_kmh: f64::NAN,
            ..PlannerConfig::default()
        };
        assert!(RoutePlanner::new(config).is_err());
    }

    /// Returns a fixed order regardless of the input.
    struct FixedOrder(Vec<usize>);

    impl OrderingStrategy for FixedOrder {
        fn order(&self, _points: &[(f64, f64)], _start: Option<(f64, f64)>) -> Vec<usize> {
            self.0.clone()
        }
    }

    fn two_tasks() -> PlanRequest {
        PlanRequest::new(vec![
            Task::new("a", "A").at(0.0, 0.0),
            Task::new("b", "B").at(0.0, 1.0),
        ])
    }

    #[test]
    fn test_rejects_non_permutation_orders() {
        for bad in [vec![0, 0], vec![0, 2], vec![0], vec![1, 0, 1]] {
            let planner =
                RoutePlanner::with_strategy(PlannerConfig::default(), FixedOrder(bad.clone()))
                    .unwrap();
            let err = planner.plan(&two_tasks()).unwrap_err();
            assert!(
                matches!(&err, PlanError::InvalidOrdering { expected: 2, order } if *order == bad),
                "unexpected error for {bad:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_accepts_custom_permutation() {
        let planner =
            RoutePlanner::with_strategy(PlannerConfig::default(), FixedOrder(vec![1, 0])).unwrap();
        let plan = planner.plan(&two_tasks()).unwrap();
        assert_eq!(plan.task_ids().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_planner_keeps_its_config() {
        let config = PlannerConfig {
            buffer_minutes_per_stop: 12,
            ..PlannerConfig::default()
        };
        let planner = RoutePlanner::new(config.clone()).unwrap();
        assert_eq!(planner.config(), &config);
    }
}

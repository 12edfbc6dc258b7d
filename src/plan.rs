//! Output model: the planned route.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown when there is nothing worth routing.
pub const INSUFFICIENT_TASKS_MESSAGE: &str =
    "need at least two tasks with locations to plan a route";

/// One stop of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub task_id: String,
    pub title: String,
    pub location: Option<String>,
    /// `(lat, lng)`, serialized as a two-element array.
    pub coordinates: (f64, f64),
    /// Zero for the first stop.
    pub distance_from_previous_km: f64,
    pub estimated_duration_minutes: u32,
    pub position_index: usize,
    /// True when `coordinates` were synthesized from the task id.
    #[serde(default)]
    pub synthetic_coordinates: bool,
}

/// A visiting order plus aggregate distance and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub route: Vec<RouteStop>,
    pub total_distance_km: f64,
    pub estimated_time_minutes: u32,
    pub task_count: usize,
    /// False when there were fewer than two tasks to route.
    pub optimized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RoutePlan {
    /// A plan that routes nothing, carrying the reason. `task_count` reports
    /// how many tasks were supplied.
    pub fn insufficient(task_count: usize) -> Self {
        Self {
            route: Vec::new(),
            total_distance_km: 0.0,
            estimated_time_minutes: 0,
            task_count,
            optimized: false,
            message: Some(INSUFFICIENT_TASKS_MESSAGE.to_string()),
        }
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.route.iter().map(|stop| stop.task_id.as_str())
    }
}

/// Plain-text listing, e.g. for a chat reply or a calendar body.
impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.optimized {
            let message = self
                .message
                .as_deref()
                .unwrap_or("route planning unavailable");
            return f.write_str(message);
        }
        if self.route.is_empty() {
            return f.write_str("no route generated");
        }

        writeln!(f, "Optimized route ({} stops)", self.route.len())?;
        writeln!(f, "Total distance: {:.2} km", self.total_distance_km)?;
        writeln!(f, "Estimated time: {} minutes", self.estimated_time_minutes)?;
        writeln!(f)?;
        write!(f, "Route order:")?;

        for stop in &self.route {
            let location = stop.location.as_deref().unwrap_or("Location");
            write!(f, "\n{}. {} - {}", stop.position_index + 1, stop.title, location)?;
            if stop.position_index > 0 {
                write!(f, " ({:.2} km away)", stop.distance_from_previous_km)?;
            }
        }
        Ok(())
    }
}

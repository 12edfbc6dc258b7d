//! Turning a plan into something other apps can open.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PlanError;
use crate::plan::{RoutePlan, RouteStop};

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Intermediate stops most map apps accept in one directions link.
pub const DEFAULT_MAX_WAYPOINTS: usize = 9;

/// Multi-stop directions link: first stop is the origin, last stop the
/// destination, and up to `max_waypoints` stops in between become waypoints.
/// Later intermediate stops past the cap are dropped.
pub fn directions_url(plan: &RoutePlan, max_waypoints: usize) -> Result<Url, PlanError> {
    let (first, rest) = plan.route.split_first().ok_or(PlanError::EmptyRoute)?;

    let mut url = Url::parse(DIRECTIONS_BASE_URL)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("api", "1");
        query.append_pair("origin", &waypoint(first));

        if let Some((last, middle)) = rest.split_last() {
            query.append_pair("destination", &waypoint(last));

            let waypoints = middle
                .iter()
                .take(max_waypoints)
                .map(waypoint)
                .collect::<Vec<_>>();
            if !waypoints.is_empty() {
                query.append_pair("waypoints", &waypoints.join("|"));
            }
        } else {
            query.append_pair("destination", &waypoint(first));
        }

        query.append_pair("travelmode", "driving");
    }

    Ok(url)
}

/// Synthetic coordinates are only a stand-in, so a label is more useful to a
/// map app when there is one.
fn waypoint(stop: &RouteStop) -> String {
    match stop.location.as_deref() {
        Some(label) if stop.synthetic_coordinates && !label.trim().is_empty() => label.to_string(),
        _ => format!("{:.6},{:.6}", stop.coordinates.0, stop.coordinates.1),
    }
}

/// Payload for blocking out time for an errand run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub title: String,
    pub duration_minutes: u32,
    pub body: String,
}

impl CalendarEntry {
    /// `None` for plans that route nothing.
    pub fn from_plan(plan: &RoutePlan) -> Option<Self> {
        if !plan.optimized || plan.route.is_empty() {
            return None;
        }

        Some(Self {
            title: format!("Errand run ({} stops)", plan.route.len()),
            duration_minutes: plan.estimated_time_minutes,
            body: plan.to_string(),
        })
    }
}

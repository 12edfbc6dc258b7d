//! errand-planner
//!
//! Orders location-bearing tasks into an errand run and estimates how far
//! and how long it is, without any network access.

pub mod config;
pub mod error;
pub mod estimator;
pub mod handoff;
pub mod haversine;
pub mod optimizer;
pub mod plan;
pub mod planner;
pub mod resolver;
pub mod task;
pub mod traits;

pub use config::PlannerConfig;
pub use error::PlanError;
pub use plan::{RoutePlan, RouteStop};
pub use planner::{PlanRequest, RoutePlanner, plan_route};
pub use task::{GeoPoint, Task};

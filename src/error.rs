//! Error types for route planning.

use thiserror::Error;

/// Errors surfaced by the planner.
///
/// "No route possible" is not an error: it is reported through
/// `RoutePlan::optimized == false`. These variants cover malformed input
/// and configuration only.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A task lacks an identifier or title.
    #[error("task at position {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Two tasks in the same request share an identifier.
    #[error("task id `{0}` appears more than once")]
    DuplicateTaskId(String),

    /// A configuration value (or per-request override) is out of range.
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidConfig { key: &'static str, message: String },

    /// An ordering strategy returned something other than a permutation
    /// of the task indices.
    #[error("ordering strategy returned an invalid order for {expected} tasks: {order:?}")]
    InvalidOrdering { expected: usize, order: Vec<usize> },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A handoff helper was given a plan without stops.
    #[error("route has no stops")]
    EmptyRoute,

    #[error("invalid directions url: {0}")]
    Url(#[from] url::ParseError),
}

impl PlanError {
    pub(crate) fn invalid_config(key: &'static str, message: impl Into<String>) -> Self {
        PlanError::InvalidConfig {
            key,
            message: message.into(),
        }
    }
}

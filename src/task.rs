//! Input model: errand tasks and geographic points.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Execution time assumed for tasks that don't carry an estimate.
pub const DEFAULT_TASK_MINUTES: u32 = 15;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the usual bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `(lat, lng)` tuple, the shape the distance code works on.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A task handed over by the extraction pipeline or the task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Human-readable place, e.g. "Safeway on Market St".
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "location_coordinates")]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    /// Free-form kind ("errand", "appointment", ...).
    #[serde(default, alias = "category_type")]
    pub category: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: None,
            coordinates: None,
            estimated_duration_minutes: None,
            category: None,
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn located(mut self, label: impl Into<String>) -> Self {
        self.location = Some(label.into());
        self
    }

    pub fn duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = Some(minutes);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Execution time in minutes, falling back to [`DEFAULT_TASK_MINUTES`].
    pub fn duration_minutes(&self) -> u32 {
        self.estimated_duration_minutes.unwrap_or(DEFAULT_TASK_MINUTES)
    }

    /// Supplied coordinates, if present and inside valid bounds.
    pub fn valid_coordinates(&self) -> Option<GeoPoint> {
        self.coordinates.filter(GeoPoint::is_valid)
    }

    /// Whether the task carries any location information at all.
    pub fn has_location(&self) -> bool {
        let labelled = self
            .location
            .as_deref()
            .is_some_and(|label| !label.trim().is_empty());
        labelled || self.coordinates.is_some()
    }
}

/// Keep only tasks with location information, optionally restricted to one
/// category. Input order is preserved.
///
/// This is the filter callers apply before planning; the planner itself
/// routes whatever it is given.
pub fn select_eligible<'a, I>(tasks: I, category: Option<&str>) -> Vec<Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task.has_location())
        .filter(|task| match category {
            Some(wanted) => task.category.as_deref() == Some(wanted),
            None => true,
        })
        .cloned()
        .collect()
}

/// Reject task lists that would break the one-stop-per-task mapping.
pub(crate) fn validate_tasks(tasks: &[Task]) -> Result<(), PlanError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if task.id.trim().is_empty() {
            return Err(PlanError::MissingField { index, field: "id" });
        }
        if task.title.trim().is_empty() {
            return Err(PlanError::MissingField {
                index,
                field: "title",
            });
        }
        if !seen.insert(task.id.as_str()) {
            return Err(PlanError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

//! Real San Francisco locations for realistic errand fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

use errand_planner::Task;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// A task at this location, titled after it.
    pub fn task(&self, id: &str) -> Task {
        Task::new(id, format!("Errand at {}", self.name))
            .located(self.name)
            .at(self.lat, self.lng)
    }
}

// ============================================================================
// Groceries / Pharmacies
// ============================================================================

pub const GROCERIES: &[Location] = &[
    Location::new("Safeway Market St", 37.7689, -122.4274),
    Location::new("Trader Joe's Masonic", 37.7831, -122.4469),
    Location::new("Rainbow Grocery", 37.7690, -122.4152),
    Location::new("Whole Foods Ocean Ave", 37.7236, -122.4549),
];

pub const PHARMACIES: &[Location] = &[
    Location::new("Walgreens Castro", 37.7617, -122.4350),
    Location::new("CVS Mission St", 37.7847, -122.4065),
];

// ============================================================================
// Services
// ============================================================================

pub const SERVICES: &[Location] = &[
    Location::new("USPS Rincon Center", 37.7924, -122.3934),
    Location::new("Main Library", 37.7791, -122.4158),
    Location::new("DMV Fell St", 37.7748, -122.4295),
    Location::new("Ferry Building", 37.7955, -122.3937),
];

/// A mixed errand list spread across the city, in arbitrary order.
pub fn mixed_errands(count: usize) -> Vec<Task> {
    GROCERIES
        .iter()
        .chain(PHARMACIES)
        .chain(SERVICES)
        .take(count)
        .enumerate()
        .map(|(i, location)| {
            location
                .task(&format!("errand-{i}"))
                .duration(10 + (i as u32 % 3) * 10)
        })
        .collect()
}

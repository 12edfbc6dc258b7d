//! Test fixtures for errand-planner.
//!
//! Provides realistic test data:
//! - Real San Francisco errand locations (from OpenStreetMap)
//! - Builders for errand task lists

pub mod san_francisco_locations;

pub use san_francisco_locations::*;

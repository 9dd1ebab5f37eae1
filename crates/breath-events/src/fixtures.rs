//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // breath-events = { path = "../breath-events", features = ["test-fixtures"] }
//!
//! use breath_events::fixtures;
//!
//! let env = fixtures::environment("snowy_plains");
//! ```

use std::collections::HashMap;

use crate::{EnvironmentSample, SubjectState};

/// Returns the named sample environments from the fixtures file.
///
/// Contains:
/// - `snowy_plains`: overworld, biome temperature 0.0
/// - `plains_dawn`: overworld, 0.8, inside the default condensation window
/// - `plains_noon`: overworld, 0.8, midday
/// - `mountain_peak`: overworld, 0.3 at y=200
/// - `nether_wastes`: nether, 2.0
/// - `end_islands`: end, 0.5
pub fn sample_environments() -> HashMap<String, EnvironmentSample> {
    let json = include_str!("../tests/fixtures/sample_environments.json");
    serde_json::from_str(json).expect("Failed to parse sample_environments.json")
}

/// Returns one named environment, panicking when it is missing.
pub fn environment(name: &str) -> EnvironmentSample {
    sample_environments()
        .remove(name)
        .unwrap_or_else(|| panic!("No fixture environment named '{}'", name))
}

/// A healthy subject standing still.
pub fn resting_subject() -> SubjectState {
    SubjectState::resting()
}

/// A healthy subject sprinting.
pub fn sprinting_subject() -> SubjectState {
    SubjectState::resting().sprinting(true)
}

/// A subject at a quarter health.
pub fn wounded_subject() -> SubjectState {
    SubjectState::resting().with_health(5.0, 20.0)
}

/// A healthy subject with its head under water.
pub fn diving_subject() -> SubjectState {
    SubjectState::resting().submerged(true)
}

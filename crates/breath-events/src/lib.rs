//! Shared data types for the cold-breath engine.
//!
//! This crate contains pure data structures with no scheduling logic. The
//! host fills in environment and subject samples each tick; the engine
//! answers with eligibility results and breath events.

pub mod environment;
pub mod event;
pub mod season;
pub mod subject;
pub mod time;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export time constants
pub use time::{days_elapsed, tick_seconds, TICKS_PER_DAY, TICKS_PER_SECOND};

pub use environment::{DimensionKind, EnvironmentSample};
pub use subject::SubjectState;

pub use season::{ParsePhaseError, SeasonMod, SeasonPhase, SeasonSnapshot, SEASON_PHASE_COUNT};

pub use event::{BreathEvent, BreathState, DenyReason, Eligibility, EmitKind};

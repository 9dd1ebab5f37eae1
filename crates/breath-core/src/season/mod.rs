//! Seasonal temperature sources.
//!
//! The engine never asks which seasons provider is installed. It holds one
//! [`SeasonSource`] chosen by the host at startup and samples it when it is
//! about to evaluate eligibility. Sources never fail: anything that goes
//! wrong degrades to the placeholder cycle or an empty snapshot.

pub mod fabric;
pub mod serene;

use thiserror::Error;

use breath_events::{days_elapsed, SeasonMod, SeasonPhase, SeasonSnapshot, SEASON_PHASE_COUNT};

use crate::config::SeasonsConfig;

pub use fabric::{FabricQuery, FabricSeasons, FabricState};
pub use serene::{SereneQuery, SereneSeasons, SereneState};

/// Supplies season data for a world time.
pub trait SeasonSource {
    /// Provider behind this source.
    fn kind(&self) -> SeasonMod;

    /// Samples the season at `world_time`. Must be cheap and must not block.
    fn sample(&mut self, world_time: u64) -> SeasonSnapshot;
}

/// Errors a host season query may report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeasonQueryError {
    /// The provider's API could not be found
    #[error("season API unavailable: {0}")]
    Unavailable(String),
    /// The provider's API was found but the call failed
    #[error("season query failed: {0}")]
    Failed(String),
}

/// No seasons provider. Always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaSeasons;

impl SeasonSource for VanillaSeasons {
    fn kind(&self) -> SeasonMod {
        SeasonMod::None
    }

    fn sample(&mut self, _world_time: u64) -> SeasonSnapshot {
        SeasonSnapshot::empty(SeasonMod::None)
    }
}

/// Deterministic stand-in: advances one phase per in-game day.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderSeasons {
    kind: SeasonMod,
}

impl PlaceholderSeasons {
    pub fn new(kind: SeasonMod) -> Self {
        Self { kind }
    }
}

impl SeasonSource for PlaceholderSeasons {
    fn kind(&self) -> SeasonMod {
        self.kind
    }

    fn sample(&mut self, world_time: u64) -> SeasonSnapshot {
        placeholder_snapshot(self.kind, world_time)
    }
}

/// Placeholder cycle used when a provider is present but has no live data.
///
/// Phase is the number of elapsed days modulo twelve; no temperature bias.
/// Without a provider the snapshot is empty.
pub fn placeholder_snapshot(kind: SeasonMod, world_time: u64) -> SeasonSnapshot {
    if kind == SeasonMod::None {
        return SeasonSnapshot::empty(kind);
    }
    let index = (days_elapsed(world_time) % SEASON_PHASE_COUNT as u64) as usize;
    SeasonSnapshot::new(kind, SeasonPhase::from_ordinal(index), 0.0)
}

/// Samples `source` subject to the season settings.
///
/// Seasons disabled, no provider, or a provider whose integration is turned
/// off all produce an empty snapshot without touching the source.
pub fn sample_gated(
    source: &mut dyn SeasonSource,
    config: &SeasonsConfig,
    world_time: u64,
) -> SeasonSnapshot {
    if !config.enabled {
        return SeasonSnapshot::empty(SeasonMod::None);
    }
    let integrated = match source.kind() {
        SeasonMod::None => false,
        SeasonMod::SereneSeasons => config.serene_integration,
        SeasonMod::FabricSeasons => config.fabric_integration,
    };
    if !integrated {
        return SeasonSnapshot::empty(SeasonMod::None);
    }
    source.sample(world_time)
}

//! Effective temperature model.
//!
//! Starts from the biome temperature, cools with height above sea level and
//! shifts with the season. Values are never clamped: thresholds are compared
//! against the raw result.

use serde::{Deserialize, Serialize};

use breath_events::{EnvironmentSample, SeasonSnapshot};

use crate::config::BreathConfig;

/// Effective temperature split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TemperatureBreakdown {
    /// Biome temperature at the subject's position
    pub base: f64,
    /// Blocks above sea level, negative below
    pub blocks_above_sea_level: i64,
    /// Change contributed by altitude (negative above sea level)
    pub altitude_offset: f64,
    /// Change contributed by the season
    pub season_offset: f64,
    /// Sum of the above
    pub effective: f64,
}

/// Computes the effective temperature and its components.
pub fn temperature_breakdown(
    env: &EnvironmentSample,
    config: &BreathConfig,
    season: &SeasonSnapshot,
) -> TemperatureBreakdown {
    let base = env.biome_temperature;
    let blocks_above_sea_level = env.blocks_above_sea_level();
    let altitude_offset = if config.altitude.enabled {
        -(blocks_above_sea_level as f64) * config.altitude.temperature_rate
    } else {
        0.0
    };
    let season_offset = season_offset(config, season);

    TemperatureBreakdown {
        base,
        blocks_above_sea_level,
        altitude_offset,
        season_offset,
        effective: base + altitude_offset + season_offset,
    }
}

/// Effective temperature at the subject's position.
pub fn effective_temperature(
    env: &EnvironmentSample,
    config: &BreathConfig,
    season: &SeasonSnapshot,
) -> f64 {
    temperature_breakdown(env, config, season).effective
}

/// Seasonal contribution: provider bias plus the configured per-phase offset.
///
/// Zero when seasons are disabled or no provider produced the snapshot.
pub fn season_offset(config: &BreathConfig, season: &SeasonSnapshot) -> f64 {
    if !config.seasons.enabled || !season.is_seasonal() {
        return 0.0;
    }
    season.temperature_bias + config.seasons.temperature_offset(season.phase)
}

//! Breath eligibility.
//!
//! Decides whether breath may show this tick. Checks run in a fixed priority
//! order and the first one that matches decides:
//!
//! 1. master toggle
//! 2. spectator, sleeping, dead
//! 3. creative visibility
//! 4. submersion (decides alone; nothing below applies)
//! 5. Nether/End visibility toggles (an allowed Nether/End skips temperature)
//! 6. always-show flag, or effective temperature at or below the always-breath threshold
//! 7. condensation window
//!
//! `always_show_breath` sits below the dimension checks, so it never reveals
//! breath in a hidden Nether or End.

use serde::{Deserialize, Serialize};

use breath_events::{
    DenyReason, DimensionKind, Eligibility, EnvironmentSample, SeasonSnapshot, SubjectState,
};

use crate::config::BreathConfig;
use crate::temperature::effective_temperature;

/// Evaluates eligibility for the current tick.
pub fn evaluate(
    env: &EnvironmentSample,
    subject: &SubjectState,
    config: &BreathConfig,
    season: &SeasonSnapshot,
) -> Eligibility {
    let general = &config.general;

    if !general.enabled {
        return Eligibility::deny(DenyReason::Disabled);
    }
    if subject.spectator {
        return Eligibility::deny(DenyReason::Spectator);
    }
    if subject.sleeping {
        return Eligibility::deny(DenyReason::Sleeping);
    }
    if subject.dead {
        return Eligibility::deny(DenyReason::Dead);
    }
    if subject.creative && !general.visible_in_creative {
        return Eligibility::deny(DenyReason::Creative);
    }

    if subject.submerged {
        return if config.underwater.enabled {
            Eligibility::allow()
        } else {
            Eligibility::deny(DenyReason::Underwater)
        };
    }

    match env.dimension {
        DimensionKind::Nether if general.visible_in_nether => return Eligibility::allow(),
        DimensionKind::Nether => return Eligibility::deny(DenyReason::NetherHidden),
        DimensionKind::End if general.visible_in_end => return Eligibility::allow(),
        DimensionKind::End => return Eligibility::deny(DenyReason::EndHidden),
        DimensionKind::Overworld | DimensionKind::Other => {}
    }

    let temperature = effective_temperature(env, config, season);
    if general.always_show_breath || temperature <= general.always_breath_temperature {
        return Eligibility::allow();
    }

    if !condensation_enabled(config, season) {
        return Eligibility::deny(DenyReason::CondensationOff);
    }
    let condensation = &config.condensation;
    if !is_within_day_window(env.time_of_day(), condensation.start_tick, condensation.end_tick) {
        return Eligibility::deny(DenyReason::CondensationWindow);
    }
    if condensation_temperature_ok(temperature, config) {
        Eligibility::allow()
    } else {
        Eligibility::deny(DenyReason::Temperature)
    }
}

/// True if `time` lies in the inclusive window `[start, end]`.
///
/// A window with `start > end` wraps past the end of the day. A window with
/// `start == end` is empty.
pub fn is_within_day_window(time: u64, start: u64, end: u64) -> bool {
    if start == end {
        return false;
    }
    if start < end {
        start <= time && time <= end
    } else {
        time >= start || time <= end
    }
}

/// Whether the condensation window applies at all.
///
/// Requires the global toggle and, while a season provider is active, the
/// flag for the current phase.
pub fn condensation_enabled(config: &BreathConfig, season: &SeasonSnapshot) -> bool {
    if !config.condensation.enabled {
        return false;
    }
    if config.seasons.enabled && season.is_seasonal() {
        return config.seasons.condensation_enabled(season.phase);
    }
    true
}

/// Condensation only covers temperatures above the always-breath threshold.
pub fn condensation_temperature_ok(temperature: f64, config: &BreathConfig) -> bool {
    temperature > config.general.always_breath_temperature
        && temperature <= config.condensation.max_temperature
}

/// Condensation state for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CondensationStatus {
    /// Off globally or for this season phase
    Disabled,
    /// In the window and in the temperature band
    Active,
    Inactive,
}

impl CondensationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CondensationStatus::Disabled => "disabled",
            CondensationStatus::Active => "true",
            CondensationStatus::Inactive => "false",
        }
    }
}

/// Reports whether the condensation window is what would show breath now.
pub fn condensation_status(
    env: &EnvironmentSample,
    config: &BreathConfig,
    season: &SeasonSnapshot,
) -> CondensationStatus {
    if !condensation_enabled(config, season) {
        return CondensationStatus::Disabled;
    }
    let condensation = &config.condensation;
    let in_window =
        is_within_day_window(env.time_of_day(), condensation.start_tick, condensation.end_tick);
    let temperature = effective_temperature(env, config, season);
    if in_window && condensation_temperature_ok(temperature, config) {
        CondensationStatus::Active
    } else {
        CondensationStatus::Inactive
    }
}

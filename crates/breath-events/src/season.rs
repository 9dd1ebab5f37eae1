//! Season types
//!
//! A seasonal year is split into twelve sub-seasons. Providers that only know
//! four seasons map onto the middle phase of each.
//!
//! # Example
//!
//! ```
//! use breath_events::{SeasonPhase, SeasonMod, SeasonSnapshot};
//!
//! let phase: SeasonPhase = "mid_winter".parse().unwrap();
//! assert_eq!(phase.display_name(), "mid winter");
//! assert!(phase.is_winter());
//!
//! let empty = SeasonSnapshot::empty(SeasonMod::None);
//! assert_eq!(empty.phase, SeasonPhase::Unknown);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of named season phases in a yearly cycle.
pub const SEASON_PHASE_COUNT: usize = 12;

/// One of the twelve sub-seasons, or `Unknown` when no provider knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    EarlySpring,
    MidSpring,
    LateSpring,
    EarlySummer,
    MidSummer,
    LateSummer,
    EarlyAutumn,
    MidAutumn,
    LateAutumn,
    EarlyWinter,
    MidWinter,
    LateWinter,
    #[default]
    Unknown,
}

const ORDERED: [SeasonPhase; SEASON_PHASE_COUNT] = [
    SeasonPhase::EarlySpring,
    SeasonPhase::MidSpring,
    SeasonPhase::LateSpring,
    SeasonPhase::EarlySummer,
    SeasonPhase::MidSummer,
    SeasonPhase::LateSummer,
    SeasonPhase::EarlyAutumn,
    SeasonPhase::MidAutumn,
    SeasonPhase::LateAutumn,
    SeasonPhase::EarlyWinter,
    SeasonPhase::MidWinter,
    SeasonPhase::LateWinter,
];

impl SeasonPhase {
    /// Returns the twelve named phases in yearly order, starting at early spring.
    pub fn ordered() -> &'static [SeasonPhase; SEASON_PHASE_COUNT] {
        &ORDERED
    }

    /// Returns the phase at `ordinal` in yearly order, or `Unknown` when out of range.
    pub fn from_ordinal(ordinal: usize) -> Self {
        ORDERED.get(ordinal).copied().unwrap_or(SeasonPhase::Unknown)
    }

    /// Position in yearly order. `None` for `Unknown`.
    pub fn index(self) -> Option<usize> {
        ORDERED.iter().position(|p| *p == self)
    }

    /// Lenient name lookup: anything unparseable becomes `Unknown`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(SeasonPhase::Unknown)
    }

    /// Returns the next phase in order. `Unknown` stays `Unknown`.
    pub fn next(self) -> Self {
        match self.index() {
            Some(i) => ORDERED[(i + 1) % SEASON_PHASE_COUNT],
            None => SeasonPhase::Unknown,
        }
    }

    /// Human-readable name such as "early spring".
    pub fn display_name(self) -> &'static str {
        match self {
            SeasonPhase::EarlySpring => "early spring",
            SeasonPhase::MidSpring => "mid spring",
            SeasonPhase::LateSpring => "late spring",
            SeasonPhase::EarlySummer => "early summer",
            SeasonPhase::MidSummer => "mid summer",
            SeasonPhase::LateSummer => "late summer",
            SeasonPhase::EarlyAutumn => "early autumn",
            SeasonPhase::MidAutumn => "mid autumn",
            SeasonPhase::LateAutumn => "late autumn",
            SeasonPhase::EarlyWinter => "early winter",
            SeasonPhase::MidWinter => "mid winter",
            SeasonPhase::LateWinter => "late winter",
            SeasonPhase::Unknown => "unknown",
        }
    }

    pub fn is_winter(self) -> bool {
        matches!(
            self,
            SeasonPhase::EarlyWinter | SeasonPhase::MidWinter | SeasonPhase::LateWinter
        )
    }

    pub fn is_summer(self) -> bool {
        matches!(
            self,
            SeasonPhase::EarlySummer | SeasonPhase::MidSummer | SeasonPhase::LateSummer
        )
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a season phase name is not recognised.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsePhaseError(pub String);

impl fmt::Display for ParsePhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid season phase: '{}'", self.0)
    }
}

impl std::error::Error for ParsePhaseError {}

impl FromStr for SeasonPhase {
    type Err = ParsePhaseError;

    /// Accepts "EARLY_SPRING", "early_spring" and "early spring".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "unknown" {
            return Ok(SeasonPhase::Unknown);
        }
        ORDERED
            .iter()
            .copied()
            .find(|phase| phase.display_name().replace(' ', "_") == normalized)
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}

/// Which seasonal provider produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonMod {
    /// No provider; vanilla behaviour
    #[default]
    None,
    /// Twelve sub-season provider (Serene Seasons)
    SereneSeasons,
    /// Four-season provider (Fabric Seasons)
    FabricSeasons,
}

impl SeasonMod {
    pub fn display_name(self) -> &'static str {
        match self {
            SeasonMod::None => "none",
            SeasonMod::SereneSeasons => "Serene Seasons",
            SeasonMod::FabricSeasons => "Fabric Seasons",
        }
    }
}

impl fmt::Display for SeasonMod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Season state sampled from a provider for one world time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonSnapshot {
    /// Provider that produced this sample
    pub mod_kind: SeasonMod,
    /// Current phase
    pub phase: SeasonPhase,
    /// Signed temperature bias contributed by the provider
    pub temperature_bias: f64,
    /// Day within the season cycle (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_in_cycle: Option<u32>,
    /// Length of the season cycle in ticks (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_ticks: Option<u32>,
}

impl SeasonSnapshot {
    /// Creates a snapshot with a known phase and bias.
    pub fn new(mod_kind: SeasonMod, phase: SeasonPhase, temperature_bias: f64) -> Self {
        Self {
            mod_kind,
            phase,
            temperature_bias,
            day_in_cycle: None,
            cycle_ticks: None,
        }
    }

    /// A snapshot carrying no season data.
    pub fn empty(mod_kind: SeasonMod) -> Self {
        Self::new(mod_kind, SeasonPhase::Unknown, 0.0)
    }

    /// Attaches informational cycle data.
    pub fn with_cycle(mut self, day_in_cycle: u32, cycle_ticks: u32) -> Self {
        self.day_in_cycle = Some(day_in_cycle);
        self.cycle_ticks = Some(cycle_ticks);
        self
    }

    /// True when a provider supplied this snapshot.
    pub fn is_seasonal(&self) -> bool {
        self.mod_kind != SeasonMod::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordinals() {
        assert_eq!(SeasonPhase::from_ordinal(0), SeasonPhase::EarlySpring);
        assert_eq!(SeasonPhase::from_ordinal(11), SeasonPhase::LateWinter);
        assert_eq!(SeasonPhase::from_ordinal(12), SeasonPhase::Unknown);
        assert_eq!(SeasonPhase::MidAutumn.index(), Some(7));
        assert_eq!(SeasonPhase::Unknown.index(), None);
    }

    #[test]
    fn test_phase_parse() {
        assert_eq!("EARLY_SPRING".parse::<SeasonPhase>().unwrap(), SeasonPhase::EarlySpring);
        assert_eq!("mid summer".parse::<SeasonPhase>().unwrap(), SeasonPhase::MidSummer);
        assert_eq!("late-autumn".parse::<SeasonPhase>().unwrap(), SeasonPhase::LateAutumn);
        assert!("monsoon".parse::<SeasonPhase>().is_err());
        assert_eq!(SeasonPhase::from_name("monsoon"), SeasonPhase::Unknown);
        assert_eq!(SeasonPhase::from_name(""), SeasonPhase::Unknown);
    }

    #[test]
    fn test_phase_next_wraps() {
        assert_eq!(SeasonPhase::LateWinter.next(), SeasonPhase::EarlySpring);
        assert_eq!(SeasonPhase::EarlySpring.next(), SeasonPhase::MidSpring);
        assert_eq!(SeasonPhase::Unknown.next(), SeasonPhase::Unknown);
    }

    #[test]
    fn test_phase_groups() {
        assert!(SeasonPhase::LateWinter.is_winter());
        assert!(!SeasonPhase::LateAutumn.is_winter());
        assert!(SeasonPhase::EarlySummer.is_summer());
        assert!(!SeasonPhase::Unknown.is_summer());
    }

    #[test]
    fn test_phase_serialization() {
        assert_eq!(
            serde_json::to_string(&SeasonPhase::MidWinter).unwrap(),
            r#""mid_winter""#
        );
        assert_eq!(
            serde_json::to_string(&SeasonMod::SereneSeasons).unwrap(),
            r#""serene_seasons""#
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = SeasonSnapshot::empty(SeasonMod::FabricSeasons);
        assert_eq!(snapshot.phase, SeasonPhase::Unknown);
        assert_eq!(snapshot.temperature_bias, 0.0);
        assert!(snapshot.is_seasonal());
        assert!(!SeasonSnapshot::default().is_seasonal());
    }

    #[test]
    fn test_snapshot_cycle_skipped_when_absent() {
        let json = serde_json::to_string(&SeasonSnapshot::empty(SeasonMod::None)).unwrap();
        assert!(!json.contains("day_in_cycle"));

        let with_cycle = SeasonSnapshot::new(SeasonMod::SereneSeasons, SeasonPhase::MidWinter, -0.15)
            .with_cycle(4, 24000);
        let json = serde_json::to_string(&with_cycle).unwrap();
        assert!(json.contains(r#""day_in_cycle":4"#));
    }
}

//! Eligibility results and breath event payloads.
//!
//! These are what listeners and status displays see: why breath is or is
//! not visible, and what the world looked like when a breath fired.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::environment::EnvironmentSample;
use crate::season::{SeasonMod, SeasonPhase};

/// Why breath is not visible right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// Master toggle is off
    Disabled,
    Spectator,
    Sleeping,
    Dead,
    /// Creative mode with creative visibility off
    Creative,
    /// Submerged with underwater breath off
    Underwater,
    NetherHidden,
    EndHidden,
    /// Too warm for breath
    Temperature,
    /// Condensation allowed, but not at this time of day
    CondensationWindow,
    /// Condensation disabled globally or for the current season phase
    CondensationOff,
}

impl DenyReason {
    /// Stable human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::Disabled => "disabled",
            DenyReason::Spectator => "spectator",
            DenyReason::Sleeping => "sleeping",
            DenyReason::Dead => "dead",
            DenyReason::Creative => "creative",
            DenyReason::Underwater => "underwater",
            DenyReason::NetherHidden => "nether hidden",
            DenyReason::EndHidden => "end hidden",
            DenyReason::Temperature => "temperature",
            DenyReason::CondensationWindow => "condensation window",
            DenyReason::CondensationOff => "condensation off",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allow/deny decision for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub allowed: bool,
    /// Set exactly when `allowed` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
}

impl Eligibility {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Short explanation such as "true" or "false (nether hidden)".
    pub fn explain(&self) -> String {
        match self.reason {
            None => "true".to_string(),
            Some(reason) => format!("false ({})", reason),
        }
    }
}

/// Kind of visual the emitter should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmitKind {
    /// Condensed breath puff
    Air,
    /// Bubbles
    Underwater,
    #[default]
    None,
}

/// Breath state captured at trigger time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathState {
    /// Whether breath is visible
    pub visible: bool,
    /// Why not, when not visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invisible_reason: Option<DenyReason>,
    /// Effective temperature including altitude and season
    pub effective_temperature: f64,
    /// Visible only because of the condensation window
    pub condensation_active: bool,
    /// Breath is bubbles
    pub underwater: bool,
    pub season_mod: SeasonMod,
    pub season_phase: SeasonPhase,
}

/// Notification delivered to listeners once per triggered breath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathEvent {
    /// World tick the breath fired on
    pub tick: u64,
    pub kind: EmitKind,
    pub state: BreathState,
    /// Environment at trigger time
    pub environment: EnvironmentSample,
}

impl BreathEvent {
    /// Serializes to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses from a single JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_reason_labels() {
        assert_eq!(DenyReason::Underwater.as_str(), "underwater");
        assert_eq!(DenyReason::NetherHidden.to_string(), "nether hidden");
        assert_eq!(
            serde_json::to_string(&DenyReason::CondensationWindow).unwrap(),
            r#""condensation_window""#
        );
    }

    #[test]
    fn test_eligibility_constructors() {
        let allowed = Eligibility::allow();
        assert!(allowed.allowed);
        assert_eq!(allowed.reason, None);
        assert_eq!(allowed.explain(), "true");

        let denied = Eligibility::deny(DenyReason::EndHidden);
        assert!(!denied.allowed);
        assert_eq!(denied.explain(), "false (end hidden)");
    }

    #[test]
    fn test_breath_event_jsonl() {
        let event = BreathEvent {
            tick: 120,
            kind: EmitKind::Air,
            state: BreathState {
                visible: true,
                invisible_reason: None,
                effective_temperature: 0.1,
                condensation_active: false,
                underwater: false,
                season_mod: SeasonMod::None,
                season_phase: SeasonPhase::Unknown,
            },
            environment: EnvironmentSample::new(120, 0.1),
        };

        let line = event.to_jsonl().unwrap();
        assert!(!line.contains('\n'));
        assert!(!line.contains("invisible_reason"));
        assert_eq!(BreathEvent::from_jsonl(&line).unwrap(), event);
    }
}

//! Tracked subject state.

use serde::{Deserialize, Serialize};

/// Per-tick state of the subject whose breath is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectState {
    /// Head is under a liquid surface
    pub submerged: bool,
    pub sprinting: bool,
    pub creative: bool,
    pub spectator: bool,
    pub sleeping: bool,
    pub dead: bool,
    /// Current health points
    pub health: f32,
    /// Maximum health points
    pub max_health: f32,
}

impl Default for SubjectState {
    fn default() -> Self {
        Self {
            submerged: false,
            sprinting: false,
            creative: false,
            spectator: false,
            sleeping: false,
            dead: false,
            health: 20.0,
            max_health: 20.0,
        }
    }
}

impl SubjectState {
    /// A healthy subject standing still.
    pub fn resting() -> Self {
        Self::default()
    }

    pub fn sprinting(mut self, sprinting: bool) -> Self {
        self.sprinting = sprinting;
        self
    }

    pub fn submerged(mut self, submerged: bool) -> Self {
        self.submerged = submerged;
        self
    }

    pub fn with_health(mut self, health: f32, max_health: f32) -> Self {
        self.health = health;
        self.max_health = max_health;
        self
    }

    /// Fraction of health missing, in `[0, 1]`. Zero when `max_health` is not positive.
    pub fn health_severity(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (1.0 - f64::from(self.health) / f64::from(self.max_health)).clamp(0.0, 1.0)
    }
}

//! Interval scheduling.
//!
//! Picks how long to wait before the next breath. The sprint and health
//! presets are each interpolated from the resting preset by their blend, and
//! whichever yields the shorter interval controls. Near-ties average the
//! deviations. The wait is drawn uniformly from `[base - dev, base + dev]`,
//! floored at [`MIN_INTERVAL_SECONDS`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use breath_events::TICKS_PER_SECOND;

use crate::config::{BreathConfig, MIN_INTERVAL_SECONDS};

/// Two intervals closer than this are considered equal.
pub const INTERVAL_TIE_EPSILON: f64 = 1e-6;

/// Which preset controls the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Sprint,
    Health,
    /// Sprint and health intervals agree
    Tied,
    Underwater,
}

/// Interval bounds, in seconds, for the next wait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalPlan {
    pub base: f64,
    pub deviation: f64,
    /// Shortest possible wait
    pub min: f64,
    /// Longest possible wait, never below `min`
    pub max: f64,
    pub regime: Regime,
}

impl IntervalPlan {
    fn from_base(base: f64, deviation: f64, regime: Regime) -> Self {
        let min = (base - deviation).max(MIN_INTERVAL_SECONDS);
        let max = (base + deviation).max(min);
        Self {
            base,
            deviation,
            min,
            max,
            regime,
        }
    }

    /// Draws a wait in seconds from `[min, max]`.
    pub fn draw_seconds<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    /// Draws a wait and converts it to ticks.
    pub fn draw_ticks<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        seconds_to_ticks(self.draw_seconds(rng))
    }
}

/// Interval plan for the air path given the current blends.
pub fn plan(config: &BreathConfig, sprint_blend: f64, health_blend: f64) -> IntervalPlan {
    let (after_sprint, dev_after_sprint, after_health, dev_after_health) =
        blended_intervals(config, sprint_blend, health_blend);

    if (after_sprint - after_health).abs() <= INTERVAL_TIE_EPSILON {
        IntervalPlan::from_base(
            after_sprint,
            0.5 * (dev_after_sprint + dev_after_health),
            Regime::Tied,
        )
    } else if after_sprint < after_health {
        IntervalPlan::from_base(after_sprint, dev_after_sprint, Regime::Sprint)
    } else {
        IntervalPlan::from_base(after_health, dev_after_health, Regime::Health)
    }
}

/// Interval plan while submerged: only the underwater preset applies.
pub fn underwater_plan(config: &BreathConfig) -> IntervalPlan {
    let base = config.underwater.base_interval_seconds.max(MIN_INTERVAL_SECONDS);
    let deviation = config.underwater.deviation_seconds.max(0.0);
    IntervalPlan::from_base(base, deviation, Regime::Underwater)
}

/// Returns `(after_sprint, dev_after_sprint, after_health, dev_after_health)`.
///
/// Blends of a disabled regime count as zero.
pub fn blended_intervals(
    config: &BreathConfig,
    sprint_blend: f64,
    health_blend: f64,
) -> (f64, f64, f64, f64) {
    let base_normal = config.interval.base_seconds.max(MIN_INTERVAL_SECONDS);
    let dev_normal = config.interval.deviation_seconds.max(0.0);
    let base_sprint = config.sprint.base_interval_seconds.max(MIN_INTERVAL_SECONDS);
    let dev_sprint = config.sprint.deviation_seconds.max(0.0);
    let base_health = config.health.low_health_interval_seconds.max(MIN_INTERVAL_SECONDS);
    let dev_health = config.health.deviation_seconds.max(0.0);

    let sprint_t = if config.sprint.enabled { sprint_blend } else { 0.0 };
    let health_t = if config.health.enabled { health_blend } else { 0.0 };

    (
        lerp(base_normal, base_sprint, sprint_t),
        lerp(dev_normal, dev_sprint, sprint_t),
        lerp(base_normal, base_health, health_t),
        lerp(dev_normal, dev_health, health_t),
    )
}

/// Converts seconds to ticks, rounding to nearest, never below one tick.
pub fn seconds_to_ticks(seconds: f64) -> u64 {
    let ticks = (seconds * f64::from(TICKS_PER_SECOND)).round();
    if ticks.is_finite() && ticks >= 1.0 {
        ticks as u64
    } else {
        1
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

//! Sprint and health blends.
//!
//! Two independent `[0, 1]` signals smoothed once per tick. The sprint blend
//! ramps linearly at configurable rates; the health blend follows the health
//! deficit with exponential smoothing since health moves in jumps.

use serde::{Deserialize, Serialize};

use breath_events::{tick_seconds, SubjectState};

use crate::config::BreathConfig;

/// Fraction of the remaining distance the health blend covers each tick.
pub const HEALTH_SMOOTHING: f64 = 0.2;

/// Changes smaller than this count as stable.
pub const TREND_EPSILON: f64 = 1e-6;

/// Direction a blend moved on the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    fn between(previous: f64, current: f64) -> Self {
        if current > previous + TREND_EPSILON {
            Trend::Rising
        } else if current < previous - TREND_EPSILON {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }
}

/// Smoothed sprint and health signals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlendTracker {
    sprint: f64,
    prev_sprint: f64,
    health: f64,
    prev_health: f64,
}

impl BlendTracker {
    /// Creates a tracker with both blends at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances both blends by one tick.
    pub fn update(&mut self, subject: &SubjectState, config: &BreathConfig) {
        self.prev_sprint = self.sprint;
        self.prev_health = self.health;
        self.update_sprint(subject, config);
        self.update_health(subject, config);
    }

    fn update_sprint(&mut self, subject: &SubjectState, config: &BreathConfig) {
        let up_rate = ramp_rate(config.sprint.build_up_seconds);
        let down_rate = ramp_rate(config.sprint.build_down_seconds);

        // Submersion counts as full exertion
        let target = if subject.submerged && config.underwater.enabled {
            1.0
        } else if subject.sprinting && config.sprint.enabled {
            1.0
        } else {
            0.0
        };

        if target > self.sprint {
            self.sprint = (self.sprint + up_rate).min(1.0);
        } else if target < self.sprint {
            self.sprint = (self.sprint - down_rate).max(0.0);
        }
    }

    fn update_health(&mut self, subject: &SubjectState, config: &BreathConfig) {
        if !config.health.enabled {
            self.health = 0.0;
            return;
        }
        let target = subject.health_severity();
        self.health = (self.health + HEALTH_SMOOTHING * (target - self.health)).clamp(0.0, 1.0);
    }

    pub fn sprint_blend(&self) -> f64 {
        self.sprint
    }

    pub fn prev_sprint_blend(&self) -> f64 {
        self.prev_sprint
    }

    pub fn health_blend(&self) -> f64 {
        self.health
    }

    pub fn prev_health_blend(&self) -> f64 {
        self.prev_health
    }

    pub fn sprint_trend(&self) -> Trend {
        Trend::between(self.prev_sprint, self.sprint)
    }

    pub fn health_trend(&self) -> Trend {
        Trend::between(self.prev_health, self.health)
    }
}

/// Per-tick change for a ramp lasting `seconds`; instantaneous when not positive.
pub fn ramp_rate(seconds: f64) -> f64 {
    if seconds <= 0.0 {
        1.0
    } else {
        tick_seconds() / seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breath_events::TICKS_PER_SECOND;

    fn sprinting() -> SubjectState {
        SubjectState::resting().sprinting(true)
    }

    #[test]
    fn test_starts_at_zero() {
        let tracker = BlendTracker::new();
        assert_eq!(tracker.sprint_blend(), 0.0);
        assert_eq!(tracker.health_blend(), 0.0);
        assert_eq!(tracker.sprint_trend(), Trend::Stable);
    }

    #[test]
    fn test_sprint_reaches_full_within_build_up() {
        let config = BreathConfig::default();
        let mut tracker = BlendTracker::new();
        let limit = (8.0 * f64::from(TICKS_PER_SECOND) * 1.05).ceil() as usize;

        let mut reached = None;
        for tick in 1..=limit {
            tracker.update(&sprinting(), &config);
            assert!(tracker.sprint_blend() <= 1.0);
            if reached.is_none() && tracker.sprint_blend() >= 0.99 {
                reached = Some(tick);
            }
        }
        assert!(reached.is_some(), "blend never reached 0.99");
        assert_eq!(tracker.sprint_blend(), 1.0);
    }

    #[test]
    fn test_sprint_is_monotonic_while_sprinting() {
        let config = BreathConfig::default();
        let mut tracker = BlendTracker::new();

        for _ in 0..400 {
            tracker.update(&sprinting(), &config);
            assert!(tracker.sprint_blend() >= tracker.prev_sprint_blend());
        }
    }

    #[test]
    fn test_sprint_builds_down_slower() {
        let config = BreathConfig::default();
        let mut tracker = BlendTracker::new();
        for _ in 0..200 {
            tracker.update(&sprinting(), &config);
        }
        assert_eq!(tracker.sprint_blend(), 1.0);

        // 12s build-down: after 6s roughly half remains
        for _ in 0..120 {
            tracker.update(&SubjectState::resting(), &config);
        }
        assert!((tracker.sprint_blend() - 0.5).abs() < 1e-6);
        assert_eq!(tracker.sprint_trend(), Trend::Falling);

        for _ in 0..200 {
            tracker.update(&SubjectState::resting(), &config);
        }
        assert_eq!(tracker.sprint_blend(), 0.0);
    }

    #[test]
    fn test_sprint_ignored_when_disabled() {
        let mut config = BreathConfig::default();
        config.sprint.enabled = false;
        let mut tracker = BlendTracker::new();

        for _ in 0..50 {
            tracker.update(&sprinting(), &config);
        }
        assert_eq!(tracker.sprint_blend(), 0.0);
    }

    #[test]
    fn test_submersion_ramps_up_regardless_of_sprint() {
        let mut config = BreathConfig::default();
        config.sprint.enabled = false;
        let mut tracker = BlendTracker::new();
        let diving = SubjectState::resting().submerged(true);

        tracker.update(&diving, &config);
        assert!(tracker.sprint_blend() > 0.0);
        assert_eq!(tracker.sprint_trend(), Trend::Rising);

        config.underwater.enabled = false;
        let before = tracker.sprint_blend();
        tracker.update(&diving, &config);
        assert!(tracker.sprint_blend() < before);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut config = BreathConfig::default();
        config.sprint.build_up_seconds = 0.0;
        config.sprint.build_down_seconds = -1.0;
        let mut tracker = BlendTracker::new();

        tracker.update(&sprinting(), &config);
        assert_eq!(tracker.sprint_blend(), 1.0);
        tracker.update(&SubjectState::resting(), &config);
        assert_eq!(tracker.sprint_blend(), 0.0);
    }

    #[test]
    fn test_health_smooths_toward_deficit() {
        let config = BreathConfig::default();
        let mut tracker = BlendTracker::new();
        let wounded = SubjectState::resting().with_health(5.0, 20.0);

        tracker.update(&wounded, &config);
        assert!((tracker.health_blend() - 0.15).abs() < 1e-9);
        assert_eq!(tracker.prev_health_blend(), 0.0);
        assert_eq!(tracker.health_trend(), Trend::Rising);

        tracker.update(&wounded, &config);
        assert!((tracker.prev_health_blend() - 0.15).abs() < 1e-9);

        for _ in 0..100 {
            tracker.update(&wounded, &config);
        }
        assert!((tracker.health_blend() - 0.75).abs() < 1e-6);
        assert_eq!(tracker.health_trend(), Trend::Stable);
    }

    #[test]
    fn test_health_forced_to_zero_when_disabled() {
        let mut config = BreathConfig::default();
        let mut tracker = BlendTracker::new();
        let wounded = SubjectState::resting().with_health(2.0, 20.0);
        for _ in 0..10 {
            tracker.update(&wounded, &config);
        }
        assert!(tracker.health_blend() > 0.5);

        config.health.enabled = false;
        tracker.update(&wounded, &config);
        assert_eq!(tracker.health_blend(), 0.0);
    }

    #[test]
    fn test_health_with_zero_max_stays_zero() {
        let config = BreathConfig::default();
        let mut tracker = BlendTracker::new();

        tracker.update(&SubjectState::resting().with_health(0.0, 0.0), &config);
        assert_eq!(tracker.health_blend(), 0.0);
    }
}

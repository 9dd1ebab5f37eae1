//! Status snapshots for debug overlays and chat commands.
//!
//! A [`StatusSnapshot`] is captured without touching engine state and can be
//! rendered as lines grouped by [`DebugCategory`], so a HUD can show or hide
//! each group independently.

use serde::Serialize;

use breath_events::{
    DimensionKind, Eligibility, EnvironmentSample, SeasonMod, SeasonPhase, SeasonSnapshot,
    SubjectState,
};

use crate::blend::{BlendTracker, Trend, TREND_EPSILON};
use crate::burst::{BurstState, BurstStateMachine};
use crate::config::BreathConfig;
use crate::eligibility::{condensation_status, evaluate, CondensationStatus};
use crate::scheduler::{blended_intervals, plan, underwater_plan, IntervalPlan};
use crate::temperature::{temperature_breakdown, TemperatureBreakdown};

/// ARGB line colors.
pub const COLOR_NEUTRAL: u32 = 0xFFFF_FFFF;
pub const COLOR_POSITIVE: u32 = 0xFF00_FF00;
pub const COLOR_NEGATIVE: u32 = 0xFFFF_0000;
pub const COLOR_BUBBLES: u32 = 0xFF4E_A3FF;

/// Groups of status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugCategory {
    Breathing,
    Interval,
    IntervalRange,
    Temperature,
    Status,
    Condensation,
    TimeRange,
    Dimension,
    Season,
    SeasonMod,
}

impl DebugCategory {
    /// All categories in display order.
    pub fn all() -> &'static [DebugCategory] {
        &[
            DebugCategory::Breathing,
            DebugCategory::Interval,
            DebugCategory::IntervalRange,
            DebugCategory::Temperature,
            DebugCategory::Status,
            DebugCategory::Condensation,
            DebugCategory::TimeRange,
            DebugCategory::Dimension,
            DebugCategory::Season,
            DebugCategory::SeasonMod,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            DebugCategory::Breathing => "breathing",
            DebugCategory::Interval => "interval",
            DebugCategory::IntervalRange => "interval_range",
            DebugCategory::Temperature => "temperature",
            DebugCategory::Status => "status",
            DebugCategory::Condensation => "condensation",
            DebugCategory::TimeRange => "time_range",
            DebugCategory::Dimension => "dimension",
            DebugCategory::Season => "season",
            DebugCategory::SeasonMod => "season_mod",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DebugCategory::Breathing => "Breathing",
            DebugCategory::Interval => "Breathing Interval",
            DebugCategory::IntervalRange => "Interval Range",
            DebugCategory::Temperature => "Temperature",
            DebugCategory::Status => "Status",
            DebugCategory::Condensation => "Condensation",
            DebugCategory::TimeRange => "Daytime",
            DebugCategory::Dimension => "Dimension",
            DebugCategory::Season => "Season Phase",
            DebugCategory::SeasonMod => "Season Mod",
        }
    }

    /// Alternative names accepted by [`DebugCategory::from_alias`].
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            DebugCategory::Breathing => &["breath"],
            DebugCategory::Interval => &[],
            DebugCategory::IntervalRange => &["range", "minmax"],
            DebugCategory::Temperature => &["temp"],
            DebugCategory::Status => &[],
            DebugCategory::Condensation => &["morning"],
            DebugCategory::TimeRange => &["time", "daytime"],
            DebugCategory::Dimension => &["dim"],
            DebugCategory::Season => &["phase"],
            DebugCategory::SeasonMod => &["seasonmod", "mod"],
        }
    }

    /// Looks a category up by key or alias, ignoring case and surrounding whitespace.
    pub fn from_alias(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == normalized || c.aliases().contains(&normalized.as_str()))
    }
}

/// One rendered status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub category: DebugCategory,
    pub text: String,
    /// ARGB color hint
    pub color: u32,
}

impl StatusLine {
    fn new(category: DebugCategory, text: impl Into<String>, color: u32) -> Self {
        Self {
            category,
            text: text.into(),
            color,
        }
    }
}

/// What the subject's breath is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingStatus {
    /// Submerged with underwater breathing enabled
    Bubbles,
    Visible,
    Hidden,
}

impl BreathingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BreathingStatus::Bubbles => "bubbles",
            BreathingStatus::Visible => "true",
            BreathingStatus::Hidden => "false",
        }
    }
}

/// Read-only view of the engine for one subject and environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub tick: u64,
    pub breathing: BreathingStatus,
    pub eligibility: Eligibility,
    /// Interval that would be scheduled next
    pub interval: IntervalPlan,
    pub temperature: TemperatureBreakdown,
    /// Human-readable pacing, e.g. "low health"
    pub regime_label: &'static str,
    pub sprint_blend: f64,
    pub sprint_trend: Trend,
    pub health_blend: f64,
    pub health_trend: Trend,
    pub condensation: CondensationStatus,
    pub day_time: u64,
    pub condensation_start: u64,
    pub condensation_end: u64,
    pub dimension: DimensionKind,
    pub season_phase: SeasonPhase,
    pub season_mod: SeasonMod,
    pub burst: BurstState,
    pub next_emission_tick: u64,
}

impl StatusSnapshot {
    /// Captures the status without mutating anything.
    pub fn capture(
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
        season: &SeasonSnapshot,
        blends: &BlendTracker,
        burst: &BurstStateMachine,
        next_emission_tick: u64,
    ) -> Self {
        let bubbles = subject.submerged && config.underwater.enabled;
        let eligibility = evaluate(env, subject, config, season);
        let breathing = if eligibility.allowed && subject.submerged {
            BreathingStatus::Bubbles
        } else if eligibility.allowed {
            BreathingStatus::Visible
        } else {
            BreathingStatus::Hidden
        };
        let interval = if bubbles {
            underwater_plan(config)
        } else {
            plan(config, blends.sprint_blend(), blends.health_blend())
        };

        Self {
            tick: env.world_time,
            breathing,
            eligibility,
            interval,
            temperature: temperature_breakdown(env, config, season),
            regime_label: regime_label(config, blends),
            sprint_blend: blends.sprint_blend(),
            sprint_trend: blends.sprint_trend(),
            health_blend: blends.health_blend(),
            health_trend: blends.health_trend(),
            condensation: condensation_status(env, config, season),
            day_time: env.time_of_day(),
            condensation_start: config.condensation.start_tick,
            condensation_end: config.condensation.end_tick,
            dimension: env.dimension,
            season_phase: season.phase,
            season_mod: season.mod_kind,
            burst: burst.state(env.world_time),
            next_emission_tick,
        }
    }

    /// Renders every category.
    pub fn lines(&self) -> Vec<StatusLine> {
        DebugCategory::all()
            .iter()
            .flat_map(|c| self.lines_for(*c))
            .collect()
    }

    /// Renders a single category.
    pub fn lines_for(&self, category: DebugCategory) -> Vec<StatusLine> {
        match category {
            DebugCategory::Breathing => {
                let color = match self.breathing {
                    BreathingStatus::Bubbles => COLOR_BUBBLES,
                    BreathingStatus::Visible => COLOR_POSITIVE,
                    BreathingStatus::Hidden => COLOR_NEGATIVE,
                };
                let text = match self.eligibility.reason {
                    Some(reason) if self.breathing == BreathingStatus::Hidden => {
                        format!("breathing: false ({})", reason)
                    }
                    _ => format!("breathing: {}", self.breathing.as_str()),
                };
                vec![StatusLine::new(category, text, color)]
            }
            DebugCategory::Interval => vec![StatusLine::new(
                category,
                format!("interval: {:.1}s", self.interval.base),
                COLOR_NEUTRAL,
            )],
            DebugCategory::IntervalRange => vec![StatusLine::new(
                category,
                format!("min/max: {:.1}s / {:.1}s", self.interval.min, self.interval.max),
                COLOR_NEUTRAL,
            )],
            DebugCategory::Temperature => vec![StatusLine::new(
                category,
                format!(
                    "temp: {:.3} (base: {:.3}), alt: {:+}, season: {:+.3}",
                    self.temperature.effective,
                    self.temperature.base,
                    self.temperature.blocks_above_sea_level,
                    self.temperature.season_offset
                ),
                COLOR_NEUTRAL,
            )],
            DebugCategory::Status => {
                let burst = match self.burst {
                    BurstState::Idle => format!("burst: idle | next: {}", self.next_emission_tick),
                    BurstState::Bursting { until } => {
                        format!("burst: bursting until {} | next: {}", until, self.next_emission_tick)
                    }
                };
                vec![
                    StatusLine::new(
                        category,
                        format!(
                            "status: {} | sprint: {:.2} | health: {:.2}",
                            self.regime_label, self.sprint_blend, self.health_blend
                        ),
                        COLOR_NEUTRAL,
                    ),
                    StatusLine::new(category, burst, COLOR_NEUTRAL),
                ]
            }
            DebugCategory::Condensation => {
                let color = if self.condensation == CondensationStatus::Active {
                    COLOR_POSITIVE
                } else {
                    COLOR_NEGATIVE
                };
                vec![StatusLine::new(
                    category,
                    format!("condensation: {}", self.condensation.as_str()),
                    color,
                )]
            }
            DebugCategory::TimeRange => vec![StatusLine::new(
                category,
                format!(
                    "time: {} | condensation range: {}-{}",
                    self.day_time, self.condensation_start, self.condensation_end
                ),
                COLOR_NEUTRAL,
            )],
            DebugCategory::Dimension => vec![StatusLine::new(
                category,
                format!("dim: {}", self.dimension),
                COLOR_NEUTRAL,
            )],
            DebugCategory::Season => {
                let phase = if self.season_phase == SeasonPhase::Unknown {
                    "none"
                } else {
                    self.season_phase.display_name()
                };
                vec![StatusLine::new(category, format!("season: {}", phase), COLOR_NEUTRAL)]
            }
            DebugCategory::SeasonMod => vec![StatusLine::new(
                category,
                format!("season mod: {}", self.season_mod.display_name()),
                COLOR_NEUTRAL,
            )],
        }
    }

    /// All lines joined by newlines.
    pub fn render(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Describes which preset is pacing the breath and how far along it is.
///
/// Health wins ties once it has any weight; a subject with both blends at
/// zero reads as "normal".
pub fn regime_label(config: &BreathConfig, blends: &BlendTracker) -> &'static str {
    if !config.sprint.enabled && !config.health.enabled {
        return "normal";
    }
    let (after_sprint, _, after_health, _) =
        blended_intervals(config, blends.sprint_blend(), blends.health_blend());

    let health = blends.health_blend();
    if config.health.enabled && health > TREND_EPSILON && after_health <= after_sprint {
        return if health >= 0.7 {
            "critical health"
        } else if health >= 0.3 {
            "low health"
        } else {
            "health priority"
        };
    }
    if config.sprint.enabled && after_sprint < after_health {
        let sprint = blends.sprint_blend();
        if sprint >= 0.95 {
            return "sprinting";
        }
        if sprint <= 0.05 {
            return "normal";
        }
        return match blends.sprint_trend() {
            Trend::Rising => "building up",
            Trend::Falling => "building down",
            Trend::Stable => "transitional",
        };
    }
    "normal"
}

//! Breath engine: eligibility and scheduling for visible breath.
//!
//! Once per tick the host hands the engine an environment sample, the
//! subject's state and the configuration. The engine decides whether a puff
//! of breath (or a stream of bubbles) should be drawn, and when it will look
//! again. It never renders anything and never talks to the host world
//! directly.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!  env, subject ─▶│    Engine    │──▶ StepOutcome (emit? kind, emitter)
//!  config       ─▶│              │──▶ BreathEvent listeners
//!                 └──────┬───────┘
//!          ┌─────────────┼──────────────┬──────────────┐
//!          ▼             ▼              ▼              ▼
//!     BlendTracker  eligibility   scheduler/burst  SeasonSource
//! ```
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with per-section defaults
//! - [`temperature`]: Effective temperature from biome, altitude and season
//! - [`eligibility`]: Ordered allow/deny checks and the condensation window
//! - [`blend`]: Sprint and health blends
//! - [`scheduler`]: Interval plans and tick conversion
//! - [`burst`]: Burst window and pulse timing
//! - [`season`]: Season sources and provider adapters
//! - [`output`]: Step outcomes and emitter descriptors
//! - [`status`]: Status snapshots for debug displays

pub mod blend;
pub mod burst;
pub mod config;
pub mod eligibility;
pub mod output;
pub mod scheduler;
pub mod season;
pub mod status;
pub mod temperature;

// Re-export config types
pub use config::{
    default_config_toml, AltitudeConfig, BreathConfig, CondensationConfig, ConfigError,
    GeneralConfig, HealthConfig, IntervalConfig, SeasonsConfig, SprintConfig, UnderwaterConfig,
    VisualsConfig, MIN_INTERVAL_SECONDS,
};

// Re-export engine building blocks
pub use blend::{BlendTracker, Trend};
pub use burst::{BurstState, BurstStateMachine, BURST_EMIT_PERIOD_TICKS};
pub use eligibility::{evaluate, is_within_day_window, CondensationStatus};
pub use scheduler::{seconds_to_ticks, IntervalPlan, Regime};
pub use temperature::{effective_temperature, TemperatureBreakdown};

// Re-export season sources
pub use season::{
    FabricQuery, FabricSeasons, FabricState, PlaceholderSeasons, SeasonQueryError, SeasonSource,
    SereneQuery, SereneSeasons, SereneState, VanillaSeasons,
};

// Re-export outputs
pub use output::{EmitterDescriptor, StepOutcome};
pub use status::{BreathingStatus, DebugCategory, StatusLine, StatusSnapshot};

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use breath_events::{
    BreathEvent, BreathState, DenyReason, EmitKind, Eligibility, EnvironmentSample, SeasonMod,
    SeasonSnapshot, SubjectState,
};

/// Callback invoked once per breath trigger.
pub type BreathListener = Box<dyn FnMut(&BreathEvent)>;

/// Per-subject breath engine.
///
/// Owns all scheduling state for one subject. Track several subjects with
/// one engine each.
pub struct Engine {
    /// Sprint and health blends
    blends: BlendTracker,
    /// Current burst window
    burst: BurstStateMachine,
    /// Eligibility is not evaluated before this tick
    next_emission_tick: u64,
    /// Source of interval jitter
    rng: SmallRng,
    season_source: Box<dyn SeasonSource>,
    /// Snapshot from the last eligibility evaluation
    season: SeasonSnapshot,
    last_eligibility: Option<Eligibility>,
    listeners: Vec<BreathListener>,
}

impl Engine {
    /// Creates an engine seeded from entropy, without a season provider.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Creates an engine with reproducible interval jitter.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            blends: BlendTracker::new(),
            burst: BurstStateMachine::new(),
            next_emission_tick: 0,
            rng,
            season_source: Box::new(VanillaSeasons),
            season: SeasonSnapshot::empty(SeasonMod::None),
            last_eligibility: None,
            listeners: Vec::new(),
        }
    }

    /// Installs the season source chosen by the host.
    pub fn with_season_source(mut self, source: impl SeasonSource + 'static) -> Self {
        self.set_season_source(Box::new(source));
        self
    }

    /// Replaces the season source. The cached snapshot is cleared.
    pub fn set_season_source(&mut self, source: Box<dyn SeasonSource>) {
        tracing::debug!("Season source set to {}", source.kind());
        self.season_source = source;
        self.season = SeasonSnapshot::empty(SeasonMod::None);
    }

    /// Registers a listener for breath triggers.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&BreathEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Advances the engine by one tick.
    ///
    /// 1. Updates the blends
    /// 2. Inside a burst: emits on pulse ticks and returns. A submerged
    ///    subject without underwater breathing stays quiet.
    /// 3. Before the scheduled tick: does nothing
    /// 4. Otherwise refreshes the season and evaluates eligibility
    /// 5. On deny: schedules with the normal plan
    /// 6. On allow: opens a burst, schedules (underwater plan while
    ///    submerged) and notifies listeners
    ///
    /// Steps that do not evaluate eligibility report the reason from the
    /// last evaluation.
    pub fn step(
        &mut self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
    ) -> StepOutcome {
        let now = env.world_time;
        self.blends.update(subject, config);

        if self.burst.is_active(now) {
            if !self.burst.pulse(now) {
                return StepOutcome::idle();
            }
            let kind = match (subject.submerged, config.underwater.enabled) {
                (true, true) => EmitKind::Underwater,
                (true, false) => return StepOutcome::idle(),
                (false, _) => EmitKind::Air,
            };
            return StepOutcome::emit(kind, &config.visuals);
        }

        if now < self.next_emission_tick {
            return StepOutcome::denied(self.last_reason());
        }

        self.season = season::sample_gated(self.season_source.as_mut(), &config.seasons, now);
        let eligibility = evaluate(env, subject, config, &self.season);
        self.last_eligibility = Some(eligibility);

        if !eligibility.allowed {
            let plan = scheduler::plan(config, self.blends.sprint_blend(), self.blends.health_blend());
            self.schedule(now, &plan);
            return StepOutcome::denied(eligibility.reason);
        }

        let duration = u64::from(config.general.burst_duration_ticks);
        self.burst.start(now, duration);

        let (kind, plan) = if subject.submerged {
            (EmitKind::Underwater, scheduler::underwater_plan(config))
        } else {
            let plan = scheduler::plan(config, self.blends.sprint_blend(), self.blends.health_blend());
            (EmitKind::Air, plan)
        };
        self.schedule(now, &plan);

        tracing::debug!(
            "Breath triggered at tick {} ({:?}), burst until {}, next check at {}",
            now,
            kind,
            self.burst.end_tick(),
            self.next_emission_tick
        );

        self.notify(env, subject, config, kind);
        StepOutcome::emit(kind, &config.visuals)
    }

    fn schedule(&mut self, now: u64, plan: &IntervalPlan) {
        let wait = plan.draw_ticks(&mut self.rng);
        self.next_emission_tick = now.saturating_add(wait);
        tracing::trace!(
            "Next check in {} ticks ({:?}, {:.2}s..{:.2}s)",
            wait,
            plan.regime,
            plan.min,
            plan.max
        );
    }

    fn notify(
        &mut self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
        kind: EmitKind,
    ) {
        if self.listeners.is_empty() {
            return;
        }
        let event = BreathEvent {
            tick: env.world_time,
            kind,
            state: self.current_state(env, subject, config),
            environment: env.clone(),
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn last_reason(&self) -> Option<DenyReason> {
        self.last_eligibility.and_then(|e| e.reason)
    }

    /// Breath state for the given inputs, using the cached season snapshot.
    pub fn current_state(
        &self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
    ) -> BreathState {
        let eligibility = self.eligibility(env, subject, config);
        let temperature = effective_temperature(env, config, &self.season);
        let condensation_active = eligibility.allowed
            && temperature > config.general.always_breath_temperature
            && !config.general.always_show_breath
            && !subject.submerged;

        BreathState {
            visible: eligibility.allowed,
            invisible_reason: eligibility.reason,
            effective_temperature: temperature,
            condensation_active,
            underwater: subject.submerged,
            season_mod: self.season.mod_kind,
            season_phase: self.season.phase,
        }
    }

    /// Eligibility for the given inputs, using the cached season snapshot.
    pub fn eligibility(
        &self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
    ) -> Eligibility {
        evaluate(env, subject, config, &self.season)
    }

    /// Short explanation such as "true" or "false (temperature)".
    pub fn explain(
        &self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
    ) -> String {
        self.eligibility(env, subject, config).explain()
    }

    /// Base interval, in seconds, for the current blends.
    pub fn current_base_interval(&self, config: &BreathConfig) -> f64 {
        self.current_plan(config).base
    }

    /// `(min, max)` interval bounds, in seconds, for the current blends.
    pub fn current_interval_bounds(&self, config: &BreathConfig) -> (f64, f64) {
        let plan = self.current_plan(config);
        (plan.min, plan.max)
    }

    /// Interval plan for the air path at the current blends.
    pub fn current_plan(&self, config: &BreathConfig) -> IntervalPlan {
        scheduler::plan(config, self.blends.sprint_blend(), self.blends.health_blend())
    }

    pub fn temperature_breakdown(
        &self,
        env: &EnvironmentSample,
        config: &BreathConfig,
    ) -> TemperatureBreakdown {
        temperature::temperature_breakdown(env, config, &self.season)
    }

    pub fn burst_state(&self, now: u64) -> BurstState {
        self.burst.state(now)
    }

    /// Full status for debug displays. Has no side effects.
    pub fn status(
        &self,
        env: &EnvironmentSample,
        subject: &SubjectState,
        config: &BreathConfig,
    ) -> StatusSnapshot {
        StatusSnapshot::capture(
            env,
            subject,
            config,
            &self.season,
            &self.blends,
            &self.burst,
            self.next_emission_tick,
        )
    }

    pub fn blends(&self) -> &BlendTracker {
        &self.blends
    }

    /// Season snapshot from the last eligibility evaluation.
    pub fn season(&self) -> &SeasonSnapshot {
        &self.season
    }

    pub fn next_emission_tick(&self) -> u64 {
        self.next_emission_tick
    }

    pub fn last_eligibility(&self) -> Option<Eligibility> {
        self.last_eligibility
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("blends", &self.blends)
            .field("burst", &self.burst)
            .field("next_emission_tick", &self.next_emission_tick)
            .field("season_source", &self.season_source.kind())
            .field("season", &self.season)
            .field("last_eligibility", &self.last_eligibility)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

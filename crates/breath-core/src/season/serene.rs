//! Twelve sub-season provider adapter.

use breath_events::{SeasonMod, SeasonPhase, SeasonSnapshot};

use super::{placeholder_snapshot, SeasonQueryError, SeasonSource};

/// Raw state reported by the host for a twelve sub-season provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SereneState {
    /// Sub-season name, e.g. "EARLY_WINTER"
    pub sub_season: String,
    /// Day within the season cycle
    pub day: u32,
    /// Ticks in a full season cycle
    pub cycle_ticks: u32,
}

/// Host-side access to the provider.
pub trait SereneQuery {
    /// Current provider state. `Ok(None)` when the provider has no data yet.
    fn season_state(&self, world_time: u64) -> Result<Option<SereneState>, SeasonQueryError>;
}

impl<F> SereneQuery for F
where
    F: Fn(u64) -> Result<Option<SereneState>, SeasonQueryError>,
{
    fn season_state(&self, world_time: u64) -> Result<Option<SereneState>, SeasonQueryError> {
        self(world_time)
    }
}

/// Season source backed by a twelve sub-season provider.
///
/// Falls back to the placeholder cycle whenever the provider has nothing
/// to report. Problems are logged once per adapter.
#[derive(Debug)]
pub struct SereneSeasons<Q> {
    query: Q,
    logged_unavailable: bool,
    logged_failure: bool,
}

impl<Q: SereneQuery> SereneSeasons<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            logged_unavailable: false,
            logged_failure: false,
        }
    }

    fn report(&mut self, error: &SeasonQueryError) {
        match error {
            SeasonQueryError::Unavailable(_) if !self.logged_unavailable => {
                tracing::warn!("Serene Seasons API unavailable; using placeholder seasons ({})", error);
                self.logged_unavailable = true;
            }
            SeasonQueryError::Failed(_) if !self.logged_failure => {
                tracing::warn!("Failed to query Serene Seasons state: {}", error);
                self.logged_failure = true;
            }
            _ => {}
        }
    }
}

impl<F> SereneSeasons<F>
where
    F: Fn(u64) -> Result<Option<SereneState>, SeasonQueryError>,
{
    /// Builds an adapter from a plain query function.
    pub fn from_fn(query: F) -> Self {
        Self::new(query)
    }
}

impl<Q: SereneQuery> SeasonSource for SereneSeasons<Q> {
    fn kind(&self) -> SeasonMod {
        SeasonMod::SereneSeasons
    }

    fn sample(&mut self, world_time: u64) -> SeasonSnapshot {
        match self.query.season_state(world_time) {
            Ok(Some(state)) => snapshot_from_state(&state),
            Ok(None) => placeholder_snapshot(SeasonMod::SereneSeasons, world_time),
            Err(error) => {
                self.report(&error);
                placeholder_snapshot(SeasonMod::SereneSeasons, world_time)
            }
        }
    }
}

/// Temperature bias for a sub-season: colder in winter, warmer in summer.
pub fn phase_bias(phase: SeasonPhase) -> f64 {
    if phase.is_winter() {
        -0.15
    } else if phase.is_summer() {
        0.12
    } else {
        0.0
    }
}

fn snapshot_from_state(state: &SereneState) -> SeasonSnapshot {
    let phase = SeasonPhase::from_name(&state.sub_season);
    SeasonSnapshot::new(SeasonMod::SereneSeasons, phase, phase_bias(phase))
        .with_cycle(state.day, state.cycle_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breath_events::TICKS_PER_DAY;
    use std::cell::Cell;

    fn state(name: &str) -> SereneState {
        SereneState {
            sub_season: name.to_string(),
            day: 3,
            cycle_ticks: 24000 * 96,
        }
    }

    #[test]
    fn test_maps_live_state() {
        let mut source = SereneSeasons::from_fn(|_| Ok(Some(state("MID_WINTER"))));
        let snapshot = source.sample(0);

        assert_eq!(snapshot.mod_kind, SeasonMod::SereneSeasons);
        assert_eq!(snapshot.phase, SeasonPhase::MidWinter);
        assert_eq!(snapshot.temperature_bias, -0.15);
        assert_eq!(snapshot.day_in_cycle, Some(3));
    }

    #[test]
    fn test_summer_and_spring_bias() {
        let mut summer = SereneSeasons::from_fn(|_| Ok(Some(state("LATE_SUMMER"))));
        let mut spring = SereneSeasons::from_fn(|_| Ok(Some(state("EARLY_SPRING"))));

        assert_eq!(summer.sample(0).temperature_bias, 0.12);
        assert_eq!(spring.sample(0).temperature_bias, 0.0);
    }

    #[test]
    fn test_unknown_sub_season() {
        let mut source = SereneSeasons::from_fn(|_| Ok(Some(state("MONSOON"))));
        let snapshot = source.sample(0);

        assert_eq!(snapshot.phase, SeasonPhase::Unknown);
        assert_eq!(snapshot.temperature_bias, 0.0);
    }

    #[test]
    fn test_no_data_falls_back_to_placeholder() {
        let mut source = SereneSeasons::from_fn(|_| Ok(None));
        let snapshot = source.sample(TICKS_PER_DAY * 10);

        assert_eq!(snapshot.mod_kind, SeasonMod::SereneSeasons);
        assert_eq!(snapshot.phase, SeasonPhase::MidWinter);
        assert_eq!(snapshot.temperature_bias, 0.0);
    }

    #[test]
    fn test_errors_fall_back_and_log_once() {
        let calls = Cell::new(0);
        let mut source = SereneSeasons::from_fn(|_| {
            calls.set(calls.get() + 1);
            Err(SeasonQueryError::Failed("boom".to_string()))
        });

        for day in 0..3 {
            let snapshot = source.sample(TICKS_PER_DAY * day);
            assert_eq!(snapshot.phase, SeasonPhase::from_ordinal(day as usize));
        }
        assert_eq!(calls.get(), 3);
        assert!(source.logged_failure);
        assert!(!source.logged_unavailable);
    }
}

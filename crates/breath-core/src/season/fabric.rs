//! Four-season provider adapter.
//!
//! The provider only reports coarse seasons, so each maps to the middle
//! sub-season. An optional temperature index refines the bias.

use breath_events::{SeasonMod, SeasonPhase, SeasonSnapshot};

use super::{placeholder_snapshot, SeasonQueryError, SeasonSource};

/// Raw state reported by the host for a four-season provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FabricState {
    /// Season name: "SPRING", "SUMMER", "FALL" or "WINTER"
    pub season: String,
    /// Provider temperature index, 0 (coldest) through 3 (warmest)
    pub temperature_index: Option<i32>,
}

/// Host-side access to the provider.
pub trait FabricQuery {
    /// Current provider state. `Ok(None)` when the provider has no data yet.
    fn current_season(&self, world_time: u64) -> Result<Option<FabricState>, SeasonQueryError>;
}

impl<F> FabricQuery for F
where
    F: Fn(u64) -> Result<Option<FabricState>, SeasonQueryError>,
{
    fn current_season(&self, world_time: u64) -> Result<Option<FabricState>, SeasonQueryError> {
        self(world_time)
    }
}

/// Season source backed by a four-season provider.
#[derive(Debug)]
pub struct FabricSeasons<Q> {
    query: Q,
    logged_unavailable: bool,
    logged_failure: bool,
}

impl<Q: FabricQuery> FabricSeasons<Q> {
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
                tracing::warn!("Fabric Seasons API unavailable; using placeholder seasons ({})", error);
                self.logged_unavailable = true;
            }
            SeasonQueryError::Failed(_) if !self.logged_failure => {
                tracing::warn!("Failed to query Fabric Seasons state: {}", error);
                self.logged_failure = true;
            }
            _ => {}
        }
    }
}

impl<F> FabricSeasons<F>
where
    F: Fn(u64) -> Result<Option<FabricState>, SeasonQueryError>,
{
    /// Builds an adapter from a plain query function.
    pub fn from_fn(query: F) -> Self {
        Self::new(query)
    }
}

impl<Q: FabricQuery> SeasonSource for FabricSeasons<Q> {
    fn kind(&self) -> SeasonMod {
        SeasonMod::FabricSeasons
    }

    fn sample(&mut self, world_time: u64) -> SeasonSnapshot {
        match self.query.current_season(world_time) {
            Ok(Some(state)) => snapshot_from_state(&state),
            Ok(None) => placeholder_snapshot(SeasonMod::FabricSeasons, world_time),
            Err(error) => {
                self.report(&error);
                placeholder_snapshot(SeasonMod::FabricSeasons, world_time)
            }
        }
    }
}

/// Maps a coarse season name onto its middle sub-season.
pub fn phase_for_season(name: &str) -> SeasonPhase {
    match name.trim().to_ascii_uppercase().as_str() {
        "SPRING" => SeasonPhase::MidSpring,
        "SUMMER" => SeasonPhase::MidSummer,
        "FALL" | "AUTUMN" => SeasonPhase::MidAutumn,
        "WINTER" => SeasonPhase::MidWinter,
        _ => SeasonPhase::Unknown,
    }
}

/// Bias for a provider temperature index. Out of range indices give none.
pub fn index_bias(index: i32) -> f64 {
    match index {
        0 => -0.12,
        1 => -0.04,
        2 => 0.05,
        3 => 0.12,
        _ => 0.0,
    }
}

fn snapshot_from_state(state: &FabricState) -> SeasonSnapshot {
    let phase = phase_for_season(&state.season);
    let bias = state.temperature_index.map(index_bias).unwrap_or(0.0);
    SeasonSnapshot::new(SeasonMod::FabricSeasons, phase, bias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breath_events::TICKS_PER_DAY;

    fn state(season: &str, index: Option<i32>) -> FabricState {
        FabricState {
            season: season.to_string(),
            temperature_index: index,
        }
    }

    #[test]
    fn test_phase_mapping() {
        assert_eq!(phase_for_season("SPRING"), SeasonPhase::MidSpring);
        assert_eq!(phase_for_season("summer"), SeasonPhase::MidSummer);
        assert_eq!(phase_for_season("FALL"), SeasonPhase::MidAutumn);
        assert_eq!(phase_for_season("Winter"), SeasonPhase::MidWinter);
        assert_eq!(phase_for_season("WET"), SeasonPhase::Unknown);
    }

    #[test]
    fn test_index_bias() {
        assert_eq!(index_bias(0), -0.12);
        assert_eq!(index_bias(1), -0.04);
        assert_eq!(index_bias(2), 0.05);
        assert_eq!(index_bias(3), 0.12);
        assert_eq!(index_bias(7), 0.0);
        assert_eq!(index_bias(-1), 0.0);
    }

    #[test]
    fn test_maps_live_state() {
        let mut source = FabricSeasons::from_fn(|_| Ok(Some(state("WINTER", Some(0)))));
        let snapshot = source.sample(0);

        assert_eq!(snapshot.mod_kind, SeasonMod::FabricSeasons);
        assert_eq!(snapshot.phase, SeasonPhase::MidWinter);
        assert_eq!(snapshot.temperature_bias, -0.12);
        assert_eq!(snapshot.day_in_cycle, None);
    }

    #[test]
    fn test_missing_index_has_no_bias() {
        let mut source = FabricSeasons::from_fn(|_| Ok(Some(state("SUMMER", None))));
        assert_eq!(source.sample(0).temperature_bias, 0.0);
    }

    #[test]
    fn test_unavailable_falls_back_and_logs_once() {
        let mut source =
            FabricSeasons::from_fn(|_| Err(SeasonQueryError::Unavailable("not installed".to_string())));

        let first = source.sample(TICKS_PER_DAY * 2);
        let second = source.sample(TICKS_PER_DAY * 3);

        assert_eq!(first.mod_kind, SeasonMod::FabricSeasons);
        assert_eq!(first.phase, SeasonPhase::LateSpring);
        assert_eq!(second.phase, SeasonPhase::EarlySummer);
        assert!(source.logged_unavailable);
        assert!(!source.logged_failure);
    }
}

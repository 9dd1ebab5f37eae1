//! Configuration loading for the breath engine.
//!
//! All settings are loaded from a TOML configuration file. Every section is
//! optional and falls back to its defaults, so a partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use breath_events::{SeasonPhase, SEASON_PHASE_COUNT};

/// Smallest interval, in seconds, the scheduler will ever use.
pub const MIN_INTERVAL_SECONDS: f64 = 0.1;

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BreathConfig {
    /// Master toggles, visibility and thresholds
    #[serde(default)]
    pub general: GeneralConfig,
    /// Resting interval preset
    #[serde(default)]
    pub interval: IntervalConfig,
    /// Sprint interval preset and ramp durations
    #[serde(default)]
    pub sprint: SprintConfig,
    /// Low-health interval preset
    #[serde(default)]
    pub health: HealthConfig,
    /// Underwater bubble settings
    #[serde(default)]
    pub underwater: UnderwaterConfig,
    /// Altitude temperature adjustment
    #[serde(default)]
    pub altitude: AltitudeConfig,
    /// Morning condensation window
    #[serde(default)]
    pub condensation: CondensationConfig,
    /// Seasonal temperature offsets
    #[serde(default)]
    pub seasons: SeasonsConfig,
    /// Emitter appearance
    #[serde(default)]
    pub visuals: VisualsConfig,
}

impl BreathConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string and repairs season arrays.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: BreathConfig = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Repairs malformed values in place. Returns true if anything changed.
    pub fn normalize(&mut self) -> bool {
        self.seasons.normalize()
    }
}

/// General visibility settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Master toggle
    pub enabled: bool,
    /// Show breath while in creative mode
    pub visible_in_creative: bool,
    /// Show breath regardless of temperature (dimension toggles still apply)
    pub always_show_breath: bool,
    pub visible_in_nether: bool,
    pub visible_in_end: bool,
    /// At or below this effective temperature breath always shows
    pub always_breath_temperature: f64,
    /// How long a burst of puffs lasts after a trigger
    pub burst_duration_ticks: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            visible_in_creative: false,
            always_show_breath: false,
            visible_in_nether: false,
            visible_in_end: true,
            always_breath_temperature: 0.15,
            burst_duration_ticks: 10,
        }
    }
}

/// Resting interval preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub base_seconds: f64,
    pub deviation_seconds: f64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            base_seconds: 5.0,
            deviation_seconds: 1.0,
        }
    }
}

/// Sprint interval preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintConfig {
    /// Blend toward the sprint preset while sprinting
    pub enabled: bool,
    pub base_interval_seconds: f64,
    pub deviation_seconds: f64,
    /// Time to ramp fully into sprint breathing
    pub build_up_seconds: f64,
    /// Time to ramp fully back to resting breathing
    pub build_down_seconds: f64,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_interval_seconds: 3.0,
            deviation_seconds: 0.5,
            build_up_seconds: 8.0,
            build_down_seconds: 12.0,
        }
    }
}

/// Low-health interval preset, reached at zero health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub low_health_interval_seconds: f64,
    pub deviation_seconds: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            low_health_interval_seconds: 1.0,
            deviation_seconds: 0.2,
        }
    }
}

/// Underwater bubble settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwaterConfig {
    pub enabled: bool,
    pub base_interval_seconds: f64,
    pub deviation_seconds: f64,
}

impl Default for UnderwaterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_interval_seconds: 8.0,
            deviation_seconds: 1.0,
        }
    }
}

/// Altitude temperature adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltitudeConfig {
    pub enabled: bool,
    /// Temperature drop per block above sea level
    pub temperature_rate: f64,
}

impl Default for AltitudeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temperature_rate: 0.00125,
        }
    }
}

/// Condensation window: breath in mildly warm weather at certain times of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondensationConfig {
    pub enabled: bool,
    /// Window start, in ticks of the day
    pub start_tick: u64,
    /// Window end, inclusive; may be before `start_tick` to wrap midnight
    pub end_tick: u64,
    /// Warmest effective temperature that still condenses
    pub max_temperature: f64,
}

impl Default for CondensationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_tick: 22500,
            end_tick: 1500,
            max_temperature: 0.7,
        }
    }
}

/// Seasonal adjustments, one entry per season phase in yearly order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonsConfig {
    pub enabled: bool,
    /// Accept data from a twelve-phase provider
    pub serene_integration: bool,
    /// Accept data from a four-season provider
    pub fabric_integration: bool,
    /// Temperature offset per phase
    pub temperature_offsets: Vec<f64>,
    /// Whether the condensation window applies per phase
    pub condensation: Vec<bool>,
}

impl Default for SeasonsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            serene_integration: true,
            fabric_integration: true,
            temperature_offsets: default_temperature_offsets().to_vec(),
            condensation: default_condensation().to_vec(),
        }
    }
}

impl SeasonsConfig {
    /// Offset for `phase`. Missing entries read as the default; `Unknown` is zero.
    pub fn temperature_offset(&self, phase: SeasonPhase) -> f64 {
        match phase.index() {
            Some(i) => self
                .temperature_offsets
                .get(i)
                .copied()
                .unwrap_or(default_temperature_offsets()[i]),
            None => 0.0,
        }
    }

    /// Condensation flag for `phase`. Missing entries read as the default; `Unknown` allows.
    pub fn condensation_enabled(&self, phase: SeasonPhase) -> bool {
        match phase.index() {
            Some(i) => self
                .condensation
                .get(i)
                .copied()
                .unwrap_or(default_condensation()[i]),
            None => true,
        }
    }

    /// Pads or truncates both arrays to exactly one entry per phase.
    pub fn normalize(&mut self) -> bool {
        let offsets = repair(&mut self.temperature_offsets, &default_temperature_offsets());
        let condensation = repair(&mut self.condensation, &default_condensation());
        if offsets || condensation {
            tracing::debug!(
                "Repaired season arrays to {} entries (offsets: {}, condensation: {})",
                SEASON_PHASE_COUNT,
                offsets,
                condensation
            );
        }
        offsets || condensation
    }
}

fn repair<T: Copy>(values: &mut Vec<T>, defaults: &[T; SEASON_PHASE_COUNT]) -> bool {
    if values.len() == SEASON_PHASE_COUNT {
        return false;
    }
    values.truncate(SEASON_PHASE_COUNT);
    let present = values.len();
    values.extend_from_slice(&defaults[present..]);
    true
}

/// Default per-phase temperature offsets, early spring first.
pub fn default_temperature_offsets() -> [f64; SEASON_PHASE_COUNT] {
    [
        0.02, 0.04, 0.05, // spring
        0.08, 0.12, 0.10, // summer
        0.02, -0.02, -0.06, // autumn
        -0.10, -0.14, -0.12, // winter
    ]
}

/// Default per-phase condensation flags, early spring first.
pub fn default_condensation() -> [bool; SEASON_PHASE_COUNT] {
    [
        true, true, false, // spring
        false, false, false, // summer
        false, true, true, // autumn
        true, true, true, // winter
    ]
}

/// Emitter appearance, passed through to the visual collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualsConfig {
    /// Distance in front of the eyes
    pub forward_offset: f64,
    /// Distance below the eyes
    pub down_offset: f64,
    /// RGB color of air puffs
    pub color: u32,
    /// Particle scale of air puffs
    pub size: f64,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            forward_offset: 0.3,
            down_offset: 0.2,
            color: 0xE6F2FF,
            size: 0.6,
        }
    }
}

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Cold Breath Configuration

[general]
enabled = true
visible_in_creative = false
always_show_breath = false
visible_in_nether = false
visible_in_end = true
always_breath_temperature = 0.15
burst_duration_ticks = 10

[interval]
base_seconds = 5.0
deviation_seconds = 1.0

[sprint]
enabled = true
base_interval_seconds = 3.0
deviation_seconds = 0.5
build_up_seconds = 8.0
build_down_seconds = 12.0

[health]
enabled = true
low_health_interval_seconds = 1.0
deviation_seconds = 0.2

[underwater]
enabled = true
base_interval_seconds = 8.0
deviation_seconds = 1.0

[altitude]
enabled = true
temperature_rate = 0.00125

[condensation]
enabled = true
start_tick = 22500
end_tick = 1500
max_temperature = 0.7

[seasons]
enabled = true
serene_integration = true
fabric_integration = true
temperature_offsets = [0.02, 0.04, 0.05, 0.08, 0.12, 0.10, 0.02, -0.02, -0.06, -0.10, -0.14, -0.12]
condensation = [true, true, false, false, false, false, false, true, true, true, true, true]

[visuals]
forward_offset = 0.3
down_offset = 0.2
color = 15135487
size = 0.6
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BreathConfig::default();

        assert!(config.general.enabled);
        assert!(!config.general.visible_in_nether);
        assert!(config.general.visible_in_end);
        assert_eq!(config.general.always_breath_temperature, 0.15);
        assert_eq!(config.general.burst_duration_ticks, 10);
        assert_eq!(config.interval.base_seconds, 5.0);
        assert_eq!(config.sprint.build_up_seconds, 8.0);
        assert_eq!(config.seasons.temperature_offsets.len(), SEASON_PHASE_COUNT);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [general]
            always_show_breath = true
            visible_in_nether = true

            [sprint]
            build_up_seconds = 4.0
        "#;

        let config = BreathConfig::from_str(toml).unwrap();

        assert!(config.general.always_show_breath);
        assert!(config.general.visible_in_nether);
        assert_eq!(config.sprint.build_up_seconds, 4.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [interval]
            base_seconds = 7.5
        "#;

        let config = BreathConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.interval.base_seconds, 7.5);
        // Default values
        assert_eq!(config.interval.deviation_seconds, 1.0);
        assert_eq!(config.underwater.base_interval_seconds, 8.0);
        assert_eq!(config.condensation.start_tick, 22500);
    }

    #[test]
    fn test_short_season_arrays_are_padded() {
        let toml = r#"
            [seasons]
            temperature_offsets = [0.5, 0.6]
            condensation = [false]
        "#;

        let config = BreathConfig::from_str(toml).unwrap();
        let offsets = &config.seasons.temperature_offsets;

        assert_eq!(offsets.len(), SEASON_PHASE_COUNT);
        assert_eq!(offsets[0], 0.5);
        assert_eq!(offsets[1], 0.6);
        assert_eq!(offsets[2], default_temperature_offsets()[2]);
        assert_eq!(config.seasons.condensation.len(), SEASON_PHASE_COUNT);
        assert!(!config.seasons.condensation[0]);
        assert!(config.seasons.condensation[1]);
    }

    #[test]
    fn test_long_season_arrays_are_truncated() {
        let mut seasons = SeasonsConfig {
            temperature_offsets: vec![0.0; 20],
            ..SeasonsConfig::default()
        };

        assert!(seasons.normalize());
        assert_eq!(seasons.temperature_offsets.len(), SEASON_PHASE_COUNT);
        assert!(!seasons.normalize());
    }

    #[test]
    fn test_lookups_tolerate_unrepaired_arrays() {
        let seasons = SeasonsConfig {
            temperature_offsets: vec![],
            condensation: vec![],
            ..SeasonsConfig::default()
        };

        assert_eq!(seasons.temperature_offset(SeasonPhase::MidWinter), -0.14);
        assert!(!seasons.condensation_enabled(SeasonPhase::MidSummer));
        assert_eq!(seasons.temperature_offset(SeasonPhase::Unknown), 0.0);
        assert!(seasons.condensation_enabled(SeasonPhase::Unknown));
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = BreathConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, BreathConfig::default());
    }

    #[test]
    fn test_config_to_toml() {
        let toml = BreathConfig::default().to_toml().unwrap();

        assert!(toml.contains("[general]"));
        assert!(toml.contains("[seasons]"));
        assert_eq!(BreathConfig::from_str(&toml).unwrap(), BreathConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[underwater]\nenabled = false").unwrap();

        let config = BreathConfig::from_file(file.path()).unwrap();
        assert!(!config.underwater.enabled);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BreathConfig::from_file(Path::new("/nonexistent/breath.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = BreathConfig::from_str("[general\nenabled = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("TOML parse error"));
    }
}

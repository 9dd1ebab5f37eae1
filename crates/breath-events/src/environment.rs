//! Host environment samples.
//!
//! The host world is exposed to the engine only through these read-only
//! values, captured once per tick.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::TICKS_PER_DAY;

/// Broad classification of the dimension a subject is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    #[default]
    Overworld,
    Nether,
    End,
    Other,
}

impl DimensionKind {
    /// Classifies a namespaced dimension identifier such as `minecraft:the_nether`.
    ///
    /// The three vanilla identifiers map exactly. Anything else is matched on
    /// its path: "nether" anywhere means Nether, "end" anywhere means End.
    pub fn classify(id: &str) -> Self {
        match id {
            "minecraft:overworld" => return DimensionKind::Overworld,
            "minecraft:the_nether" => return DimensionKind::Nether,
            "minecraft:the_end" => return DimensionKind::End,
            _ => {}
        }
        let path = id.rsplit_once(':').map_or(id, |(_, path)| path);
        if path.contains("nether") {
            DimensionKind::Nether
        } else if path.contains("end") {
            DimensionKind::End
        } else {
            DimensionKind::Other
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKind::Overworld => write!(f, "overworld"),
            DimensionKind::Nether => write!(f, "nether"),
            DimensionKind::End => write!(f, "end"),
            DimensionKind::Other => write!(f, "other"),
        }
    }
}

/// Environment around the subject at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Monotonic world tick counter
    pub world_time: u64,
    /// Time of day in ticks; reduced modulo one day when read
    pub day_time: u64,
    /// Dimension the subject is in
    #[serde(default)]
    pub dimension: DimensionKind,
    /// Base temperature of the biome at the subject's position
    pub biome_temperature: f64,
    /// Sea level of the current world
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    /// Block height of the subject
    #[serde(default = "default_sea_level")]
    pub altitude: i32,
}

fn default_sea_level() -> i32 {
    63
}

impl Default for EnvironmentSample {
    fn default() -> Self {
        Self {
            world_time: 0,
            day_time: 0,
            dimension: DimensionKind::Overworld,
            biome_temperature: 0.8,
            sea_level: default_sea_level(),
            altitude: default_sea_level(),
        }
    }
}

impl EnvironmentSample {
    /// Creates an overworld sample at sea level with the given biome temperature.
    pub fn new(world_time: u64, biome_temperature: f64) -> Self {
        Self {
            world_time,
            day_time: world_time % TICKS_PER_DAY,
            biome_temperature,
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, dimension: DimensionKind) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_day_time(mut self, day_time: u64) -> Self {
        self.day_time = day_time;
        self
    }

    pub fn with_altitude(mut self, altitude: i32) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_sea_level(mut self, sea_level: i32) -> Self {
        self.sea_level = sea_level;
        self
    }

    /// Time of day within the current day, in `0..TICKS_PER_DAY`.
    pub fn time_of_day(&self) -> u64 {
        self.day_time % TICKS_PER_DAY
    }

    /// Blocks above sea level; negative below it.
    pub fn blocks_above_sea_level(&self) -> i64 {
        i64::from(self.altitude) - i64::from(self.sea_level)
    }

    /// Returns the same sample advanced by `ticks`, with day time wrapping.
    pub fn advanced(&self, ticks: u64) -> Self {
        Self {
            world_time: self.world_time + ticks,
            day_time: (self.day_time + ticks) % TICKS_PER_DAY,
            ..self.clone()
        }
    }
}

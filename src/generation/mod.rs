//! # Generation Module
//!
//! Initial terrain for freshly created maps.
//!
//! Every map starts as plain grass. Depending on its [`MapKind`], a
//! [`TerrainGenerator`] then lays noise-shaped water bodies and scattered
//! rock over the free tiles. The home village is left as authored.

pub mod terrain;

pub use terrain::*;

use crate::map::MapKind;
use crate::{HomesteadError, HomesteadResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for terrain decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Sampling frequency of the water noise, in noise units per tile
    pub noise_scale: f64,
    /// Noise value above which a tile becomes water; noise lies in -1..=1, so
    /// anything above 1 disables water
    pub water_threshold: f64,
    /// Probability that a remaining grass tile becomes rock (0.0 to 1.0)
    pub rock_chance: f64,
    /// Tiles along the map edge kept clear of water and rock
    pub border: u32,
}

impl GenerationConfig {
    /// Creates a configuration that leaves the map untouched.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            noise_scale: 0.1,
            water_threshold: 2.0,
            rock_chance: 0.0,
            border: 1,
        }
    }

    /// Default decoration for a map kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use homestead::{GenerationConfig, MapKind};
    ///
    /// let config = GenerationConfig::for_kind(MapKind::BattleMap, 7);
    /// assert!(config.rock_chance > 0.0);
    /// assert_eq!(GenerationConfig::for_kind(MapKind::HomeVillage, 7).rock_chance, 0.0);
    /// ```
    pub fn for_kind(kind: MapKind, seed: u64) -> Self {
        match kind {
            MapKind::HomeVillage => Self::new(seed),
            MapKind::BuilderBase => Self {
                noise_scale: 0.12,
                water_threshold: 0.45,
                rock_chance: 0.02,
                ..Self::new(seed)
            },
            MapKind::BattleMap => Self {
                noise_scale: 0.08,
                water_threshold: 0.35,
                rock_chance: 0.05,
                border: 2,
                ..Self::new(seed)
            },
        }
    }

    /// Checks that probabilities and scales are usable.
    pub fn validate(&self) -> HomesteadResult<()> {
        if !(0.0..=1.0).contains(&self.rock_chance) {
            return Err(HomesteadError::InvalidConfig(format!(
                "rock chance must be within 0..=1, got {}",
                self.rock_chance
            )));
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(HomesteadError::InvalidConfig(format!(
                "noise scale must be positive, got {}",
                self.noise_scale
            )));
        }
        if self.water_threshold.is_nan() {
            return Err(HomesteadError::InvalidConfig(
                "water threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

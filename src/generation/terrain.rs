//! # Terrain Decoration
//!
//! Noise-shaped water and scattered rock laid over a grass map.

use super::{create_rng, GenerationConfig};
use crate::map::{GridMap, GridPos, MapKind, TerrainType};
use crate::HomesteadResult;
use log::info;
use noise::{NoiseFn, Perlin};
use rand::Rng;

/// Count of tiles changed by a decoration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerrainSummary {
    pub water: usize,
    pub rock: usize,
}

/// Decorates maps with natural obstacles.
///
/// Only free grass tiles outside the configured border are touched, so
/// decorating a map that already holds buildings never strands them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainGenerator;

impl TerrainGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Creates a grass map of the given kind and decorates it with the kind's
    /// default configuration.
    pub fn generate(
        &self,
        kind: MapKind,
        width: u32,
        height: u32,
        tile_size: f32,
        seed: u64,
    ) -> HomesteadResult<GridMap> {
        let mut map = GridMap::new(kind, width, height, tile_size)?;
        self.decorate(&mut map, &GenerationConfig::for_kind(kind, seed))?;
        Ok(map)
    }

    /// Applies water and rock to `map` according to `config`.
    pub fn decorate(&self, map: &mut GridMap, config: &GenerationConfig) -> HomesteadResult<TerrainSummary> {
        config.validate()?;

        // Fold the high bits in so seeds differing only above bit 32 still differ.
        let perlin = Perlin::new((config.seed ^ (config.seed >> 32)) as u32);
        let mut rng = create_rng(config);
        let mut summary = TerrainSummary::default();

        let border = i64::from(config.border);
        let (width, height) = (i64::from(map.width()), i64::from(map.height()));
        let candidates: Vec<GridPos> = map
            .tiles()
            .filter(|(pos, tile)| {
                let (x, y) = (i64::from(pos.x), i64::from(pos.y));
                tile.terrain() == TerrainType::Grass
                    && !tile.is_occupied()
                    && x >= border
                    && y >= border
                    && x < width - border
                    && y < height - border
            })
            .map(|(pos, _)| pos)
            .collect();

        for pos in candidates {
            let sample = perlin.get([
                (f64::from(pos.x) + 0.5) * config.noise_scale,
                (f64::from(pos.y) + 0.5) * config.noise_scale,
            ]);

            if sample > config.water_threshold {
                map.set_terrain(pos.x, pos.y, TerrainType::Water);
                summary.water += 1;
            } else if rng.gen_bool(config.rock_chance) {
                map.set_terrain(pos.x, pos.y, TerrainType::Rock);
                summary.rock += 1;
            }
        }

        info!(
            "Decorated {:?} map: {} water, {} rock tiles",
            map.kind(),
            summary.water,
            summary.rock
        );
        Ok(summary)
    }
}

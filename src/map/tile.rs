//! # Tiles
//!
//! Terrain kinds and the per-tile state stored by the grid.

use super::ObjectId;
use serde::{Deserialize, Serialize};

/// Terrain kinds a tile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Grass,
    Water,
    Rock,
    /// Prepared ground with no natural cover
    Buildable,
}

impl TerrainType {
    /// Whether buildings may be placed on this terrain.
    pub fn is_buildable(self) -> bool {
        matches!(self, TerrainType::Grass | TerrainType::Buildable)
    }

    /// Whether this terrain stops movement regardless of occupancy.
    pub fn is_blocking(self) -> bool {
        matches!(self, TerrainType::Water | TerrainType::Rock)
    }

    /// Single-character symbol used in map layout assets.
    pub fn symbol(self) -> char {
        match self {
            TerrainType::Grass => 'g',
            TerrainType::Water => 'w',
            TerrainType::Rock => 'r',
            TerrainType::Buildable => 'b',
        }
    }

    /// Parses a layout symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'g' => Some(TerrainType::Grass),
            'w' => Some(TerrainType::Water),
            'r' => Some(TerrainType::Rock),
            'b' => Some(TerrainType::Buildable),
            _ => None,
        }
    }
}

/// One cell of the map grid.
///
/// The buildable flag is recomputed from terrain on every terrain change, and
/// a tile counts as occupied exactly when it holds an occupant handle. Both
/// are only mutated through the owning grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    terrain: TerrainType,
    buildable: bool,
    occupant: Option<ObjectId>,
}

impl Tile {
    /// Creates an unoccupied tile of the given terrain.
    pub fn new(terrain: TerrainType) -> Self {
        Self {
            terrain,
            buildable: terrain.is_buildable(),
            occupant: None,
        }
    }

    pub fn terrain(&self) -> TerrainType {
        self.terrain
    }

    pub fn is_buildable(&self) -> bool {
        self.buildable
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Handle of the object covering this tile, if any.
    pub fn occupant(&self) -> Option<ObjectId> {
        self.occupant
    }

    /// Occupied or covered by blocking terrain.
    pub fn is_blocked(&self) -> bool {
        self.is_occupied() || self.terrain.is_blocking()
    }

    /// Eligible for pathfinding traversal.
    pub fn is_walkable(&self) -> bool {
        !self.is_blocked()
    }

    /// Free and buildable.
    pub fn accepts_building(&self) -> bool {
        self.buildable && !self.is_occupied()
    }

    pub(crate) fn set_terrain(&mut self, terrain: TerrainType) {
        self.terrain = terrain;
        self.buildable = terrain.is_buildable();
    }

    pub(crate) fn occupy(&mut self, occupant: ObjectId) {
        self.occupant = Some(occupant);
    }

    pub(crate) fn vacate(&mut self) {
        self.occupant = None;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TerrainType::Grass)
    }
}

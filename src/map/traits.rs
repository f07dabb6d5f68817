//! # Map Traits
//!
//! Capability interfaces over a tile grid. Pathfinding and rendering only need
//! [`TileQuery`]; anything that edits the grid goes through [`TileMutator`].

use super::{GridPos, GridSize, ObjectId, TerrainType, Tile};

/// Read-only access to a tile grid.
pub trait TileQuery {
    /// Width in tiles.
    fn width(&self) -> u32;

    /// Height in tiles.
    fn height(&self) -> u32;

    /// Tile at `(x, y)`, or `None` outside the grid.
    fn tile(&self, x: i32, y: i32) -> Option<&Tile>;

    /// True iff `0 <= x < width` and `0 <= y < height`.
    fn is_valid_grid_pos(&self, x: i32, y: i32) -> bool {
        u32::try_from(x).is_ok_and(|x| x < self.width())
            && u32::try_from(y).is_ok_and(|y| y < self.height())
    }

    fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        self.tile(pos.x, pos.y)
    }

    /// Valid, unoccupied and not blocking terrain.
    fn is_walkable(&self, pos: GridPos) -> bool {
        self.tile_at(pos).is_some_and(Tile::is_walkable)
    }
}

/// Mutating access to a tile grid.
///
/// Every operation either applies completely or leaves the grid untouched.
pub trait TileMutator: TileQuery {
    /// Changes terrain; ignored outside the grid.
    fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainType);

    /// Occupies `[origin, origin + footprint)` with `building`, if feasible.
    fn place_building(&mut self, building: ObjectId, origin: GridPos, footprint: GridSize) -> bool;

    /// Releases every tile held by `building`; false when it was not placed.
    fn remove_building(&mut self, building: ObjectId) -> bool;

    /// Removes whichever building covers `pos`.
    fn remove_building_at(&mut self, pos: GridPos) -> bool;
}

//! # Grid Map
//!
//! The authoritative tile grid of a village map.
//!
//! [`GridMap`] answers geometric and occupancy queries and gates building
//! placement. World coordinates are map-local: tile `(x, y)` covers
//! `[x * tile_size, (x + 1) * tile_size)` on each axis, with the host
//! responsible for any camera or screen offset.

use super::{
    GridPos, GridSize, MapKind, ObjectId, TerrainType, Tile, TileMutator, TileQuery, Unit,
    WorldPoint, WorldRect,
};
use crate::config;
use crate::input::PointerEvent;
use crate::utils::{cell_origin, cell_span, find_path, floor_to_cell, Connectivity};
use crate::{HomesteadError, HomesteadResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest map side. Every cell index up to it converts to `f32` exactly.
pub const MAX_DIMENSION: u32 = 1 << 24;

/// Where a building sits on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingPlacement {
    /// Lowest-index corner of the footprint
    pub origin: GridPos,
    /// Tiles covered, starting at `origin`
    pub footprint: GridSize,
}

/// Fixed-size tile grid with occupancy tracking.
///
/// # Examples
///
/// ```
/// use homestead::{new_object_id, GridMap, GridPos, GridSize, MapKind};
///
/// let mut map = GridMap::new(MapKind::HomeVillage, 4, 4, 32.0).unwrap();
/// let hall = new_object_id();
///
/// assert!(map.place_building(hall, GridPos::new(1, 1), GridSize::square(2)));
/// assert_eq!(map.building_at(GridPos::new(2, 2)), Some(hall));
/// assert!(!map.can_place_building(GridPos::new(0, 0), GridSize::square(2)));
///
/// assert!(map.remove_building(hall));
/// assert!(map.can_place_building(GridPos::new(0, 0), GridSize::square(2)));
/// ```
#[derive(Debug, Clone)]
pub struct GridMap {
    kind: MapKind,
    width: u32,
    height: u32,
    tile_size: f32,
    connectivity: Connectivity,
    /// Row-major, `width * height` entries
    tiles: Vec<Tile>,
    buildings: HashMap<ObjectId, BuildingPlacement>,
    pub(super) units: Vec<Unit>,
    pub(super) resources: HashMap<GridPos, ObjectId>,
}

impl GridMap {
    /// Creates a map filled with grass.
    ///
    /// Fails when either dimension is zero or above [`MAX_DIMENSION`],
    /// `tile_size` is not a positive finite number, the world extent overflows
    /// `f32`, or the tile count does not fit in memory indexing.
    pub fn new(kind: MapKind, width: u32, height: u32, tile_size: f32) -> HomesteadResult<Self> {
        if width == 0 || height == 0 {
            return Err(HomesteadError::InvalidConfig(format!(
                "map must have at least one tile, got {}x{}",
                width, height
            )));
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(HomesteadError::InvalidConfig(format!(
                "tile size must be positive, got {}",
                tile_size
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(HomesteadError::InvalidConfig(format!(
                "map {}x{} exceeds {} tiles per side",
                width, height, MAX_DIMENSION
            )));
        }
        if !(width as f32 * tile_size).is_finite() || !(height as f32 * tile_size).is_finite() {
            return Err(HomesteadError::InvalidConfig(format!(
                "map {}x{} with tile size {} overflows world coordinates",
                width, height, tile_size
            )));
        }
        let tile_count = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| HomesteadError::InvalidConfig(format!("map {}x{} is too large", width, height)))?;

        info!("Creating {:?} map of {}x{} tiles ({} units per tile)", kind, width, height, tile_size);

        Ok(Self {
            kind,
            width,
            height,
            tile_size,
            connectivity: Connectivity::default(),
            tiles: vec![Tile::new(TerrainType::Grass); tile_count],
            buildings: HashMap::new(),
            units: Vec::new(),
            resources: HashMap::new(),
        })
    }

    /// Creates a map with the default dimensions and tile size.
    pub fn with_defaults(kind: MapKind) -> HomesteadResult<Self> {
        Self::new(
            kind,
            config::DEFAULT_MAP_WIDTH,
            config::DEFAULT_MAP_HEIGHT,
            config::DEFAULT_TILE_SIZE,
        )
    }

    /// Sets the neighbourhood used by [`GridMap::find_path`].
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.connectivity = connectivity;
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map size in tiles.
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Edge length of one tile in world units.
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space rectangle covered by the whole grid.
    pub fn world_bounds(&self) -> WorldRect {
        WorldRect::new(
            0.0,
            0.0,
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    // Coordinate conversion

    /// Tile containing a map-local world point.
    pub fn world_to_grid(&self, world: WorldPoint) -> GridPos {
        GridPos::new(
            floor_to_cell(world.x, self.tile_size),
            floor_to_cell(world.y, self.tile_size),
        )
    }

    /// World position of a tile's low corner.
    pub fn grid_to_world(&self, pos: GridPos) -> WorldPoint {
        WorldPoint::new(
            cell_origin(pos.x, self.tile_size),
            cell_origin(pos.y, self.tile_size),
        )
    }

    /// World position of a tile's centre.
    pub fn grid_to_world_center(&self, pos: GridPos) -> WorldPoint {
        let corner = self.grid_to_world(pos);
        let half = self.tile_size * 0.5;
        WorldPoint::new(corner.x + half, corner.y + half)
    }

    // Tile access

    pub fn is_valid_grid_pos(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index(x, y).map(|index| &self.tiles[index])
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        self.tile(pos.x, pos.y)
    }

    /// All tiles with their coordinates, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (GridPos, &Tile)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            // Dimensions are capped at MAX_DIMENSION at construction.
            let x = (index % width) as i32;
            let y = (index / width) as i32;
            (GridPos::new(x, y), tile)
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    pub(super) fn tile_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index(pos.x, pos.y).map(move |index| &mut self.tiles[index])
    }

    /// Changes a tile's terrain and recomputes its buildable flag.
    ///
    /// Ignored for coordinates outside the grid.
    pub fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainType) {
        if let Some(tile) = self.tile_mut(GridPos::new(x, y)) {
            tile.set_terrain(terrain);
        }
    }

    // Building placement

    /// True iff every tile of `[origin, origin + footprint)` is on the grid,
    /// buildable and free. Empty footprints are never placeable.
    pub fn can_place_building(&self, origin: GridPos, footprint: GridSize) -> bool {
        !footprint.is_empty()
            && footprint
                .cells(origin)
                .all(|pos| self.tile_at(pos).is_some_and(Tile::accepts_building))
    }

    /// Occupies the footprint with `building` if placement is feasible.
    ///
    /// Returns false, and changes nothing, when the footprint is blocked or
    /// the building is already on the map.
    pub fn place_building(&mut self, building: ObjectId, origin: GridPos, footprint: GridSize) -> bool {
        if self.holds_object(building) {
            debug!("Object {} is already on the map", building);
            return false;
        }
        if !self.can_place_building(origin, footprint) {
            debug!(
                "Rejected {}x{} building at {}",
                footprint.width, footprint.height, origin
            );
            return false;
        }

        for pos in footprint.cells(origin) {
            if let Some(tile) = self.tile_mut(pos) {
                tile.occupy(building);
            }
        }
        self.buildings
            .insert(building, BuildingPlacement { origin, footprint });
        debug!("Placed building {} at {}", building, origin);
        true
    }

    /// Releases every tile held by `building`.
    ///
    /// Returns false when the building was not on the map; removing twice is
    /// harmless.
    pub fn remove_building(&mut self, building: ObjectId) -> bool {
        let Some(placement) = self.buildings.remove(&building) else {
            return false;
        };

        for pos in placement.footprint.cells(placement.origin) {
            if let Some(tile) = self.tile_mut(pos) {
                if tile.occupant() == Some(building) {
                    tile.vacate();
                }
            }
        }
        debug!("Removed building {} from {}", building, placement.origin);
        true
    }

    /// Removes the building covering `pos`, if there is one.
    pub fn remove_building_at(&mut self, pos: GridPos) -> bool {
        match self.building_at(pos) {
            Some(building) => self.remove_building(building),
            None => false,
        }
    }

    /// Building covering `pos`.
    pub fn building_at(&self, pos: GridPos) -> Option<ObjectId> {
        self.tile_at(pos)
            .and_then(Tile::occupant)
            .filter(|occupant| self.buildings.contains_key(occupant))
    }

    /// True when `id` is placed as a building or a resource.
    pub fn holds_object(&self, id: ObjectId) -> bool {
        self.buildings.contains_key(&id) || self.resources.values().any(|existing| *existing == id)
    }

    pub fn building_placement(&self, building: ObjectId) -> Option<&BuildingPlacement> {
        self.buildings.get(&building)
    }

    pub fn buildings(&self) -> impl Iterator<Item = (&ObjectId, &BuildingPlacement)> {
        self.buildings.iter()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    // Collision

    /// True when the tile under `world` is off the grid, occupied, or blocking
    /// terrain.
    pub fn is_point_blocked(&self, world: WorldPoint) -> bool {
        self.is_grid_pos_blocked(self.world_to_grid(world))
    }

    /// Tile-level form of [`GridMap::is_point_blocked`].
    pub fn is_grid_pos_blocked(&self, pos: GridPos) -> bool {
        self.tile_at(pos).map_or(true, Tile::is_blocked)
    }

    /// True when any tile overlapping `area` is blocked.
    ///
    /// The rectangle is closed, so an edge lying exactly on a tile boundary
    /// also tests the tile beyond it. Rectangles reaching off the grid are
    /// blocked.
    pub fn is_area_blocked(&self, area: &WorldRect) -> bool {
        let (min_x, max_x) = cell_span(area.min_x(), area.max_x(), self.tile_size);
        let (min_y, max_y) = cell_span(area.min_y(), area.max_y(), self.tile_size);

        if !self.is_valid_grid_pos(min_x, min_y) || !self.is_valid_grid_pos(max_x, max_y) {
            return true;
        }

        (min_y..=max_y).any(|y| (min_x..=max_x).any(|x| self.is_grid_pos_blocked(GridPos::new(x, y))))
    }

    // Pathfinding

    /// Shortest walkable path between two tiles using the map's connectivity.
    ///
    /// See [`find_path`] for the exact contract.
    pub fn find_path(&self, start: GridPos, end: GridPos) -> Vec<GridPos> {
        find_path(self, start, end, self.connectivity)
    }

    // Input

    /// Translates a pointer event into the tile it landed on.
    ///
    /// The map takes no gameplay action of its own; the owning scene decides
    /// what a touch means.
    pub fn handle_pointer(&self, event: &PointerEvent) -> GridPos {
        let pos = self.world_to_grid(event.position);
        debug!("Pointer {:?} at grid position {}", event.phase, pos);
        pos
    }
}

impl TileQuery for GridMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        GridMap::tile(self, x, y)
    }

    fn is_valid_grid_pos(&self, x: i32, y: i32) -> bool {
        GridMap::is_valid_grid_pos(self, x, y)
    }
}

impl TileMutator for GridMap {
    fn set_terrain(&mut self, x: i32, y: i32, terrain: TerrainType) {
        GridMap::set_terrain(self, x, y, terrain);
    }

    fn place_building(&mut self, building: ObjectId, origin: GridPos, footprint: GridSize) -> bool {
        GridMap::place_building(self, building, origin, footprint)
    }

    fn remove_building(&mut self, building: ObjectId) -> bool {
        GridMap::remove_building(self, building)
    }

    fn remove_building_at(&mut self, pos: GridPos) -> bool {
        GridMap::remove_building_at(self, pos)
    }
}

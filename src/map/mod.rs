//! # Map Module
//!
//! Tile grid, coordinate types and the capability traits through which the
//! rest of the game talks to the grid.
//!
//! This module contains the fundamental building blocks of a village map:
//! - Grid and world coordinate types
//! - Tiles and terrain
//! - The [`GridMap`] itself, with placement and collision queries
//! - Unit and resource bookkeeping on top of the grid

pub mod grid;
pub mod occupants;
pub mod tile;
pub mod traits;

pub use grid::*;
pub use occupants::*;
pub use tile::*;
pub use traits::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Integer tile coordinate.
///
/// Coordinates may be negative or past the map edge; whether they index a
/// tile is decided by [`GridMap::is_valid_grid_pos`].
///
/// # Examples
///
/// ```
/// use homestead::GridPos;
///
/// let pos = GridPos::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Creates a new grid position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Manhattan distance to another position.
    ///
    /// ```
    /// use homestead::GridPos;
    ///
    /// assert_eq!(GridPos::new(0, 0).manhattan_distance(GridPos::new(3, -4)), 7);
    /// ```
    pub fn manhattan_distance(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the 4 cardinal neighbours in N, W, E, S order.
    pub fn cardinal_adjacent_positions(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x, self.y - 1),
            GridPos::new(self.x - 1, self.y),
            GridPos::new(self.x + 1, self.y),
            GridPos::new(self.x, self.y + 1),
        ]
    }

    /// Returns the 4 diagonal neighbours in NW, NE, SW, SE order.
    pub fn diagonal_adjacent_positions(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x - 1, self.y - 1),
            GridPos::new(self.x + 1, self.y - 1),
            GridPos::new(self.x - 1, self.y + 1),
            GridPos::new(self.x + 1, self.y + 1),
        ]
    }

    /// Returns all 8 neighbours, cardinals first.
    pub fn adjacent_positions(self) -> Vec<GridPos> {
        let mut all = self.cardinal_adjacent_positions().to_vec();
        all.extend(self.diagonal_adjacent_positions());
        all
    }
}

impl std::ops::Add for GridPos {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for GridPos {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of a rectangular block of tiles, such as a building footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Creates a new size in tiles.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square size with the given edge.
    pub fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// True when the block covers no tiles.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of tiles covered.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Tiles of `[origin, origin + self)` in row-major order.
    ///
    /// ```
    /// use homestead::{GridPos, GridSize};
    ///
    /// let cells: Vec<_> = GridSize::new(2, 1).cells(GridPos::new(3, 4)).collect();
    /// assert_eq!(cells, vec![GridPos::new(3, 4), GridPos::new(4, 4)]);
    /// ```
    pub fn cells(self, origin: GridPos) -> impl Iterator<Item = GridPos> {
        let width = i64::from(self.width);
        let height = i64::from(self.height);
        (0..height).flat_map(move |dy| {
            (0..width).map(move |dx| {
                GridPos::new(
                    saturate(i64::from(origin.x) + dx),
                    saturate(i64::from(origin.y) + dy),
                )
            })
        })
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// A point in the map's local world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: WorldPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in world space.
///
/// The size may be negative along either axis; the `min_*`/`max_*` accessors
/// always return the true extremes, so callers never depend on which corner
/// the rectangle was built from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub origin: WorldPoint,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    /// Creates a rectangle from an origin corner and a (possibly negative) size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: WorldPoint::new(x, y),
            width,
            height,
        }
    }

    /// Creates a rectangle spanning two arbitrary opposite corners.
    pub fn from_corners(a: WorldPoint, b: WorldPoint) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x.min(self.origin.x + self.width)
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x.max(self.origin.x + self.width)
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y.min(self.origin.y + self.height)
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y.max(self.origin.y + self.height)
    }

    /// Closed containment test; points on the edge are inside.
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

/// Which kind of map a grid represents.
///
/// The kind only influences the initial terrain decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MapKind {
    /// The player's own village
    #[default]
    HomeVillage,
    /// Secondary base
    BuilderBase,
    /// Map an attack is played on
    BattleMap,
}

/// Opaque handle of an object placed on the map.
pub type ObjectId = Uuid;

/// Creates a new unique object handle.
pub fn new_object_id() -> ObjectId {
    Uuid::new_v4()
}

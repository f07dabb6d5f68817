//! # Homestead
//!
//! Tile-grid map core for a village-builder game.
//!
//! ## Architecture Overview
//!
//! The crate is built around a single authoritative data structure, [`GridMap`],
//! and a thin host that drives it:
//!
//! - **Map**: the tile grid, coordinate conversion, placement and collision queries
//! - **Utilities**: cell arithmetic and A* pathfinding over any [`TileQuery`]
//! - **Generation**: initial terrain decoration per [`MapKind`]
//! - **Assets**: JSON map layouts that seed a map's geometry and terrain
//! - **Scenes**: the placement scene that owns a map and reacts to input
//! - **Rendering / Input**: macroquad front end for drawing and pointer delivery
//!
//! The map never owns the buildings, units or resources placed on it. It stores
//! their [`ObjectId`] handles and leaves lifetime management to the caller.

pub mod assets;
pub mod generation;
pub mod input;
pub mod map;
pub mod rendering;
pub mod scenes;
pub mod utils;

pub use assets::*;
pub use generation::*;
pub use input::*;
pub use map::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Homestead map engine.
#[derive(thiserror::Error, Debug)]
pub enum HomesteadError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A map layout asset is malformed
    #[error("Invalid map layout: {0}")]
    InvalidLayout(String),

    /// Map or generation parameters are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Homestead codebase.
pub type HomesteadResult<T> = Result<T, HomesteadError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Map configuration constants.
pub mod config {
    /// Default map width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 32;

    /// Default map height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 32;

    /// Default tile edge length in world units
    pub const DEFAULT_TILE_SIZE: f32 = 32.0;

    /// Layout asset for the home village
    pub const HOME_VILLAGE_LAYOUT: &str = "assets/maps/home_village.json";

    /// Edge length of the footprint selected when a scene starts
    pub const DEFAULT_FOOTPRINT_EDGE: u32 = 2;

    /// How long a rejected placement stays highlighted, in seconds
    pub const REJECTED_FLASH_SECONDS: f32 = 0.5;
}

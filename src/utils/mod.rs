//! # Utilities Module
//!
//! Cell arithmetic and pathfinding shared by the map and its collaborators.

pub mod math;
pub mod pathfinding;

pub use self::math::*;
pub use self::pathfinding::*;

//! # Rendering Module
//!
//! Overlay geometry derived from the map, and the macroquad display that
//! rasterises it.

pub mod display;
pub mod overlay;

pub use display::*;
pub use overlay::*;

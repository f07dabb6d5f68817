//! # Debug Overlay
//!
//! Grid lines and placement highlights, as plain geometry for the renderer.

use crate::map::{GridMap, GridPos, GridSize, WorldPoint, WorldRect};

/// A straight line in map-local world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: WorldPoint,
    pub end: WorldPoint,
}

/// What a highlighted region means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Footprint fits
    Valid,
    /// Footprint is blocked
    Invalid,
    /// Building that would be removed
    Removal,
}

/// A highlighted block of tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub origin: GridPos,
    pub size: GridSize,
    pub kind: HighlightKind,
}

impl Highlight {
    /// World-space rectangle covered by the highlight on `map`.
    pub fn area(&self, map: &GridMap) -> WorldRect {
        let corner = map.grid_to_world(self.origin);
        WorldRect::new(
            corner.x,
            corner.y,
            self.size.width as f32 * map.tile_size(),
            self.size.height as f32 * map.tile_size(),
        )
    }
}

/// Overlay state owned by a scene: grid-line visibility and one highlight.
#[derive(Debug, Clone, Default)]
pub struct GridOverlay {
    show_grid: bool,
    highlight: Option<Highlight>,
}

impl GridOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows or hides the grid lines.
    pub fn draw_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn is_grid_shown(&self) -> bool {
        self.show_grid
    }

    /// Grid lines for `map`, or nothing while the grid is hidden.
    ///
    /// Produces `width + 1` vertical lines followed by `height + 1`
    /// horizontal lines spanning the whole map.
    pub fn grid_lines(&self, map: &GridMap) -> Vec<LineSegment> {
        if !self.show_grid {
            return Vec::new();
        }

        let bounds = map.world_bounds();
        let (right, bottom) = (bounds.max_x(), bounds.max_y());
        let columns = (0..=map.width() as i32).map(|x| {
            let px = map.grid_to_world(GridPos::new(x, 0)).x;
            LineSegment {
                start: WorldPoint::new(px, 0.0),
                end: WorldPoint::new(px, bottom),
            }
        });
        let rows = (0..=map.height() as i32).map(|y| {
            let py = map.grid_to_world(GridPos::new(0, y)).y;
            LineSegment {
                start: WorldPoint::new(0.0, py),
                end: WorldPoint::new(right, py),
            }
        });
        columns.chain(rows).collect()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }
}

/// Highlight for a prospective footprint, coloured by feasibility.
pub fn footprint_highlight(map: &GridMap, origin: GridPos, footprint: GridSize) -> Highlight {
    let kind = if map.can_place_building(origin, footprint) {
        HighlightKind::Valid
    } else {
        HighlightKind::Invalid
    };
    Highlight {
        origin,
        size: footprint,
        kind,
    }
}

//! # Display Management
//!
//! Draws a village scene with macroquad: terrain, occupants, the debug overlay
//! and a message log. The map is scaled to fit the window above the log.

use crate::map::{GridMap, GridPos, TerrainType, WorldPoint, WorldRect};
use crate::rendering::HighlightKind;
use crate::scenes::{SceneTool, VillageScene};
use macroquad::prelude::*;

/// Height of the message strip at the bottom of the window, in pixels.
const MESSAGE_AREA_HEIGHT: f32 = 90.0;

/// Macroquad display for a village scene.
pub struct MapDisplay {
    /// Screen position of the map's world origin
    pub offset_x: f32,
    pub offset_y: f32,
    /// Screen pixels per world unit
    pub scale: f32,
    /// Message history, oldest first
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
}

impl Default for MapDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MapDisplay {
    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            messages: Vec::new(),
            max_messages: 50,
        }
    }

    /// Adds a message to the log, dropping the oldest beyond the limit.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Scales and centres `bounds` inside the screen area above the log.
    pub fn fit_to_screen(&mut self, bounds: WorldRect, screen_w: f32, screen_h: f32) {
        let area_h = (screen_h - MESSAGE_AREA_HEIGHT).max(1.0);
        let world_w = (bounds.max_x() - bounds.min_x()).max(f32::EPSILON);
        let world_h = (bounds.max_y() - bounds.min_y()).max(f32::EPSILON);

        self.scale = (screen_w / world_w).min(area_h / world_h);
        self.offset_x = (screen_w - world_w * self.scale) / 2.0 - bounds.min_x() * self.scale;
        self.offset_y = (area_h - world_h * self.scale) / 2.0 - bounds.min_y() * self.scale;
    }

    /// Converts a screen pixel to map-local world coordinates.
    pub fn screen_to_map(&self, screen_x: f32, screen_y: f32) -> WorldPoint {
        WorldPoint::new(
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    /// Converts map-local world coordinates to a screen pixel.
    pub fn map_to_screen(&self, point: WorldPoint) -> Vec2 {
        vec2(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Renders one frame of the scene.
    pub fn render(&self, scene: &VillageScene) {
        clear_background(BLACK);

        let map = scene.map();
        self.render_tiles(map);
        self.render_units(map);

        for line in scene.overlay().grid_lines(map) {
            let start = self.map_to_screen(line.start);
            let end = self.map_to_screen(line.end);
            draw_line(start.x, start.y, end.x, end.y, 1.0, GRAY);
        }

        if let Some(highlight) = scene.overlay().highlight() {
            let color = match highlight.kind {
                HighlightKind::Valid => Color::new(0.2, 0.9, 0.2, 0.45),
                HighlightKind::Invalid => Color::new(0.9, 0.15, 0.15, 0.45),
                HighlightKind::Removal => Color::new(0.95, 0.6, 0.1, 0.45),
            };
            self.fill_world_rect(highlight.area(map), color);
        }

        self.render_messages(scene);
    }

    fn render_tiles(&self, map: &GridMap) {
        let tile_px = map.tile_size() * self.scale;
        for (pos, tile) in map.tiles() {
            let corner = self.map_to_screen(map.grid_to_world(pos));
            let color = match tile.occupant() {
                Some(id) if map.resource_at(pos) == Some(id) => GOLD,
                Some(_) => Color::from_rgba(160, 82, 45, 255),
                None => terrain_color(tile.terrain()),
            };
            draw_rectangle(corner.x, corner.y, tile_px, tile_px, color);
        }

        for (_, placement) in map.buildings() {
            let origin = map.grid_to_world(placement.origin);
            let far = map.grid_to_world(GridPos::new(
                placement.origin.x + placement.footprint.width as i32,
                placement.origin.y + placement.footprint.height as i32,
            ));
            let a = self.map_to_screen(origin);
            let b = self.map_to_screen(far);
            draw_rectangle_lines(a.x, a.y, b.x - a.x, b.y - a.y, 2.0, DARKBROWN);
        }
    }

    fn render_units(&self, map: &GridMap) {
        let radius = (map.tile_size() * self.scale * 0.3).max(2.0);
        for unit in map.units() {
            let center = self.map_to_screen(unit.position);
            let color = match unit.faction {
                crate::map::Faction::Defender => SKYBLUE,
                crate::map::Faction::Attacker => RED,
            };
            draw_circle(center.x, center.y, radius, color);
        }
    }

    fn render_messages(&self, scene: &VillageScene) {
        let top = screen_height() - MESSAGE_AREA_HEIGHT;
        draw_rectangle(0.0, top, screen_width(), MESSAGE_AREA_HEIGHT, Color::new(0.0, 0.0, 0.0, 0.8));

        let tool = match scene.tool() {
            SceneTool::Place(size) => format!("Tool: build {}x{}", size.width, size.height),
            SceneTool::Remove => "Tool: remove".to_string(),
        };
        let map = scene.map();
        let status = format!(
            "{}  |  Buildings: {}  |  {:?} {}x{}",
            tool,
            map.building_count(),
            map.kind(),
            map.width(),
            map.height()
        );
        draw_text(&status, 10.0, top + 20.0, 20.0, YELLOW);

        let mut line_y = top + 42.0;
        for message in self.messages.iter().rev().take(3).rev() {
            draw_text(message, 10.0, line_y, 18.0, WHITE);
            line_y += 18.0;
        }
    }

    fn fill_world_rect(&self, rect: WorldRect, color: Color) {
        let a = self.map_to_screen(WorldPoint::new(rect.min_x(), rect.min_y()));
        let b = self.map_to_screen(WorldPoint::new(rect.max_x(), rect.max_y()));
        draw_rectangle(a.x, a.y, b.x - a.x, b.y - a.y, color);
    }
}

/// Base colour for a terrain kind.
pub fn terrain_color(terrain: TerrainType) -> Color {
    match terrain {
        TerrainType::Grass => Color::from_rgba(34, 139, 34, 255),
        TerrainType::Water => Color::from_rgba(30, 90, 200, 255),
        TerrainType::Rock => Color::from_rgba(110, 110, 110, 255),
        TerrainType::Buildable => Color::from_rgba(150, 170, 90, 255),
    }
}

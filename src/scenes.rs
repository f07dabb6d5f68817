//! # Scene Management System
//!
//! The village scene owns a [`GridMap`] and turns pointer gestures into
//! building placement and removal. [`SceneManager`] drives it from the
//! macroquad frame loop.

use crate::config;
use crate::input::{InputHandler, PlayerInput, PointerEvent, PointerPhase};
use crate::map::{new_object_id, GridMap, GridPos, GridSize, ObjectId};
use crate::rendering::{footprint_highlight, GridOverlay, Highlight, HighlightKind, MapDisplay};
use log::{info, trace};
use macroquad::prelude::*;

/// What a completed gesture does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTool {
    /// Place a new building with this footprint
    Place(GridSize),
    /// Remove the building under the pointer
    Remove,
}

/// Outcome of a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Placed { building: ObjectId, origin: GridPos },
    Rejected { origin: GridPos },
    Removed { building: ObjectId },
}

/// A village being edited: the map plus placement-mode state.
#[derive(Debug, Clone)]
pub struct VillageScene {
    map: GridMap,
    overlay: GridOverlay,
    tool: SceneTool,
    /// Tile under an active gesture
    cursor: Option<GridPos>,
    /// Seconds left on the rejected-placement highlight
    flash_remaining: f32,
    elapsed: f32,
}

impl VillageScene {
    pub fn new(map: GridMap) -> Self {
        Self {
            map,
            overlay: GridOverlay::new(),
            tool: SceneTool::Place(GridSize::square(config::DEFAULT_FOOTPRINT_EDGE)),
            cursor: None,
            flash_remaining: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut GridMap {
        &mut self.map
    }

    pub fn overlay(&self) -> &GridOverlay {
        &self.overlay
    }

    pub fn tool(&self) -> SceneTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: SceneTool) {
        self.tool = tool;
        self.refresh_highlight();
    }

    /// Seconds of session time seen by [`VillageScene::update`].
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Flips grid-line visibility and returns the new state.
    pub fn toggle_grid(&mut self) -> bool {
        let show = !self.overlay.is_grid_shown();
        self.overlay.draw_grid(show);
        show
    }

    /// Per-frame tick. Negative or non-finite deltas are ignored.
    pub fn update(&mut self, delta: f32) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        self.elapsed += delta;
        trace!("Scene tick {:.4}s (elapsed {:.2}s)", delta, self.elapsed);

        if self.flash_remaining > 0.0 {
            self.flash_remaining = (self.flash_remaining - delta).max(0.0);
            if self.flash_remaining == 0.0 {
                self.refresh_highlight();
            }
        }
    }

    /// Handles a pointer event in map-local coordinates.
    ///
    /// Began and Moved only move the preview; Ended applies the current tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SceneEvent> {
        let pos = self.map.handle_pointer(&event);
        let outcome = match event.phase {
            PointerPhase::Began | PointerPhase::Moved => {
                self.cursor = Some(pos);
                self.flash_remaining = 0.0;
                None
            }
            PointerPhase::Ended => {
                self.cursor = None;
                self.apply_tool(pos)
            }
        };
        self.refresh_highlight();
        outcome
    }

    fn apply_tool(&mut self, pos: GridPos) -> Option<SceneEvent> {
        match self.tool {
            SceneTool::Place(footprint) => {
                let building = new_object_id();
                if self.map.place_building(building, pos, footprint) {
                    info!("Placed building {} at {}", building, pos);
                    Some(SceneEvent::Placed {
                        building,
                        origin: pos,
                    })
                } else {
                    self.flash_remaining = config::REJECTED_FLASH_SECONDS;
                    self.overlay.set_highlight(Highlight {
                        origin: pos,
                        size: footprint,
                        kind: HighlightKind::Invalid,
                    });
                    Some(SceneEvent::Rejected { origin: pos })
                }
            }
            SceneTool::Remove => {
                let building = self.map.building_at(pos)?;
                self.map.remove_building(building);
                info!("Removed building {}", building);
                Some(SceneEvent::Removed { building })
            }
        }
    }

    fn refresh_highlight(&mut self) {
        let Some(pos) = self.cursor else {
            if self.flash_remaining == 0.0 {
                self.overlay.clear_highlight();
            }
            return;
        };

        let highlight = match self.tool {
            SceneTool::Place(footprint) => footprint_highlight(&self.map, pos, footprint),
            SceneTool::Remove => match self
                .map
                .building_at(pos)
                .and_then(|building| self.map.building_placement(building))
            {
                Some(placement) => Highlight {
                    origin: placement.origin,
                    size: placement.footprint,
                    kind: HighlightKind::Removal,
                },
                None => Highlight {
                    origin: pos,
                    size: GridSize::square(1),
                    kind: HighlightKind::Invalid,
                },
            },
        };
        self.overlay.set_highlight(highlight);
    }
}

/// Runs a village scene inside the macroquad frame loop.
pub struct SceneManager {
    scene: VillageScene,
    display: MapDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    pub fn new(scene: VillageScene, input_handler: InputHandler) -> Self {
        let mut display = MapDisplay::new();
        display.add_message("Welcome to your village!".to_string());
        display.add_message("Drag to preview, release to build. F1 for help".to_string());

        Self {
            scene,
            display,
            input_handler,
        }
    }

    /// Runs frames until the player quits.
    pub async fn run(&mut self) {
        loop {
            self.display
                .fit_to_screen(self.scene.map().world_bounds(), screen_width(), screen_height());

            if self.handle_inputs(self.input_handler.get_inputs()) {
                break;
            }

            self.scene.update(get_frame_time());
            self.display.render(&self.scene);

            next_frame().await;
        }
        info!("Scene loop ended after {:.1}s", self.scene.elapsed());
    }

    /// Applies a frame's inputs in order; returns true when exit is requested.
    fn handle_inputs(&mut self, inputs: Vec<PlayerInput>) -> bool {
        let mut quit = false;
        for input in inputs {
            quit |= self.handle_input(input);
        }
        quit
    }

    /// Applies one input; returns true when exit is requested.
    fn handle_input(&mut self, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Quit => return true,

            PlayerInput::Help => {
                self.display.add_message(
                    "Help: 1-4=footprint, R=remove, G=grid, ESC=quit".to_string(),
                );
            }

            PlayerInput::ToggleGrid => {
                let shown = self.scene.toggle_grid();
                let state = if shown { "shown" } else { "hidden" };
                self.display.add_message(format!("Grid {}", state));
            }

            PlayerInput::SelectFootprint(size) => {
                self.scene.set_tool(SceneTool::Place(size));
                self.display
                    .add_message(format!("Placing {}x{} buildings", size.width, size.height));
            }

            PlayerInput::SelectRemove => {
                self.scene.set_tool(SceneTool::Remove);
                self.display.add_message("Tap a building to remove it".to_string());
            }

            PlayerInput::Pointer {
                screen_x,
                screen_y,
                phase,
            } => {
                let position = self.display.screen_to_map(screen_x, screen_y);
                match self.scene.handle_pointer(PointerEvent::new(position, phase)) {
                    Some(SceneEvent::Placed { origin, .. }) => {
                        self.display.add_message(format!("Built at {}", origin));
                    }
                    Some(SceneEvent::Rejected { origin }) => {
                        self.display.add_message(format!("Cannot build at {}", origin));
                    }
                    Some(SceneEvent::Removed { .. }) => {
                        self.display.add_message("Building removed".to_string());
                    }
                    None => {}
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapKind, TerrainType, WorldPoint};

    fn scene() -> VillageScene {
        VillageScene::new(GridMap::new(MapKind::HomeVillage, 6, 6, 10.0).unwrap())
    }

    fn at(x: f32, y: f32, phase: PointerPhase) -> PointerEvent {
        PointerEvent::new(WorldPoint::new(x, y), phase)
    }

    #[test]
    fn test_drag_previews_then_places() {
        let mut scene = scene();
        assert_eq!(scene.handle_pointer(at(5.0, 5.0, PointerPhase::Began)), None);
        assert_eq!(scene.overlay().highlight().map(|h| h.kind), Some(HighlightKind::Valid));

        assert_eq!(scene.handle_pointer(at(25.0, 15.0, PointerPhase::Moved)), None);
        assert_eq!(scene.overlay().highlight().map(|h| h.origin), Some(GridPos::new(2, 1)));
        assert_eq!(scene.map().building_count(), 0);

        let event = scene.handle_pointer(at(25.0, 15.0, PointerPhase::Ended));
        let Some(SceneEvent::Placed { building, origin }) = event else {
            panic!("expected placement, got {:?}", event);
        };
        assert_eq!(origin, GridPos::new(2, 1));
        assert_eq!(scene.map().building_at(GridPos::new(3, 2)), Some(building));
        assert!(scene.overlay().highlight().is_none());
    }

    #[test]
    fn test_rejected_placement_flashes_then_clears() {
        let mut scene = scene();
        scene.map_mut().set_terrain(0, 0, TerrainType::Water);

        let event = scene.handle_pointer(at(1.0, 1.0, PointerPhase::Ended));
        assert_eq!(event, Some(SceneEvent::Rejected { origin: GridPos::new(0, 0) }));
        assert_eq!(scene.overlay().highlight().map(|h| h.kind), Some(HighlightKind::Invalid));

        scene.update(config::REJECTED_FLASH_SECONDS / 2.0);
        assert!(scene.overlay().highlight().is_some());
        scene.update(config::REJECTED_FLASH_SECONDS);
        assert!(scene.overlay().highlight().is_none());
    }

    #[test]
    fn test_remove_tool() {
        let mut scene = scene();
        scene.handle_pointer(at(0.0, 0.0, PointerPhase::Ended));
        assert_eq!(scene.map().building_count(), 1);

        scene.set_tool(SceneTool::Remove);
        scene.handle_pointer(at(15.0, 15.0, PointerPhase::Began));
        assert_eq!(scene.overlay().highlight().map(|h| h.kind), Some(HighlightKind::Removal));
        assert_eq!(scene.overlay().highlight().map(|h| h.size), Some(GridSize::square(2)));

        let event = scene.handle_pointer(at(15.0, 15.0, PointerPhase::Ended));
        assert!(matches!(event, Some(SceneEvent::Removed { .. })));
        assert_eq!(scene.map().building_count(), 0);

        assert_eq!(scene.handle_pointer(at(15.0, 15.0, PointerPhase::Ended)), None);
    }

    #[test]
    fn test_update_tracks_elapsed_time() {
        let mut scene = scene();
        scene.update(0.25);
        scene.update(-1.0);
        scene.update(f32::NAN);
        scene.update(0.5);
        assert_eq!(scene.elapsed(), 0.75);
    }

    #[test]
    fn test_manager_finishes_gesture_before_tool_switch() {
        let mut manager = SceneManager::new(scene(), InputHandler::new());
        let release = PlayerInput::Pointer {
            screen_x: 15.0,
            screen_y: 15.0,
            phase: PointerPhase::Ended,
        };
        let inputs = crate::input::frame_inputs(vec![release], Some(PlayerInput::SelectRemove));

        assert!(!manager.handle_inputs(inputs));
        assert_eq!(manager.scene.map().building_count(), 1);
        assert!(manager.scene.map().building_at(GridPos::new(1, 1)).is_some());
        assert_eq!(manager.scene.tool(), SceneTool::Remove);
    }

    #[test]
    fn test_toggle_grid() {
        let mut scene = scene();
        assert!(scene.toggle_grid());
        assert!(scene.overlay().is_grid_shown());
        assert!(!scene.toggle_grid());
    }
}

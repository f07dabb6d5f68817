//! # Input Module
//!
//! Pointer events delivered to the map, and the macroquad handler that
//! produces them from mouse, touch and keyboard state.

use crate::map::{GridSize, WorldPoint};
use macroquad::prelude::*;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
}

/// A pointer or touch event in map-local world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: WorldPoint,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(position: WorldPoint, phase: PointerPhase) -> Self {
        Self { position, phase }
    }
}

/// Maps a macroquad touch phase onto a pointer phase.
///
/// Stationary touches produce no event; cancelled touches end the gesture.
pub fn pointer_phase_from_touch(phase: TouchPhase) -> Option<PointerPhase> {
    match phase {
        TouchPhase::Started => Some(PointerPhase::Began),
        TouchPhase::Moved => Some(PointerPhase::Moved),
        TouchPhase::Ended | TouchPhase::Cancelled => Some(PointerPhase::Ended),
        TouchPhase::Stationary => None,
    }
}

/// Player input types produced by the input handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Pointer activity at a screen position
    Pointer {
        screen_x: f32,
        screen_y: f32,
        phase: PointerPhase,
    },
    /// Show or hide the grid-line overlay
    ToggleGrid,
    /// Switch to placement mode with the given footprint
    SelectFootprint(GridSize),
    /// Switch to removal mode
    SelectRemove,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Orders one frame's inputs.
///
/// Pointer events come first so a gesture ending this frame completes under
/// the tool it started with, even when a hotkey switches tools in the same
/// frame.
pub fn frame_inputs(
    pointer: Vec<PlayerInput>,
    keyboard: Option<PlayerInput>,
) -> Vec<PlayerInput> {
    pointer.into_iter().chain(keyboard).collect()
}

/// Input handler for processing player commands.
///
/// Touch input takes priority over the mouse so a touch screen does not
/// produce duplicate events through mouse emulation.
pub struct InputHandler {
    /// Whether the footprint hotkeys (1-4) are active
    pub footprint_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self {
            footprint_keys_enabled: true,
        }
    }

    /// Gets every input for this frame, pointer events before hotkeys.
    pub fn get_inputs(&self) -> Vec<PlayerInput> {
        let touches = self.process_touches();
        let pointer = if touches.is_empty() {
            self.process_mouse().into_iter().collect()
        } else {
            touches
        };
        frame_inputs(pointer, self.process_keyboard())
    }

    fn process_keyboard(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }
        if is_key_pressed(KeyCode::G) {
            return Some(PlayerInput::ToggleGrid);
        }
        if is_key_pressed(KeyCode::F1) {
            return Some(PlayerInput::Help);
        }
        if is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Delete) {
            return Some(PlayerInput::SelectRemove);
        }

        if self.footprint_keys_enabled {
            let hotkeys = [
                (KeyCode::Key1, 1),
                (KeyCode::Key2, 2),
                (KeyCode::Key3, 3),
                (KeyCode::Key4, 4),
            ];
            for (key, edge) in hotkeys {
                if is_key_pressed(key) {
                    return Some(PlayerInput::SelectFootprint(GridSize::square(edge)));
                }
            }
        }

        None
    }

    fn process_touches(&self) -> Vec<PlayerInput> {
        touches()
            .into_iter()
            .filter_map(|touch| {
                pointer_phase_from_touch(touch.phase).map(|phase| PlayerInput::Pointer {
                    screen_x: touch.position.x,
                    screen_y: touch.position.y,
                    phase,
                })
            })
            .collect()
    }

    fn process_mouse(&self) -> Option<PlayerInput> {
        let phase = if is_mouse_button_pressed(MouseButton::Left) {
            PointerPhase::Began
        } else if is_mouse_button_released(MouseButton::Left) {
            PointerPhase::Ended
        } else if is_mouse_button_down(MouseButton::Left) {
            PointerPhase::Moved
        } else {
            return None;
        };

        let (screen_x, screen_y) = mouse_position();
        Some(PlayerInput::Pointer {
            screen_x,
            screen_y,
            phase,
        })
    }
}

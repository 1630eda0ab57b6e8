//! Interfaces the host game provides to the guard.

use crate::ui_tree::{UiElement, Vec2};
use std::time::Instant;

/// Read access to the host's current UI state.
pub trait GameUi {
    /// Name of the screen currently on top (`pause_screen`, `hud_screen`, ...).
    fn screen_name(&self) -> &str;
    /// Root of the current UI tree, if the host has one this frame.
    fn root(&self) -> Option<&UiElement>;
    /// Cursor position in the same units as the tree's rectangles.
    fn cursor(&self) -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    LeftMouse,
    RightMouse,
    MiddleMouse,
    /// Any keyboard key, by host key code.
    Key(u32),
}

/// One raw input event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputEvent {
    pub key: InputKey,
    pub is_down: bool,
    pub timestamp: Instant,
}

impl RawInputEvent {
    pub fn new(key: InputKey, is_down: bool, timestamp: Instant) -> Self {
        Self {
            key,
            is_down,
            timestamp,
        }
    }

    pub fn left_down(timestamp: Instant) -> Self {
        Self::new(InputKey::LeftMouse, true, timestamp)
    }

    pub fn is_left_press(&self) -> bool {
        self.key == InputKey::LeftMouse && self.is_down
    }
}

/// Per-frame arguments of the host's render callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo<'a> {
    pub delta: f32,
    pub screen_name: &'a str,
    pub hud_hidden: bool,
    pub client_ui: bool,
}

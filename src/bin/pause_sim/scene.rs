//! Simulated game state: screens, UI trees and the cursor.

use anyhow::{Context, Result};
use disconnect_guard::locator::locate;
use disconnect_guard::resolver::absolute_rect;
use disconnect_guard::{GameUi, Rect, UiElement, Vec2};
use ratatui::layout::Rect as CellRect;
use serde_json::json;
use std::fs;
use std::path::Path;

pub(crate) const PAUSE_SCREEN: &str = "pause_screen";
pub(crate) const HUD_SCREEN: &str = "hud_screen";
pub(crate) const START_SCREEN: &str = "start_screen";

/// Conversion between terminal cells and UI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CellScale {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl CellScale {
    /// UI point at the centre of a cell.
    pub(crate) fn to_ui(self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (f32::from(column) + 0.5) * self.width,
            (f32::from(row) + 0.5) * self.height,
        )
    }

    /// Cells covered by `rect`, clipped to `bounds`. `None` when nothing is visible.
    pub(crate) fn to_cells(self, rect: Rect, bounds: CellRect) -> Option<CellRect> {
        let left = (rect.left / self.width).floor().max(0.0);
        let top = (rect.top / self.height).floor().max(0.0);
        let right = (rect.right / self.width).ceil().min(f32::from(bounds.right()));
        let bottom = (rect.bottom / self.height).ceil().min(f32::from(bounds.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        let area = CellRect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        );
        Some(area.intersection(bounds)).filter(|a| a.width > 0 && a.height > 0)
    }
}

/// Built-in pause screen; the quit control sits two containers deep.
pub(crate) fn sample_pause_tree() -> UiElement {
    let button = |name: &str, y: f32| {
        UiElement::new(name, Rect::from_xywh(0.0, y, 256.0, 48.0))
            .with_properties(json!({ "control": "button" }))
    };
    UiElement::new("screen", Rect::from_xywh(0.0, 0.0, 640.0, 384.0)).with_child(
        UiElement::new("pause_menu", Rect::from_xywh(160.0, 48.0, 320.0, 288.0))
            .with_child(UiElement::new("title", Rect::from_xywh(0.0, 0.0, 320.0, 32.0)))
            .with_child(
                UiElement::new("button_stack", Rect::from_xywh(32.0, 48.0, 256.0, 208.0))
                    .with_children([
                        button("resume_button", 0.0),
                        button("settings_button", 64.0),
                        button("quit_button", 128.0),
                    ]),
            ),
    )
}

fn hud_tree() -> UiElement {
    UiElement::new("screen", Rect::from_xywh(0.0, 0.0, 640.0, 384.0)).with_child(
        UiElement::new("hotbar", Rect::from_xywh(160.0, 320.0, 320.0, 48.0)),
    )
}

/// Read a pause-screen snapshot from a JSON file.
pub(crate) fn load_tree(path: &Path) -> Result<UiElement> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read UI tree {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid UI tree JSON in {}", path.display()))
}

pub(crate) struct SimHost {
    screen: &'static str,
    pause_tree: UiElement,
    hud_tree: UiElement,
    cursor: Vec2,
}

impl SimHost {
    pub(crate) fn new(pause_tree: UiElement) -> Self {
        Self {
            screen: PAUSE_SCREEN,
            pause_tree,
            hud_tree: hud_tree(),
            cursor: Vec2::default(),
        }
    }

    pub(crate) fn set_cursor(&mut self, cursor: Vec2) {
        self.cursor = cursor;
    }

    /// Esc: open or close the pause screen. Does nothing once disconnected.
    pub(crate) fn toggle_pause(&mut self) {
        self.screen = match self.screen {
            PAUSE_SCREEN => HUD_SCREEN,
            HUD_SCREEN => PAUSE_SCREEN,
            other => other,
        };
    }

    pub(crate) fn disconnect(&mut self) {
        self.screen = START_SCREEN;
    }

    pub(crate) fn is_disconnected(&self) -> bool {
        self.screen == START_SCREEN
    }

    /// The game's own hit test for its quit control.
    pub(crate) fn quit_control_hit<'a>(&self, aliases: impl IntoIterator<Item = &'a str>) -> bool {
        if self.screen != PAUSE_SCREEN {
            return false;
        }
        let root = &self.pause_tree;
        locate(Some(root), aliases)
            .and_then(|found| absolute_rect(root, &found.path).ok())
            .is_some_and(|rect| rect.contains(self.cursor))
    }
}

impl GameUi for SimHost {
    fn screen_name(&self) -> &str {
        self.screen
    }

    fn root(&self) -> Option<&UiElement> {
        match self.screen {
            PAUSE_SCREEN => Some(&self.pause_tree),
            HUD_SCREEN => Some(&self.hud_tree),
            _ => None,
        }
    }

    fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disconnect_guard::locator::QUIT_BUTTON_ALIASES;

    const SCALE: CellScale = CellScale {
        width: 8.0,
        height: 16.0,
    };

    #[test]
    fn cell_centres_map_to_ui_units() {
        assert_eq!(SCALE.to_ui(0, 0), Vec2::new(4.0, 8.0));
        assert_eq!(SCALE.to_ui(30, 15), Vec2::new(244.0, 248.0));
    }

    #[test]
    fn rects_cover_partial_cells_and_clip() {
        let bounds = CellRect::new(0, 0, 80, 24);
        let area = SCALE.to_cells(Rect::new(4.0, 4.0, 20.0, 20.0), bounds).unwrap();
        assert_eq!(area, CellRect::new(0, 0, 3, 2));

        let clipped = SCALE
            .to_cells(Rect::new(600.0, 300.0, 1000.0, 1000.0), bounds)
            .unwrap();
        assert_eq!(clipped, CellRect::new(75, 18, 5, 6));

        assert!(SCALE.to_cells(Rect::new(900.0, 0.0, 950.0, 10.0), bounds).is_none());
    }

    #[test]
    fn quit_control_hit_uses_absolute_bounds() {
        let mut host = SimHost::new(sample_pause_tree());
        host.set_cursor(Vec2::new(300.0, 240.0));
        assert!(host.quit_control_hit(QUIT_BUTTON_ALIASES));
        host.set_cursor(Vec2::new(300.0, 120.0));
        assert!(!host.quit_control_hit(QUIT_BUTTON_ALIASES));
    }

    #[test]
    fn screens_cycle_until_disconnect() {
        let mut host = SimHost::new(sample_pause_tree());
        assert_eq!(host.screen_name(), PAUSE_SCREEN);
        host.toggle_pause();
        assert_eq!(host.screen_name(), HUD_SCREEN);
        host.toggle_pause();
        host.disconnect();
        host.toggle_pause();
        assert!(host.is_disconnected());
        assert!(host.root().is_none());
    }
}

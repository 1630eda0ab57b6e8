//! Confirmation tooltip drawing.
//!
//! Purely cosmetic: reads the cursor and the armed flag, never changes state.

use crate::ui_tree::{Rect, Vec2};

/// Nine-slice texture used for the tooltip background.
pub const TOOLTIP_BORDER_TEXTURE: &str = "textures/ui/purpleBorder";

/// Tooltip anchor relative to the cursor.
pub const TOOLTIP_CURSOR_OFFSET: Vec2 = Vec2::new(14.0, -6.0);

/// Space between the text and the panel edge.
pub const TOOLTIP_PADDING: f32 = 4.0;

const TEXT_NUDGE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// The game's pixel font.
    Game,
    /// Whatever font the player picked.
    UserPreference,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_opacity(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Drawing context handed to the render callback by the host.
pub trait Renderer {
    fn set_font(&mut self, font: FontKind);
    fn measure_text(&self, text: &str) -> Vec2;
    fn draw_text(&mut self, pos: Vec2, color: Color, text: &str);
    fn draw_nine_slice(&mut self, texture: &str, rect: Rect, opacity: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Panel bounds for a tooltip of `text_size` anchored at the cursor.
pub fn tooltip_panel(cursor: Vec2, text_size: Vec2) -> Rect {
    let anchor = tooltip_anchor(cursor);
    Rect::new(
        anchor.x - TOOLTIP_PADDING,
        anchor.y - TOOLTIP_PADDING,
        anchor.x + text_size.x + TOOLTIP_PADDING,
        anchor.y + text_size.y + TOOLTIP_PADDING - TEXT_NUDGE,
    )
}

fn tooltip_anchor(cursor: Vec2) -> Vec2 {
    Vec2::new(
        cursor.x + TOOLTIP_CURSOR_OFFSET.x,
        cursor.y + TOOLTIP_CURSOR_OFFSET.y,
    )
}

/// Draw the "click again" tooltip next to the cursor.
pub fn draw_confirm_tooltip<R: Renderer + ?Sized>(gfx: &mut R, cursor: Vec2, text: &str) {
    gfx.set_font(FontKind::Game);
    let text_size = gfx.measure_text(text);
    gfx.draw_nine_slice(TOOLTIP_BORDER_TEXTURE, tooltip_panel(cursor, text_size), 1.0);
    let anchor = tooltip_anchor(cursor);
    let text_pos = Vec2::new(anchor.x + TEXT_NUDGE, anchor.y + TEXT_NUDGE);
    gfx.draw_text(text_pos, Color::WHITE, text);
    gfx.set_font(FontKind::UserPreference);
}

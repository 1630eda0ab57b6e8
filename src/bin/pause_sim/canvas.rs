//! Terminal implementation of the guard's drawing context.
//!
//! Draw calls are recorded during the guard's render callback and painted on
//! top of the scene afterwards, so the tooltip always ends up in front.

use crate::scene::CellScale;
use disconnect_guard::render::{Color, FontKind, Renderer};
use disconnect_guard::{Rect, UiElement, Vec2};
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq)]
enum Overlay {
    Panel(Rect),
    Fill(Rect, Color),
    Text(Vec2, Color, FontKind, String),
}

pub(crate) struct TerminalCanvas {
    scale: CellScale,
    font: FontKind,
    overlays: Vec<Overlay>,
}

impl TerminalCanvas {
    pub(crate) fn new(scale: CellScale) -> Self {
        Self {
            scale,
            font: FontKind::UserPreference,
            overlays: Vec::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.overlays.clear();
    }

    /// Paint the recorded overlays inside `bounds`.
    pub(crate) fn paint(&self, frame: &mut Frame, bounds: CellRect) {
        for overlay in &self.overlays {
            match overlay {
                Overlay::Panel(rect) => {
                    if let Some(area) = self.scale.to_cells(*rect, bounds) {
                        frame.render_widget(Clear, area);
                        frame.render_widget(
                            Block::default().style(Style::default().bg(TermColor::Magenta)),
                            area,
                        );
                    }
                }
                Overlay::Fill(rect, color) => {
                    if let Some(area) = self.scale.to_cells(*rect, bounds) {
                        frame.render_widget(
                            Block::default().style(Style::default().bg(term_color(*color))),
                            area,
                        );
                    }
                }
                Overlay::Text(pos, color, font, text) => {
                    let size = self.measure_text(text);
                    let rect = Rect::from_xywh(pos.x, pos.y, size.x, size.y);
                    if let Some(area) = self.scale.to_cells(rect, bounds) {
                        frame.render_widget(
                            Paragraph::new(text.as_str()).style(text_style(*color, *font)),
                            area,
                        );
                    }
                }
            }
        }
    }
}

/// The game font has no terminal counterpart; bold stands in for it.
fn text_style(color: Color, font: FontKind) -> Style {
    let style = Style::default().fg(term_color(color)).bg(TermColor::Magenta);
    match font {
        FontKind::Game => style.add_modifier(Modifier::BOLD),
        FontKind::UserPreference => style,
    }
}

fn term_color(color: Color) -> TermColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    TermColor::Rgb(channel(color.r), channel(color.g), channel(color.b))
}

impl Renderer for TerminalCanvas {
    fn set_font(&mut self, font: FontKind) {
        self.font = font;
    }

    fn measure_text(&self, text: &str) -> Vec2 {
        // Terminal glyphs are one cell each whatever font the game would use.
        let columns = UnicodeWidthStr::width(text) as f32;
        Vec2::new(columns * self.scale.width, self.scale.height)
    }

    fn draw_text(&mut self, pos: Vec2, color: Color, text: &str) {
        self.overlays
            .push(Overlay::Text(pos, color, self.font, text.to_string()));
    }

    fn draw_nine_slice(&mut self, _texture: &str, rect: Rect, _opacity: f32) {
        self.overlays.push(Overlay::Panel(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.overlays.push(Overlay::Fill(rect, color));
    }
}

/// Draw every element below the root as a titled box.
pub(crate) fn paint_tree(frame: &mut Frame, root: &UiElement, scale: CellScale, bounds: CellRect) {
    for child in &root.children {
        paint_element(frame, child, root.rect.origin(), scale, bounds);
    }
}

fn paint_element(
    frame: &mut Frame,
    element: &UiElement,
    parent_origin: Vec2,
    scale: CellScale,
    bounds: CellRect,
) {
    let origin = Vec2::new(
        parent_origin.x + element.rect.left,
        parent_origin.y + element.rect.top,
    );
    let absolute = Rect::from_xywh(origin.x, origin.y, element.rect.width(), element.rect.height());
    if let Some(area) = scale.to_cells(absolute, bounds) {
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(element.name.as_str()),
            area,
        );
    }
    for child in &element.children {
        paint_element(frame, child, origin, scale, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disconnect_guard::render::{draw_confirm_tooltip, TOOLTIP_PADDING};

    #[test]
    fn measures_in_cells() {
        let canvas = TerminalCanvas::new(CellScale {
            width: 8.0,
            height: 16.0,
        });
        assert_eq!(canvas.measure_text("abc"), Vec2::new(24.0, 16.0));
    }

    #[test]
    fn tooltip_records_panel_then_text() {
        let mut canvas = TerminalCanvas::new(CellScale {
            width: 8.0,
            height: 16.0,
        });
        draw_confirm_tooltip(&mut canvas, Vec2::new(100.0, 100.0), "ok");
        assert_eq!(canvas.overlays.len(), 2);
        match &canvas.overlays[0] {
            Overlay::Panel(rect) => assert_eq!(rect.left, 114.0 - TOOLTIP_PADDING),
            other => panic!("expected panel first, got {other:?}"),
        }
        assert!(matches!(
            &canvas.overlays[1],
            Overlay::Text(_, _, FontKind::Game, text) if text == "ok"
        ));
        assert_eq!(canvas.font, FontKind::UserPreference);

        canvas.clear();
        assert!(canvas.overlays.is_empty());
    }

    #[test]
    fn game_font_text_paints_bold() {
        let white = Color::WHITE;
        assert!(text_style(white, FontKind::Game)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(!text_style(white, FontKind::UserPreference)
            .add_modifier
            .contains(Modifier::BOLD));
    }
}

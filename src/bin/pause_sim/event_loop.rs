use anyhow::{Context, Result};
use crossbeam_channel::{select, tick, Receiver};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use disconnect_guard::{
    DisconnectGuard, FrameInfo, GameUi, InputDecision, InputKey, RawInputEvent,
};
use ratatui::backend::Backend;
use ratatui::layout::Rect as CellRect;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::canvas::{paint_tree, TerminalCanvas};
use crate::input::{key_code, mouse_key};
use crate::scene::{CellScale, SimHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Host state plus the guard it drives.
pub(crate) struct SimSession {
    host: SimHost,
    guard: DisconnectGuard,
    scale: CellScale,
    last_decision: Option<InputDecision>,
}

impl SimSession {
    pub(crate) fn new(host: SimHost, guard: DisconnectGuard, scale: CellScale) -> Self {
        Self {
            host,
            guard,
            scale,
            last_decision: None,
        }
    }

    pub(crate) fn handle_event(&mut self, event: Event, now: Instant) -> Flow {
        match event {
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, now);
                Flow::Continue
            }
            Event::Key(key) => self.handle_key(key, now),
            _ => Flow::Continue,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        self.host.set_cursor(self.scale.to_ui(mouse.column, mouse.row));
        let (button, is_down) = match mouse.kind {
            MouseEventKind::Down(button) => (button, true),
            MouseEventKind::Up(button) => (button, false),
            _ => return,
        };
        let raw = RawInputEvent::new(mouse_key(button), is_down, now);
        let decision = self.guard.decide(&self.host, &raw);
        if is_down {
            debug!(
                screen = self.host.screen_name(),
                ?button,
                ?decision,
                guard = ?self.guard.state(),
                "mouse press"
            );
            self.last_decision = Some(decision);
        }
        if decision.is_consumed() || !raw.is_left_press() {
            return;
        }
        if self.host.quit_control_hit(self.guard.config().aliases()) {
            info!(screen = self.host.screen_name(), "quit control activated; disconnecting");
            self.host.disconnect();
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        let raw = RawInputEvent::new(InputKey::Key(key_code(key.code)), true, now);
        if self.guard.on_input(&self.host, &raw) {
            return Flow::Continue;
        }
        match key.code {
            KeyCode::Char('q') => Flow::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Flow::Exit,
            KeyCode::Esc => {
                self.host.toggle_pause();
                debug!(screen = self.host.screen_name(), "screen switched");
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn status_text(&self) -> String {
        if self.host.is_disconnected() {
            return "Disconnected. Press q to exit.".to_string();
        }
        let last = match self.last_decision {
            Some(InputDecision::Consumed) => "consumed".to_string(),
            Some(InputDecision::PassThrough(reason)) => format!("passed ({reason:?})"),
            None => "-".to_string(),
        };
        format!(
            " {} | guard: {:?} | last click: {last} | Esc: pause  q: quit",
            self.host.screen_name(),
            self.guard.state()
        )
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame, canvas: &mut TerminalCanvas, delta: f32) {
        let area = frame.size();
        let scene = CellRect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        let status = CellRect::new(area.x, scene.bottom(), area.width, area.height - scene.height);

        if let Some(root) = self.host.root() {
            paint_tree(frame, root, self.scale, scene);
        }

        canvas.clear();
        let info = FrameInfo {
            delta,
            screen_name: self.host.screen_name(),
            hud_hidden: false,
            client_ui: false,
        };
        self.guard.on_render(&self.host, canvas, &info);
        canvas.paint(frame, scene);

        frame.render_widget(Paragraph::new(self.status_text()), status);
    }
}

pub(crate) fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut SimSession,
    input_rx: Receiver<Event>,
    fps: u32,
) -> Result<()> {
    let mut canvas = TerminalCanvas::new(session.scale);
    let ticker = tick(Duration::from_secs(1) / fps.max(1));
    let mut last_frame = Instant::now();

    loop {
        select! {
            recv(input_rx) -> event => match event {
                Ok(event) => {
                    if session.handle_event(event, Instant::now()) == Flow::Exit {
                        break;
                    }
                }
                Err(_) => {
                    debug!("input channel closed");
                    break;
                }
            },
            recv(ticker) -> _ => {
                let now = Instant::now();
                let delta = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;
                terminal
                    .draw(|frame| session.draw(frame, &mut canvas, delta))
                    .context("failed to draw frame")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::sample_pause_tree;
    use crossterm::event::MouseButton;
    use disconnect_guard::{ConfirmationState, PassReason};

    const SCALE: CellScale = CellScale {
        width: 8.0,
        height: 16.0,
    };
    const MS: Duration = Duration::from_millis(1);

    fn session() -> SimSession {
        SimSession::new(
            SimHost::new(sample_pause_tree()),
            DisconnectGuard::default(),
            SCALE,
        )
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn render(session: &mut SimSession) {
        let mut canvas = TerminalCanvas::new(SCALE);
        let backend = ratatui::backend::TestBackend::new(80, 25);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| session.draw(frame, &mut canvas, 0.016))
            .unwrap();
    }

    #[test]
    fn two_clicks_on_quit_disconnect() {
        let mut session = session();
        let t0 = Instant::now();
        render(&mut session);

        let down = MouseEventKind::Down(MouseButton::Left);
        let up = MouseEventKind::Up(MouseButton::Left);
        session.handle_event(mouse(down, 30, 14), t0);
        assert_eq!(session.last_decision, Some(InputDecision::Consumed));
        assert!(!session.host.is_disconnected());
        session.handle_event(mouse(up, 30, 14), t0 + 40 * MS);

        render(&mut session);
        assert_eq!(session.guard.state(), ConfirmationState::Armed);

        session.handle_event(mouse(down, 30, 14), t0 + 200 * MS);
        assert_eq!(
            session.last_decision,
            Some(InputDecision::PassThrough(PassReason::Confirmed))
        );
        assert!(session.host.is_disconnected());
    }

    #[test]
    fn moving_away_disarms_on_next_frame() {
        let mut session = session();
        render(&mut session);
        session.handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 30, 14),
            Instant::now(),
        );
        session.handle_event(mouse(MouseEventKind::Moved, 2, 2), Instant::now());
        render(&mut session);
        assert_eq!(session.guard.state(), ConfirmationState::Idle);
    }

    #[test]
    fn escape_closes_pause_screen_and_q_exits() {
        let mut session = session();
        let t0 = Instant::now();
        render(&mut session);
        session.handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 30, 14),
            t0,
        );
        assert_eq!(session.handle_event(key(KeyCode::Esc), t0 + 20 * MS), Flow::Continue);
        render(&mut session);
        assert_eq!(session.host.screen_name(), crate::scene::HUD_SCREEN);
        assert_eq!(session.guard.state(), ConfirmationState::Idle);
        assert!(session.guard.target().is_none());

        assert_eq!(session.handle_event(key(KeyCode::Char('q')), t0 + 40 * MS), Flow::Exit);
    }

    #[test]
    fn status_line_reports_guard_state() {
        let mut session = session();
        render(&mut session);
        assert!(session.status_text().contains("Idle"));
        session.handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 30, 14),
            Instant::now(),
        );
        assert!(session.status_text().contains("Armed"));
        assert!(session.status_text().contains("consumed"));
    }
}

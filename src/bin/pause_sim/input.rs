use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, MouseButton};
use disconnect_guard::InputKey;
use std::thread;
use tracing::warn;

pub(crate) fn spawn_input_thread(tx: Sender<Event>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "terminal event read failed; input thread stopping");
                return;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    })
}

pub(crate) fn mouse_key(button: MouseButton) -> InputKey {
    match button {
        MouseButton::Left => InputKey::LeftMouse,
        MouseButton::Right => InputKey::RightMouse,
        MouseButton::Middle => InputKey::MiddleMouse,
    }
}

/// Host key code for a terminal key, in the spirit of virtual-key codes.
pub(crate) fn key_code(code: KeyCode) -> u32 {
    match code {
        KeyCode::Char(c) => u32::from(c),
        KeyCode::Esc => 27,
        KeyCode::Enter => 13,
        KeyCode::Tab => 9,
        KeyCode::Backspace => 8,
        _ => 0,
    }
}

//! Terminal ownership for the simulator.
//!
//! Raw mode, the alternate screen and mouse capture are switched on together
//! and undone together: on drop, on a failed setup, and from the panic hook.

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing::error;

pub(crate) type SimBackend = CrosstermBackend<Stdout>;

static TERMINAL_TAKEN: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// The terminal while the simulator runs; dropping it hands the terminal back.
pub(crate) struct SimTerminal {
    terminal: Terminal<SimBackend>,
}

impl SimTerminal {
    pub(crate) fn enter() -> Result<Self> {
        install_panic_hook();
        let entered = take_terminal();
        if entered.is_err() {
            release_terminal();
        }
        entered.map(|terminal| Self { terminal })
    }

    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<SimBackend> {
        &mut self.terminal
    }
}

impl Drop for SimTerminal {
    fn drop(&mut self) {
        release_terminal();
    }
}

fn take_terminal() -> Result<Terminal<SimBackend>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    TERMINAL_TAKEN.store(true, Ordering::SeqCst);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
        .context("failed to switch to the alternate screen with mouse capture")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to set up the terminal backend")
}

/// Undo everything `take_terminal` did. Safe to call more than once.
fn release_terminal() {
    if !TERMINAL_TAKEN.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = stdout.flush();
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            release_terminal();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!(%location, "pause-sim panicked");
            previous(info);
        }));
    });
}

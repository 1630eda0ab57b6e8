//! Terminal host for the disconnect guard.
//!
//! Plays the part of the game: it owns a pause-screen UI tree, turns terminal
//! mouse reports into raw input events, and calls the guard's render and input
//! callbacks the way the game's plugin runtime would.
//!
//! # Architecture
//!
//! - Input thread: blocks on terminal events and forwards them over a channel
//! - Main loop: feeds input to the guard and redraws on a fixed frame tick

mod canvas;
mod config;
mod event_loop;
mod input;
mod logging;
mod scene;
mod terminal;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;
use disconnect_guard::locator::locate;
use disconnect_guard::resolver::absolute_rect;
use disconnect_guard::ui_tree::outline;
use disconnect_guard::{DisconnectGuard, GameUi, GuardConfig, UiElement};
use tracing::info;

use crate::config::SimConfig;
use crate::event_loop::{run_event_loop, SimSession};
use crate::input::spawn_input_thread;
use crate::logging::init_logging;
use crate::scene::{load_tree, sample_pause_tree, CellScale, SimHost};
use crate::terminal::SimTerminal;

/// Max pending terminal events before the input thread blocks.
const INPUT_CHANNEL_CAPACITY: usize = 256;

fn main() -> Result<()> {
    let config = SimConfig::parse();
    config.validate()?;

    let guard_config = match &config.config {
        Some(path) => GuardConfig::load(path)?,
        None => GuardConfig::default(),
    };
    let tree = match &config.tree {
        Some(path) => load_tree(path)?,
        None => sample_pause_tree(),
    };

    if config.dump_tree {
        print!("{}", outline(&tree));
        return Ok(());
    }
    if config.locate {
        print_located(&tree, &guard_config);
        return Ok(());
    }

    let trace_log = init_logging(&config)?;
    let host = SimHost::new(tree);
    info!(
        trace_log = ?trace_log,
        screen = host.screen_name(),
        guard_enabled = guard_config.enabled,
        "pause-sim started"
    );

    let scale = CellScale {
        width: config.cell_width,
        height: config.cell_height,
    };
    let mut session = SimSession::new(host, DisconnectGuard::new(guard_config), scale);

    let mut sim_terminal = SimTerminal::enter()?;
    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    let _input_thread = spawn_input_thread(input_tx);

    let result = run_event_loop(sim_terminal.terminal_mut(), &mut session, input_rx, config.fps);
    drop(sim_terminal);
    info!(ok = result.is_ok(), "pause-sim exited");
    result
}

fn print_located(tree: &UiElement, guard_config: &GuardConfig) {
    let found = locate(Some(tree), guard_config.aliases());
    match found.and_then(|found| absolute_rect(tree, &found.path).ok().map(|rect| (found, rect))) {
        Some((found, rect)) => println!(
            "{} at {rect} (path {:?})",
            found.name,
            found.path.indices()
        ),
        None => println!("no quit control found"),
    }
}

//! Command-line options for the simulator.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

const DEFAULT_CELL_WIDTH: f32 = 8.0;
const DEFAULT_CELL_HEIGHT: f32 = 16.0;
const DEFAULT_FPS: u32 = 30;

/// Terminal stand-in for the game: shows a pause screen and routes mouse
/// input through the disconnect guard.
#[derive(Debug, Parser, Clone)]
#[command(name = "pause-sim", about = "Pause screen simulator for disconnect-guard", author, version)]
pub(crate) struct SimConfig {
    /// Guard settings file (JSON)
    #[arg(long, env = "DISCONNECT_GUARD_CONFIG", value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// UI tree snapshot (JSON) shown as the pause screen
    #[arg(long, value_name = "PATH")]
    pub(crate) tree: Option<PathBuf>,

    /// Print the pause screen's element outline and exit
    #[arg(long = "dump-tree", default_value_t = false)]
    pub(crate) dump_tree: bool,

    /// Print the quit control the guard would track and exit
    #[arg(long, default_value_t = false)]
    pub(crate) locate: bool,

    /// UI units per terminal column
    #[arg(long = "cell-width", default_value_t = DEFAULT_CELL_WIDTH)]
    pub(crate) cell_width: f32,

    /// UI units per terminal row
    #[arg(long = "cell-height", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub(crate) cell_height: f32,

    /// Render ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub(crate) fps: u32,

    /// Enable the JSON trace log
    #[arg(long = "logs", env = "DISCONNECT_GUARD_LOGS", default_value_t = false)]
    pub(crate) logs: bool,

    /// Disable the trace log (overrides --logs)
    #[arg(long = "no-logs", env = "DISCONNECT_GUARD_NO_LOGS", default_value_t = false)]
    pub(crate) no_logs: bool,

    /// Trace log destination (default: pause_sim_trace.jsonl in the temp dir)
    #[arg(long = "log-file", env = "DISCONNECT_GUARD_TRACE_LOG", value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,
}

impl SimConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        for (flag, value) in [
            ("--cell-width", self.cell_width),
            ("--cell-height", self.cell_height),
        ] {
            if !(1.0..=64.0).contains(&value) {
                bail!("{flag} must be between 1 and 64, got {value}");
            }
        }
        if !(1..=120).contains(&self.fps) {
            bail!("--fps must be between 1 and 120, got {}", self.fps);
        }
        Ok(())
    }

    pub(crate) fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}

//! Trace output for the simulator.
//!
//! The guard's own `tracing` events (arming, disarming, scan misses) and the
//! simulator's click and screen events share one JSONL file.

use anyhow::{Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::SimConfig;

pub(crate) fn trace_log_path(config: &SimConfig) -> PathBuf {
    config
        .log_file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("pause_sim_trace.jsonl"))
}

/// JSON lines with RFC 3339 UTC timestamps, debug level and up.
pub(crate) fn json_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .with_max_level(Level::DEBUG)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(make_writer)
        .with_current_span(false)
        .with_span_list(false)
        .finish()
}

/// Install the global subscriber when logging is on; returns the file it writes to.
pub(crate) fn init_logging(config: &SimConfig) -> Result<Option<PathBuf>> {
    if !config.logging_enabled() {
        return Ok(None);
    }
    let path = trace_log_path(config);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open trace log {}", path.display()))?;
    tracing::subscriber::set_global_default(json_subscriber(Mutex::new(file)))
        .context("tracing subscriber already installed")?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_loop::SimSession;
    use crate::scene::{sample_pause_tree, CellScale, SimHost};
    use clap::Parser;
    use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use disconnect_guard::{DisconnectGuard, RawInputEvent, Vec2};
    use std::io;
    use std::sync::Arc;
    use std::time::Instant;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn trace_path_prefers_flag() {
        let cfg = SimConfig::parse_from(["pause-sim", "--log-file", "/tmp/custom.jsonl"]);
        assert_eq!(trace_log_path(&cfg), PathBuf::from("/tmp/custom.jsonl"));
    }

    #[test]
    fn disabled_logging_installs_nothing() {
        let cfg = SimConfig::parse_from(["pause-sim", "--logs", "--no-logs"]);
        assert_eq!(init_logging(&cfg).unwrap(), None);
    }

    #[test]
    fn guard_transitions_reach_the_json_output() {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = json_subscriber(move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut host = SimHost::new(sample_pause_tree());
            host.set_cursor(Vec2::new(300.0, 240.0));
            let mut guard = DisconnectGuard::default();
            guard.on_frame(&host);
            assert!(guard.on_input(&host, &RawInputEvent::left_down(Instant::now())));
        });

        let out = buf.contents();
        let line = out
            .lines()
            .find(|line| line.contains("quit control armed"))
            .unwrap_or_else(|| panic!("no arming event in {out}"));
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["level"], "DEBUG");
        assert_eq!(event["fields"]["x"], 300.0);
        assert!(event["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));
    }

    #[test]
    fn mouse_presses_carry_screen_and_decision() {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = json_subscriber(move || sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            let mut session = SimSession::new(
                SimHost::new(sample_pause_tree()),
                DisconnectGuard::default(),
                CellScale {
                    width: 8.0,
                    height: 16.0,
                },
            );
            let press = Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            });
            session.handle_event(press, Instant::now());
        });

        let out = buf.contents();
        let line = out
            .lines()
            .find(|line| line.contains("mouse press"))
            .unwrap_or_else(|| panic!("no press event in {out}"));
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["fields"]["screen"], "pause_screen");
        assert!(event["fields"]["decision"]
            .as_str()
            .is_some_and(|decision| decision.starts_with("PassThrough")));
    }
}

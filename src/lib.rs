//! Two-click confirmation for the pause screen's quit control.
//!
//! The host game hands the guard its UI tree, cursor, screen name and raw
//! input; the guard decides which clicks to swallow and draws a tooltip while a
//! confirmation is pending. See [`confirm`] for the state machine.

pub mod config;
pub mod confirm;
pub mod host;
pub mod locator;
pub mod render;
pub mod resolver;
pub mod ui_tree;

pub use config::GuardConfig;
pub use confirm::{ConfirmationState, DisconnectGuard, InputDecision, PassReason};
pub use host::{FrameInfo, GameUi, InputKey, RawInputEvent};
pub use resolver::{Miss, ResolvedTarget};
pub use ui_tree::{ElementPath, Rect, UiElement, Vec2};

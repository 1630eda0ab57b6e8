//! Two-click confirmation for the quit control.
//!
//! Two host callbacks drive [`DisconnectGuard`]:
//!
//! - [`DisconnectGuard::on_frame`] (via [`DisconnectGuard::on_render`]) re-scans
//!   the screen every frame, drops everything when the pause screen closes and
//!   disarms when the cursor leaves the quit control.
//! - [`DisconnectGuard::on_input`] sees every raw input event. The first press on
//!   the quit control arms the guard and is swallowed; the next one passes
//!   through to the game, which then disconnects.
//!
//! Neither callback assumes anything about how often or in which order the
//! other runs. When no quit control can be found the guard stays out of the
//! way and clicks pass through unconfirmed.

mod debounce;

pub(crate) use debounce::{Debounce, GapRule};

use crate::config::{GuardConfig, CLICK_REENTRY_GUARD, GLOBAL_INPUT_DEBOUNCE};
use crate::host::{FrameInfo, GameUi, RawInputEvent};
use crate::locator;
use crate::render::{draw_confirm_tooltip, Color, Renderer};
use crate::resolver::{self, Miss, ResolvedTarget};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    /// No confirming click pending.
    #[default]
    Idle,
    /// First click swallowed; the next click on the control goes through.
    Armed,
}

/// What the host should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDecision {
    /// Swallow the event; the quit control must not see it.
    Consumed,
    PassThrough(PassReason),
}

impl InputDecision {
    pub fn is_consumed(self) -> bool {
        matches!(self, InputDecision::Consumed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// Inside the global input debounce window.
    Debounced,
    /// Not a left-button press.
    NotAClick,
    /// Guard disabled, wrong screen, or no quit control this frame.
    Inactive,
    /// The remembered target no longer matches the current tree.
    Unresolved(Miss),
    /// Duplicate press on the control inside the re-entrancy window.
    Reentrant,
    /// Press landed away from the quit control.
    OutsideTarget,
    /// Second press while armed: let the game disconnect.
    Confirmed,
}

pub struct DisconnectGuard {
    config: GuardConfig,
    state: ConfirmationState,
    target: Option<ResolvedTarget>,
    input_gate: Debounce,
    click_gate: Debounce,
}

impl DisconnectGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            state: ConfirmationState::Idle,
            target: None,
            input_gate: Debounce::new(GLOBAL_INPUT_DEBOUNCE, GapRule::AtLeast),
            click_gate: Debounce::new(CLICK_REENTRY_GUARD, GapRule::Beyond),
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ConfirmationState::Armed
    }

    /// Quit control resolved by the most recent frame scan.
    pub fn target(&self) -> Option<&ResolvedTarget> {
        self.target.as_ref()
    }

    /// Swap settings; an armed confirmation is dropped.
    pub fn set_config(&mut self, config: GuardConfig) {
        self.config = config;
        self.reset();
    }

    fn reset(&mut self) {
        if self.is_armed() {
            debug!("confirmation cancelled");
        }
        self.state = ConfirmationState::Idle;
        self.target = None;
    }

    fn disarm(&mut self) {
        if self.is_armed() {
            debug!("cursor left quit control; disarmed");
            self.state = ConfirmationState::Idle;
        }
    }

    fn on_pause_screen(&self, ui: &impl GameUi) -> bool {
        self.config.enabled && ui.screen_name() == self.config.pause_screen
    }

    /// Per-frame re-scan of the screen and the quit control.
    pub fn on_frame(&mut self, ui: &impl GameUi) {
        if !self.on_pause_screen(ui) {
            self.reset();
            return;
        }

        self.target = self.scan(ui);
        let Some(target) = &self.target else {
            return;
        };
        if !target.rect.contains(ui.cursor()) {
            self.disarm();
        }
    }

    fn scan(&self, ui: &impl GameUi) -> Option<ResolvedTarget> {
        let root = ui.root()?;
        let Some(found) = locator::locate(Some(root), self.config.aliases()) else {
            trace!(screen = ui.screen_name(), "no quit control on screen");
            return None;
        };
        match resolver::resolve(root, &found.path, &found.name) {
            Ok(target) => Some(target),
            Err(miss) => {
                trace!(?miss, name = %found.name, "quit control not resolvable");
                None
            }
        }
    }

    /// Input callback; `true` tells the host to swallow the event.
    pub fn on_input(&mut self, ui: &impl GameUi, event: &RawInputEvent) -> bool {
        self.decide(ui, event).is_consumed()
    }

    /// Same as [`Self::on_input`], with the reason an event was let through.
    pub fn decide(&mut self, ui: &impl GameUi, event: &RawInputEvent) -> InputDecision {
        if !self.input_gate.try_accept(event.timestamp) {
            return InputDecision::PassThrough(PassReason::Debounced);
        }
        if !event.is_left_press() {
            return InputDecision::PassThrough(PassReason::NotAClick);
        }
        if !self.on_pause_screen(ui) {
            return InputDecision::PassThrough(PassReason::Inactive);
        }
        let Some(known) = &self.target else {
            return InputDecision::PassThrough(PassReason::Inactive);
        };

        // The tree may have been rebuilt since the last frame.
        let refreshed = match ui.root() {
            Some(root) => resolver::resolve(root, &known.path, &known.name),
            None => Err(Miss::NotFound),
        };
        let target = match refreshed {
            Ok(target) => target,
            Err(miss) => {
                debug!(?miss, "quit control vanished before click");
                self.target = None;
                return InputDecision::PassThrough(PassReason::Unresolved(miss));
            }
        };

        let cursor = ui.cursor();
        let inside = target.rect.contains(cursor);
        self.target = Some(target);
        if !inside {
            self.disarm();
            return InputDecision::PassThrough(PassReason::OutsideTarget);
        }
        if !self.click_gate.try_accept(event.timestamp) {
            trace!("duplicate press on quit control ignored");
            return InputDecision::PassThrough(PassReason::Reentrant);
        }

        match self.state {
            ConfirmationState::Idle => {
                debug!(x = cursor.x, y = cursor.y, "quit control armed");
                self.state = ConfirmationState::Armed;
                InputDecision::Consumed
            }
            ConfirmationState::Armed => {
                debug!("disconnect confirmed");
                InputDecision::PassThrough(PassReason::Confirmed)
            }
        }
    }

    /// Render callback: re-scan, then draw the tooltip while armed.
    pub fn on_render<R: Renderer + ?Sized>(
        &mut self,
        ui: &impl GameUi,
        gfx: &mut R,
        _frame: &FrameInfo<'_>,
    ) {
        self.on_frame(ui);
        if self.config.highlight_target {
            if let Some(target) = &self.target {
                gfx.fill_rect(target.rect, Color::RED.with_opacity(0.5));
            }
        }
        if self.is_armed() {
            draw_confirm_tooltip(gfx, ui.cursor(), &self.config.tooltip_text);
        }
    }
}

impl Default for DisconnectGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

use std::time::Duration;

pub const DEFAULT_PAUSE_SCREEN: &str = "pause_screen";
pub const DEFAULT_TOOLTIP_TEXT: &str = "Click Again To Confirm Disconnect";

/// Minimum gap between two accepted input events of any kind.
pub const GLOBAL_INPUT_DEBOUNCE: Duration = Duration::from_millis(5);
/// A click on the target must come strictly later than this after the previous one.
pub const CLICK_REENTRY_GUARD: Duration = Duration::from_millis(1);

pub const MAX_EXTRA_ALIASES: usize = 16;
pub const MAX_TOOLTIP_CHARS: usize = 96;

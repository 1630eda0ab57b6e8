//! Guard settings loaded from the plugin's JSON config file.

mod defaults;
mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use defaults::{
    CLICK_REENTRY_GUARD, DEFAULT_PAUSE_SCREEN, DEFAULT_TOOLTIP_TEXT, GLOBAL_INPUT_DEBOUNCE,
    MAX_EXTRA_ALIASES, MAX_TOOLTIP_CHARS,
};

use crate::locator::QUIT_BUTTON_ALIASES;

/// User-facing settings. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// When false the guard never arms and every click passes through.
    pub enabled: bool,
    /// Screen on which the quit control is guarded.
    pub pause_screen: String,
    /// Pack-specific quit-control names, tried after the built-in ones.
    pub extra_aliases: Vec<String>,
    /// Text of the "click again" tooltip.
    pub tooltip_text: String,
    /// Fill the resolved target rectangle each frame (debug aid).
    pub highlight_target: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pause_screen: DEFAULT_PAUSE_SCREEN.to_string(),
            extra_aliases: Vec::new(),
            tooltip_text: DEFAULT_TOOLTIP_TEXT.to_string(),
            highlight_target: false,
        }
    }
}

impl GuardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid guard config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in config {}", path.display()))
    }

    /// Quit-control names in lookup order: built-ins first, then extras.
    pub fn aliases(&self) -> impl Iterator<Item = &str> + '_ {
        QUIT_BUTTON_ALIASES
            .iter()
            .copied()
            .chain(self.extra_aliases.iter().map(String::as_str))
    }
}

use super::defaults::{MAX_EXTRA_ALIASES, MAX_TOOLTIP_CHARS};
use super::GuardConfig;
use crate::locator::QUIT_BUTTON_ALIASES;
use anyhow::{bail, Result};
use std::collections::HashSet;

impl GuardConfig {
    /// Reject values that would make the guard silently useless.
    pub fn validate(&self) -> Result<()> {
        if self.pause_screen.trim().is_empty() {
            bail!("pause_screen must not be empty");
        }
        if self.pause_screen.chars().any(char::is_whitespace) {
            bail!(
                "pause_screen must not contain whitespace, got {:?}",
                self.pause_screen
            );
        }

        let tooltip_chars = self.tooltip_text.chars().count();
        if self.tooltip_text.trim().is_empty() {
            bail!("tooltip_text must not be empty");
        }
        if tooltip_chars > MAX_TOOLTIP_CHARS {
            bail!("tooltip_text must be at most {MAX_TOOLTIP_CHARS} characters, got {tooltip_chars}");
        }
        if self.tooltip_text.chars().any(char::is_control) {
            bail!("tooltip_text must not contain control characters");
        }

        if self.extra_aliases.len() > MAX_EXTRA_ALIASES {
            bail!(
                "extra_aliases accepts at most {MAX_EXTRA_ALIASES} names, got {}",
                self.extra_aliases.len()
            );
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for alias in &self.extra_aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                bail!("extra_aliases entries must be non-empty names without whitespace, got {alias:?}");
            }
            if QUIT_BUTTON_ALIASES.contains(&alias.as_str()) {
                bail!("extra_aliases entry {alias:?} is already a built-in alias");
            }
            if !seen.insert(alias.as_str()) {
                bail!("extra_aliases entry {alias:?} is listed twice");
            }
        }
        Ok(())
    }
}

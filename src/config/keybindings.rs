//! Keybinding configuration for the storefront.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub scroll_top: Vec<String>,
    pub refresh: Vec<String>,
    pub toggle_layout: Vec<String>,
    pub next_tab: Vec<String>,
    pub prev_tab: Vec<String>,
    pub search: Vec<String>,
    pub collection_filter: Vec<String>,
    pub sort_filter: Vec<String>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: vec!["q".to_string(), "Ctrl+c".to_string()],
            scroll_up: vec!["k".to_string(), "Up".to_string()],
            scroll_down: vec!["j".to_string(), "Down".to_string()],
            page_up: vec!["PageUp".to_string()],
            page_down: vec!["PageDown".to_string(), "Space".to_string()],
            scroll_top: vec!["g".to_string(), "Home".to_string()],
            refresh: vec!["r".to_string(), "F5".to_string()],
            toggle_layout: vec!["v".to_string()],
            next_tab: vec!["Tab".to_string(), "l".to_string()],
            prev_tab: vec!["BackTab".to_string(), "Shift+Tab".to_string(), "h".to_string()],
            search: vec!["/".to_string()],
            collection_filter: vec!["c".to_string()],
            sort_filter: vec!["s".to_string()],
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        if self.matches_key(key, &self.quit) {
            Action::Quit
        } else if self.matches_key(key, &self.scroll_up) {
            Action::ScrollUp
        } else if self.matches_key(key, &self.scroll_down) {
            Action::ScrollDown
        } else if self.matches_key(key, &self.page_up) {
            Action::PageUp
        } else if self.matches_key(key, &self.page_down) {
            Action::PageDown
        } else if self.matches_key(key, &self.scroll_top) {
            Action::ScrollTop
        } else if self.matches_key(key, &self.refresh) {
            Action::Refresh
        } else if self.matches_key(key, &self.toggle_layout) {
            Action::ToggleLayout
        } else if self.matches_key(key, &self.next_tab) {
            Action::NextTab
        } else if self.matches_key(key, &self.prev_tab) {
            Action::PrevTab
        } else if self.matches_key(key, &self.search) {
            Action::Search
        } else if self.matches_key(key, &self.collection_filter) {
            Action::ToggleFilter(0)
        } else if self.matches_key(key, &self.sort_filter) {
            Action::ToggleFilter(1)
        } else {
            Action::None
        }
    }

    fn matches_key(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| {
            parse_key_string(binding)
                .map(|parsed| parsed.matches(key))
                .unwrap_or(false)
        })
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string such as `"j"`, `"PageDown"` or `"Ctrl+c"`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = match parts.split_last() {
        Some((last, mods)) if !mods.is_empty() => {
            for part in mods {
                match part.to_lowercase().as_str() {
                    "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    _ => return Err(format!("Unknown modifier: {}", part)),
                }
            }
            *last
        }
        _ => s,
    };

    let code = parse_key_code(key_part)?;
    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}

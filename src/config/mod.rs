//! Configuration management for Portals.
//!
//! Configuration is read from `~/.config/portals/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;
pub mod storefront;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;
pub use storefront::{SplashConfig, StorefrontConfig};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub storefront: StorefrontConfig,
    pub splash: SplashConfig,
}

impl Config {
    /// Load configuration from the default path, creating a commented default
    /// file when none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`. Missing fields use default values; a
    /// missing file is created with the default content.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            tracing::info!(path = %path.display(), "Created default config");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/portals/config.toml` on Linux.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("portals").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# Portals Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[colors]
accent = "#3b82f6"
border = "DarkGray"

# Cards
card_border = "DarkGray"
card_hover_border = "Cyan"
card_name = "White"
card_id = "Gray"
price_fg = "White"
price_bg = "#3b82f6"
animation = "LightYellow"

# Pull-to-refresh indicator
indicator = "Cyan"

# Bottom navigation
tab_active = "Cyan"
tab_inactive = "DarkGray"

# Status bar
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
scroll_up = ["k", "Up"]
scroll_down = ["j", "Down"]
page_up = ["PageUp"]
page_down = ["PageDown", "Space"]
scroll_top = ["g", "Home"]

# Same as pulling the grid down past the threshold
refresh = ["r", "F5"]
toggle_layout = ["v"]
next_tab = ["Tab", "l"]
prev_tab = ["BackTab", "Shift+Tab", "h"]

# Search box and filter dropdowns
search = ["/"]
collection_filter = ["c"]
sort_filter = ["s"]

[storefront]
# Cards added by the first load and by every later load
initial_batch = 24
batch_size = 12

# Pull distance (after damping) needed to trigger a refresh
pull_threshold = 80.0

# The next batch loads when the end of the list is this close
lookahead = 200.0

# Fraction of a card that must be visible for its animation to play
visibility_threshold = 0.5

# Simulated refresh duration
refresh_delay_ms = 1500

# Card animations still loading after this long are dropped
load_timeout_ms = 10000

# Layout units per terminal row; distances above are in units
units_per_row = 16.0

# Number of items generated per catalog
catalog_size = 100

[splash]
enabled = true
duration_ms = 2000

# Per-animation load timeout
load_timeout_ms = 10000

# Extra wait before continuing when an animation fails to load
fallback_delay_ms = 2000
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.colors.accent, Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.storefront, StorefrontConfig::default());
        assert_eq!(config.splash, SplashConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[colors]
border = "#FF0000"

[storefront]
batch_size = 6
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.colors.border, Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.card_border, Color::DarkGray);
        assert_eq!(config.storefront.batch_size, 6);
        assert_eq!(config.storefront.initial_batch, 24);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.storefront.catalog_size, 100);
        assert!(config.splash.enabled);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portals").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.storefront.initial_batch, 24);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Portals Configuration"));
    }

    #[test]
    fn test_load_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[splash]\nenabled = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.splash.enabled);
        assert_eq!(config.splash.duration_ms, 2000);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[storefront]\nbatch_size = \"lots\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

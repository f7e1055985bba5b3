//! # Portals
//!
//! A terminal mockup of an NFT marketplace storefront: a loading screen, then
//! an endlessly scrolling grid of collectible cards, each with a looping glyph
//! animation, plus pull-to-refresh.
//!
//! ## Architecture
//!
//! ```text
//! terminal events → sentinel / gesture → pagination → cards → registry
//!                                                          ↘ visibility
//! ```
//!
//! The [`storefront`] core is headless; [`tui`] only reports geometry, input
//! and focus changes into it and draws the result.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the storefront
//! portals
//!
//! # Same catalog every run
//! portals --seed 42 --no-splash
//!
//! # Dump the generated catalog
//! portals catalog --json
//! ```

/// Application context and error types.
pub mod app;

/// Animation backend capability, the glyph backend and the handle registry.
pub mod animation;

/// Command-line interface using clap.
///
/// - `tui` (default) - Launch the storefront
/// - `catalog [--json]` - Print the generated catalog
/// - `config-path` - Print the config file location
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/portals/config.toml`: colors, keybindings,
/// storefront tunables and splash timings.
pub mod config;

/// Items and the generated catalog.
pub mod domain;

/// Loading screen with eased progress and parallel animation loads.
pub mod splash;

/// Pagination, infinite scroll, pull-to-refresh and animation visibility.
pub mod storefront;

/// Terminal user interface built with ratatui.
pub mod tui;

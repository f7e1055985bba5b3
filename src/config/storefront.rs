//! `[storefront]` and `[splash]` sections.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::catalog::DEFAULT_CATALOG_SIZE;
use crate::splash::SplashOptions;
use crate::storefront::StorefrontOptions;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Cards appended by the first load of a session.
    pub initial_batch: usize,
    /// Cards appended by every later load.
    pub batch_size: usize,
    pub pull_threshold: f32,
    /// How far below the viewport the next batch is requested.
    pub lookahead: f32,
    pub visibility_threshold: f32,
    pub refresh_delay_ms: u64,
    /// Card animations still loading after this long are dropped.
    pub load_timeout_ms: u64,
    /// Layout units per terminal row.
    pub units_per_row: f32,
    pub catalog_size: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        let options = StorefrontOptions::default();
        Self {
            initial_batch: options.initial_batch,
            batch_size: options.batch_size,
            pull_threshold: options.pull_threshold,
            lookahead: options.lookahead,
            visibility_threshold: options.visibility_threshold,
            refresh_delay_ms: options.refresh_delay.as_millis() as u64,
            load_timeout_ms: options.load_timeout.as_millis() as u64,
            units_per_row: 16.0,
            catalog_size: DEFAULT_CATALOG_SIZE,
        }
    }
}

impl StorefrontConfig {
    pub fn to_options(&self) -> StorefrontOptions {
        let units = self.units_per_row.max(1.0);
        StorefrontOptions {
            initial_batch: self.initial_batch.max(1),
            batch_size: self.batch_size.max(1),
            pull_threshold: self.pull_threshold.max(1.0),
            // three indicator rows; header plus filter row take four
            indicator_height: units * 3.0,
            header_height: units * 4.0,
            lookahead: self.lookahead.max(0.0),
            visibility_threshold: self.visibility_threshold.clamp(0.0, 1.0),
            refresh_delay: Duration::from_millis(self.refresh_delay_ms),
            load_timeout: Duration::from_millis(self.load_timeout_ms.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub enabled: bool,
    pub duration_ms: u64,
    pub load_timeout_ms: u64,
    pub fallback_delay_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 2000,
            load_timeout_ms: 10_000,
            fallback_delay_ms: 2000,
        }
    }
}

impl SplashConfig {
    pub fn to_options(&self) -> SplashOptions {
        SplashOptions {
            duration: Duration::from_millis(self.duration_ms),
            load_timeout: Duration::from_millis(self.load_timeout_ms),
            fallback_delay: Duration::from_millis(self.fallback_delay_ms),
        }
    }
}

//! Loading screen shown before the storefront.
//!
//! The splash mounts one large animation and five small ones, then waits for
//! two things in parallel: every load signal settling and the progress bar
//! finishing its eased sweep. A load error or timeout does not stop the app;
//! it only swaps the normal exit for a fixed fallback delay.

use std::time::Duration;

use futures::future::{try_join, try_join_all};
use tokio::sync::watch;
use url::Url;

use crate::animation::{
    await_loaded, AnimationBackend, AnimationError, AnimationHandle, AnimationRegistry, LoadState,
    ViewId,
};

pub const MAIN_SOURCE: &str = "https://nft.fragment.com/gift/durovscap-2424.lottie.json";

pub const SMALL_SOURCES: [&str; 5] = [
    "https://nft.fragment.com/gift/skullflower-12626.lottie.json",
    "https://nft.fragment.com/gift/plushpepe-1626.lottie.json",
    "https://nft.fragment.com/gift/durovscap-1727.lottie.json",
    "https://nft.fragment.com/gift/starnotepad-8506.lottie.json",
    "https://nft.fragment.com/gift/deskcalendar-11223.lottie.json",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SplashOptions {
    pub duration: Duration,
    pub load_timeout: Duration,
    pub fallback_delay: Duration,
}

impl Default for SplashOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(2000),
            load_timeout: Duration::from_secs(10),
            fallback_delay: Duration::from_millis(2000),
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

/// Progress bar position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Eased fill, 0.0 to 1.0.
    pub ratio: f64,
    /// Label value, the eased percentage rounded down.
    pub percent: u16,
}

impl Progress {
    pub fn at(elapsed: Duration, duration: Duration) -> Self {
        let linear = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };
        let ratio = ease_out_cubic(linear);
        Self {
            ratio,
            percent: (ratio * 100.0).floor() as u16,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }
}

/// How the splash ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplashExit {
    Ready,
    Fallback(AnimationError),
}

pub struct Splash {
    options: SplashOptions,
    registry: AnimationRegistry,
    main: Option<ViewId>,
    small: Vec<ViewId>,
}

impl Splash {
    /// Mount every splash animation. All of them autoplay.
    pub fn new(options: SplashOptions, backend: &dyn AnimationBackend) -> Self {
        let mut registry = AnimationRegistry::new();
        let mut mount = |source: &str| -> Option<ViewId> {
            let url = match Url::parse(source) {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(source, %err, "Skipping splash animation");
                    return None;
                }
            };
            let mut handle = backend.mount(&url);
            handle.play();
            Some(registry.register(handle))
        };

        let main = mount(MAIN_SOURCE);
        let small = SMALL_SOURCES.into_iter().filter_map(|s| mount(s)).collect();

        Self {
            options,
            registry,
            main,
            small,
        }
    }

    pub fn options(&self) -> &SplashOptions {
        &self.options
    }

    pub fn main_view(&self) -> Option<ViewId> {
        self.main
    }

    pub fn small_views(&self) -> &[ViewId] {
        &self.small
    }

    pub fn animation(&self, view: ViewId) -> Option<&dyn AnimationHandle> {
        self.registry.get(view)
    }

    pub fn progress(&self, elapsed: Duration) -> Progress {
        Progress::at(elapsed, self.options.duration)
    }

    /// Load signals for every mounted animation.
    pub fn load_signals(&self) -> Vec<watch::Receiver<LoadState>> {
        let mut signals = Vec::with_capacity(self.registry.len());
        if let Some(handle) = self.main.and_then(|view| self.registry.get(view)) {
            signals.push(handle.subscribe());
        }
        for view in &self.small {
            if let Some(handle) = self.registry.get(*view) {
                signals.push(handle.subscribe());
            }
        }
        signals
    }

    pub fn tick(&mut self) {
        self.registry.tick();
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        self.registry.for_each_mut(|_, handle| {
            if visible {
                handle.play();
            } else {
                handle.pause();
            }
        });
    }
}

/// Wait for every signal to settle as loaded, each bounded by `limit`.
pub async fn wait_for_assets(
    signals: Vec<watch::Receiver<LoadState>>,
    limit: Duration,
) -> Result<(), AnimationError> {
    try_join_all(signals.into_iter().map(|rx| await_loaded(rx, limit))).await?;
    Ok(())
}

/// Resolves when the splash may hand over to the storefront.
pub async fn wait_ready(
    signals: Vec<watch::Receiver<LoadState>>,
    options: SplashOptions,
) -> SplashExit {
    let sweep = async {
        tokio::time::sleep(options.duration).await;
        Ok::<_, AnimationError>(())
    };

    match try_join(wait_for_assets(signals, options.load_timeout), sweep).await {
        Ok(_) => {
            tracing::info!("All assets loaded and splash animation complete");
            SplashExit::Ready
        }
        Err(err) => {
            tracing::error!(%err, "Error during splash screen loading");
            tokio::time::sleep(options.fallback_delay).await;
            SplashExit::Fallback(err)
        }
    }
}

//! Animation backend capability and the registry of mounted handles.
//!
//! The storefront never decodes animations itself. It mounts a handle through
//! an injected [`AnimationBackend`] and only uses the play/pause controls and
//! the load signal of the returned [`AnimationHandle`].

pub mod glyph;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use url::Url;

pub use glyph::GlyphBackend;
pub use registry::{AnimationRegistry, ViewId};

/// Load progress published by a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("unsupported animation source: {0}")]
    UnsupportedSource(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to load: {0}")]
    Failed(String),
}

/// A controllable reference to one mounted animation instance.
pub trait AnimationHandle: Send + fmt::Debug {
    fn source(&self) -> &Url;

    fn play(&mut self);

    fn pause(&mut self);

    fn is_playing(&self) -> bool;

    /// Advance one frame. No-op while paused or not loaded.
    fn tick(&mut self);

    /// Lines of the current frame, once loaded.
    fn frame(&self) -> Option<&[String]>;

    fn load_state(&self) -> LoadState;

    /// Receiver that settles to `Loaded` or `Failed`.
    fn subscribe(&self) -> watch::Receiver<LoadState>;
}

pub trait AnimationBackend: Send + Sync {
    /// Mount an animation for `source`. Mounting never fails outright; a bad
    /// source surfaces through the handle's load signal.
    fn mount(&self, source: &Url) -> Box<dyn AnimationHandle>;
}

/// Wait for a handle's load signal to settle, bounded by `limit`.
pub async fn await_loaded(
    mut signal: watch::Receiver<LoadState>,
    limit: Duration,
) -> Result<(), AnimationError> {
    let settled = tokio::time::timeout(limit, signal.wait_for(LoadState::is_settled))
        .await
        .map_err(|_| AnimationError::Timeout(limit))?
        .map_err(|_| AnimationError::Failed("load signal closed".into()))?
        .clone();

    match settled {
        LoadState::Loaded => Ok(()),
        LoadState::Failed(reason) => Err(AnimationError::Failed(reason)),
        LoadState::Loading => Err(AnimationError::Timeout(limit)),
    }
}

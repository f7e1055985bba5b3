//! Fake backend for unit tests.

use std::collections::HashSet;

use tokio::sync::watch;
use url::Url;

use super::{AnimationBackend, AnimationHandle, LoadState};

#[derive(Debug, Default, Clone)]
pub struct FakeBackend {
    failing: HashSet<String>,
    pending: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounting `name` publishes a load failure.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(Self::url(name).to_string());
        self
    }

    /// Handles never leave `Loading`.
    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    pub fn url(name: &str) -> Url {
        Url::parse(&format!("https://fake.test/{name}.json")).unwrap()
    }
}

impl AnimationBackend for FakeBackend {
    fn mount(&self, source: &Url) -> Box<dyn AnimationHandle> {
        let state = if self.pending {
            LoadState::Loading
        } else if self.failing.contains(source.as_str()) {
            LoadState::Failed("fake failure".into())
        } else {
            LoadState::Loaded
        };
        let (state, _) = watch::channel(state);
        Box::new(FakeAnimation {
            source: source.clone(),
            playing: false,
            lines: vec!["frame 0".to_string()],
            ticks: 0,
            state,
        })
    }
}

#[derive(Debug)]
pub struct FakeAnimation {
    source: Url,
    playing: bool,
    lines: Vec<String>,
    ticks: usize,
    state: watch::Sender<LoadState>,
}

impl AnimationHandle for FakeAnimation {
    fn source(&self) -> &Url {
        &self.source
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn tick(&mut self) {
        if self.playing {
            self.ticks += 1;
            self.lines = vec![format!("frame {}", self.ticks)];
        }
    }

    fn frame(&self) -> Option<&[String]> {
        (*self.state.borrow() == LoadState::Loaded).then_some(self.lines.as_slice())
    }

    fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }
}

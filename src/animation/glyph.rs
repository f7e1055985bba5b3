//! Terminal animation backend.
//!
//! Every source decodes into a short loop of glyph frames. The motif comes
//! from the file stem of the source URL (`skullflower-12626.lottie.json` uses
//! the `skullflower` motif) and the loop phase from a SHA-256 of the URL, so
//! two cards with different sources rarely blink in lockstep.

use sha2::{Digest, Sha256};
use tokio::sync::watch;
use url::Url;

use super::{AnimationBackend, AnimationError, AnimationHandle, LoadState};

pub const FRAME_COUNT: usize = 8;

const SPARKLES: [char; 4] = ['·', '✧', '✦', '✧'];

#[derive(Debug, Default, Clone)]
pub struct GlyphBackend;

impl GlyphBackend {
    pub fn new() -> Self {
        Self
    }
}

impl AnimationBackend for GlyphBackend {
    fn mount(&self, source: &Url) -> Box<dyn AnimationHandle> {
        let (state, _) = watch::channel(LoadState::Loading);
        let frames = match decode(source) {
            Ok(frames) => {
                state.send_replace(LoadState::Loaded);
                frames
            }
            Err(err) => {
                state.send_replace(LoadState::Failed(err.to_string()));
                Vec::new()
            }
        };

        Box::new(GlyphAnimation {
            source: source.clone(),
            frames,
            frame_index: 0,
            playing: false,
            state,
        })
    }
}

#[derive(Debug)]
pub struct GlyphAnimation {
    source: Url,
    frames: Vec<Vec<String>>,
    frame_index: usize,
    playing: bool,
    state: watch::Sender<LoadState>,
}

impl AnimationHandle for GlyphAnimation {
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
        if self.playing && !self.frames.is_empty() {
            self.frame_index = (self.frame_index + 1) % self.frames.len();
        }
    }

    fn frame(&self) -> Option<&[String]> {
        self.frames.get(self.frame_index).map(Vec::as_slice)
    }

    fn load_state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }
}

/// Turn a source URL into frames, rejecting anything that is not an http(s)
/// JSON document.
pub fn decode(source: &Url) -> Result<Vec<Vec<String>>, AnimationError> {
    if !matches!(source.scheme(), "http" | "https") {
        return Err(AnimationError::UnsupportedSource(source.to_string()));
    }
    let file_name = source
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let Some(stem) = file_name.strip_suffix(".json") else {
        return Err(AnimationError::UnsupportedSource(source.to_string()));
    };
    let stem = stem.strip_suffix(".lottie").unwrap_or(stem);
    let motif = stem.rsplit_once('-').map(|(name, _)| name).unwrap_or(stem);

    let digest = Sha256::digest(source.as_str().as_bytes());
    let phase = usize::from(digest[0]) % FRAME_COUNT;

    Ok(build_frames(motif_art(motif), phase))
}

fn motif_art(motif: &str) -> [&'static str; 3] {
    match motif {
        "skullflower" => [" ,@, ", "@(x)@", "  |  "],
        "plushpepe" => [" o.o ", "(___)", " ^ ^ "],
        "durovscap" => ["  _  ", " /_\\ ", "====="],
        "heartlocket" => [" _ _ ", "( V )", " \\ / "],
        "deskcalendar" => ["[===]", "|1 2|", "[___]"],
        "sakuraflower" => [" *.* ", "*(o)*", " *'* "],
        "starnotepad" => [" ___ ", "|~~~|", "|___|"],
        _ => ["  .  ", " / \\ ", " \\ / "],
    }
}

fn build_frames(art: [&str; 3], phase: usize) -> Vec<Vec<String>> {
    (0..FRAME_COUNT)
        .map(|n| {
            let step = n + phase;
            let lead = SPARKLES[step % SPARKLES.len()];
            let trail = SPARKLES[(step + 2) % SPARKLES.len()];
            // the body bobs one column on odd steps
            let (left, right) = if step % 2 == 0 { (" ", "  ") } else { ("  ", " ") };
            vec![
                format!("{lead} {} {trail}", art[0]),
                format!("{left}{}{right}", art[1]),
                format!("{trail} {} {lead}", art[2]),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_decode_lottie_source() {
        let frames =
            decode(&url("https://nft.fragment.com/gift/skullflower-12626.lottie.json")).unwrap();
        assert_eq!(frames.len(), FRAME_COUNT);
        assert!(frames.iter().all(|f| f.len() == 3));
        assert!(frames[0][1].contains("@(x)@"));
    }

    #[test]
    fn test_decode_rejects_non_http() {
        let err = decode(&url("file:///tmp/skullflower.json")).unwrap_err();
        assert!(matches!(err, AnimationError::UnsupportedSource(_)));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode(&url("https://nft.fragment.com/gift/skullflower.png")).unwrap_err();
        assert!(matches!(err, AnimationError::UnsupportedSource(_)));
    }

    #[test]
    fn test_unknown_motif_falls_back() {
        let frames = decode(&url("https://example.com/a/mystery-1.json")).unwrap();
        assert!(frames[0][2].contains("\\ /"));
    }

    #[test]
    fn test_mount_publishes_loaded() {
        let backend = GlyphBackend::new();
        let handle = backend.mount(&url("https://nft.fragment.com/gift/plushpepe-1626.lottie.json"));
        assert_eq!(handle.load_state(), LoadState::Loaded);
        assert_eq!(*handle.subscribe().borrow(), LoadState::Loaded);
        assert!(!handle.is_playing());
        assert!(handle.frame().is_some());
    }

    #[test]
    fn test_mount_publishes_failure() {
        let backend = GlyphBackend::new();
        let handle = backend.mount(&url("ftp://example.com/x.json"));
        assert!(matches!(handle.load_state(), LoadState::Failed(_)));
        assert!(handle.frame().is_none());
    }

    #[test]
    fn test_tick_only_advances_while_playing() {
        let backend = GlyphBackend::new();
        let mut handle =
            backend.mount(&url("https://nft.fragment.com/gift/sakuraflower-11223.lottie.json"));
        let first = handle.frame().unwrap().to_vec();

        handle.tick();
        assert_eq!(handle.frame().unwrap(), first.as_slice());

        handle.play();
        handle.tick();
        assert_ne!(handle.frame().unwrap(), first.as_slice());

        handle.pause();
        let paused = handle.frame().unwrap().to_vec();
        handle.tick();
        assert_eq!(handle.frame().unwrap(), paused.as_slice());
    }
}

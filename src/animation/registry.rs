use std::time::Duration;

use tokio::time::Instant;

use super::{AnimationHandle, LoadState};

/// Stable reference to a mounted view's animation slot.
///
/// Slots are reused after [`AnimationRegistry::unregister`]; the generation
/// keeps a stale id from reaching the handle that now lives in its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId {
    slot: u32,
    generation: u32,
}

impl ViewId {
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    handle: Option<Box<dyn AnimationHandle>>,
    mounted_at: Instant,
}

/// Arena of mounted animation handles keyed by [`ViewId`].
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: Box<dyn AnimationHandle>) -> ViewId {
        self.len += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.handle = Some(handle);
            entry.mounted_at = Instant::now();
            return ViewId {
                slot,
                generation: entry.generation,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            handle: Some(handle),
            mounted_at: Instant::now(),
        });
        ViewId {
            slot,
            generation: 0,
        }
    }

    /// Release the slot owned by `view`, returning its handle.
    pub fn unregister(&mut self, view: ViewId) -> Option<Box<dyn AnimationHandle>> {
        let entry = self.slots.get_mut(view.slot as usize)?;
        if entry.generation != view.generation {
            return None;
        }
        let handle = entry.handle.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(view.slot);
        self.len -= 1;
        Some(handle)
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.get(view).is_some()
    }

    pub fn get(&self, view: ViewId) -> Option<&(dyn AnimationHandle + 'static)> {
        let entry = self.slots.get(view.slot as usize)?;
        if entry.generation != view.generation {
            return None;
        }
        entry.handle.as_deref()
    }

    pub fn get_mut(&mut self, view: ViewId) -> Option<&mut (dyn AnimationHandle + 'static)> {
        let entry = self.slots.get_mut(view.slot as usize)?;
        if entry.generation != view.generation {
            return None;
        }
        entry.handle.as_deref_mut()
    }

    pub fn play(&mut self, view: ViewId) -> bool {
        match self.get_mut(view) {
            Some(handle) => {
                handle.play();
                true
            }
            None => false,
        }
    }

    pub fn pause(&mut self, view: ViewId) -> bool {
        match self.get_mut(view) {
            Some(handle) => {
                handle.pause();
                true
            }
            None => false,
        }
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(ViewId, &mut dyn AnimationHandle)) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if let Some(handle) = entry.handle.as_deref_mut() {
                let view = ViewId {
                    slot: slot as u32,
                    generation: entry.generation,
                };
                f(view, handle);
            }
        }
    }

    pub fn pause_all(&mut self) {
        self.for_each_mut(|_, handle| handle.pause());
    }

    /// Advance every playing handle by one frame.
    pub fn tick(&mut self) {
        self.for_each_mut(|_, handle| handle.tick());
    }

    /// Drop handles whose load failed and return their ids.
    pub fn evict_failed(&mut self) -> Vec<ViewId> {
        let mut failed = Vec::new();
        self.for_each_mut(|view, handle| {
            if let LoadState::Failed(reason) = handle.load_state() {
                tracing::warn!(source = %handle.source(), %reason, "Animation failed to load");
                failed.push(view);
            }
        });
        for view in &failed {
            self.unregister(*view);
        }
        failed
    }

    /// Drop handles still loading `limit` after they were registered.
    pub fn evict_stalled(&mut self, limit: Duration) -> Vec<ViewId> {
        let mut stalled = Vec::new();
        for (slot, entry) in self.slots.iter().enumerate() {
            let Some(handle) = entry.handle.as_deref() else {
                continue;
            };
            if !handle.load_state().is_settled() && entry.mounted_at.elapsed() >= limit {
                tracing::warn!(source = %handle.source(), ?limit, "Animation load timed out");
                stalled.push(ViewId {
                    slot: slot as u32,
                    generation: entry.generation,
                });
            }
        }
        for view in &stalled {
            self.unregister(*view);
        }
        stalled
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever allocated, free or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::FakeBackend;
    use crate::animation::AnimationBackend;

    fn handle(backend: &FakeBackend, name: &str) -> Box<dyn AnimationHandle> {
        backend.mount(&FakeBackend::url(name))
    }

    #[test]
    fn test_register_and_get() {
        let backend = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        let view = registry.register(handle(&backend, "a"));

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(view));
        assert_eq!(registry.get(view).unwrap().source(), &FakeBackend::url("a"));
    }

    #[test]
    fn test_unregister_releases_slot_for_reuse() {
        let backend = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        let first = registry.register(handle(&backend, "a"));
        assert!(registry.unregister(first).is_some());
        assert!(registry.is_empty());

        let second = registry.register(handle(&backend, "b"));
        assert_eq!(second.slot(), first.slot());
        assert_ne!(second, first);
        assert_eq!(registry.capacity(), 1);
    }

    #[test]
    fn test_stale_id_does_not_reach_new_handle() {
        let backend = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        let stale = registry.register(handle(&backend, "a"));
        registry.unregister(stale);
        let fresh = registry.register(handle(&backend, "b"));

        assert!(registry.get(stale).is_none());
        assert!(!registry.play(stale));
        assert!(registry.unregister(stale).is_none());
        assert!(registry.contains(fresh));
        assert!(!registry.get(fresh).unwrap().is_playing());
    }

    #[test]
    fn test_repeated_refresh_cycles_do_not_grow() {
        let backend = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        for _ in 0..5 {
            let views: Vec<_> = (0..24)
                .map(|i| registry.register(handle(&backend, &format!("card-{i}"))))
                .collect();
            for view in views {
                registry.unregister(view);
            }
        }
        assert_eq!(registry.capacity(), 24);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_play_pause_and_pause_all() {
        let backend = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        let a = registry.register(handle(&backend, "a"));
        let b = registry.register(handle(&backend, "b"));

        assert!(registry.play(a));
        assert!(registry.play(b));
        assert!(registry.get(a).unwrap().is_playing());

        registry.pause_all();
        assert!(!registry.get(a).unwrap().is_playing());
        assert!(!registry.get(b).unwrap().is_playing());
    }

    #[test]
    fn test_evict_failed_removes_only_failures() {
        let backend = FakeBackend::new().failing("broken");
        let mut registry = AnimationRegistry::new();
        let ok = registry.register(handle(&backend, "fine"));
        let bad = registry.register(handle(&backend, "broken"));

        let evicted = registry.evict_failed();
        assert_eq!(evicted, vec![bad]);
        assert!(registry.contains(ok));
        assert!(!registry.contains(bad));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_stalled_after_limit() {
        let loading = FakeBackend::new().pending();
        let loaded = FakeBackend::new();
        let mut registry = AnimationRegistry::new();
        let slow = registry.register(handle(&loading, "slow"));
        let fine = registry.register(handle(&loaded, "fine"));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(registry.evict_stalled(Duration::from_secs(10)).is_empty());

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(registry.evict_stalled(Duration::from_secs(10)), vec![slow]);
        assert!(registry.contains(fine));
        assert_eq!(registry.len(), 1);
    }
}

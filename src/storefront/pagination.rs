use std::ops::Range;

pub const DEFAULT_INITIAL_BATCH: usize = 24;
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// Cursor over a fixed-length catalog.
///
/// The first call of a session takes `initial_batch` items, every later call
/// `batch_size`. A load is split into [`Pagination::begin`] and
/// [`Pagination::complete`] so that the append in between may be async.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    loaded: usize,
    total: usize,
    initial_batch: usize,
    batch_size: usize,
    is_loading: bool,
    has_more: bool,
}

impl Pagination {
    pub fn new(total: usize, initial_batch: usize, batch_size: usize) -> Self {
        Self {
            loaded: 0,
            total,
            initial_batch,
            batch_size,
            is_loading: false,
            has_more: total > 0,
        }
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn can_load(&self) -> bool {
        !self.is_loading && self.has_more
    }

    fn next_batch(&self) -> usize {
        if self.loaded == 0 {
            self.initial_batch
        } else {
            self.batch_size
        }
    }

    /// Claim the next slice and raise the loading flag, or `None` when a load
    /// is in flight or the catalog is exhausted.
    pub fn begin(&mut self) -> Option<Range<usize>> {
        if !self.can_load() {
            return None;
        }
        self.is_loading = true;
        let end = (self.loaded + self.next_batch()).min(self.total);
        Some(self.loaded..end)
    }

    /// Record `appended` items and clear the loading flag.
    pub fn complete(&mut self, appended: usize) {
        self.loaded = (self.loaded + appended).min(self.total);
        self.is_loading = false;
        if self.loaded >= self.total {
            self.has_more = false;
        }
    }

    /// Start a new session over a catalog of `total` items.
    pub fn reset(&mut self, total: usize) {
        self.loaded = 0;
        self.total = total;
        self.is_loading = false;
        self.has_more = true;
        if total == 0 {
            self.has_more = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(p: &mut Pagination) -> usize {
        match p.begin() {
            Some(range) => {
                let n = range.len();
                p.complete(n);
                n
            }
            None => 0,
        }
    }

    #[test]
    fn test_batches_of_24_then_12_over_100() {
        let mut p = Pagination::new(100, 24, 12);

        load(&mut p);
        assert_eq!(p.loaded(), 24);
        load(&mut p);
        assert_eq!(p.loaded(), 36);
        for _ in 0..5 {
            load(&mut p);
        }
        assert_eq!(p.loaded(), 24 + 12 * 6);
        assert!(p.has_more());

        assert_eq!(load(&mut p), 4);
        assert_eq!(p.loaded(), 100);
        assert!(!p.has_more());

        assert_eq!(load(&mut p), 0);
        assert_eq!(p.loaded(), 100);
    }

    #[test]
    fn test_loaded_never_exceeds_total() {
        let mut p = Pagination::new(30, 24, 12);
        let mut previous = 0;
        while p.has_more() {
            load(&mut p);
            assert!(p.loaded() > previous);
            assert!(p.loaded() <= p.total());
            previous = p.loaded();
        }
        assert_eq!(p.loaded(), 30);
    }

    #[test]
    fn test_begin_is_guarded_while_loading() {
        let mut p = Pagination::new(100, 24, 12);
        let first = p.begin().unwrap();
        assert!(p.is_loading());
        assert!(p.begin().is_none());

        p.complete(first.len());
        assert!(!p.is_loading());
        assert_eq!(p.begin(), Some(24..36));
    }

    #[test]
    fn test_reset_restores_initial_batch() {
        let mut p = Pagination::new(100, 24, 12);
        load(&mut p);
        load(&mut p);

        p.reset(100);
        assert_eq!(p.loaded(), 0);
        assert!(p.has_more());
        assert_eq!(p.begin(), Some(0..24));
    }

    #[test]
    fn test_reset_clears_stuck_loading_flag() {
        let mut p = Pagination::new(10, 24, 12);
        p.begin();
        p.reset(10);
        assert!(!p.is_loading());
        assert!(p.can_load());
    }

    #[test]
    fn test_empty_catalog_has_nothing_to_load() {
        let mut p = Pagination::new(0, 24, 12);
        assert!(!p.has_more());
        assert!(p.begin().is_none());
    }
}

use super::pagination::Pagination;

pub const DEFAULT_LOOKAHEAD: f32 = 200.0;

/// Boundary detector for the marker that trails the last loaded card.
///
/// Fires on the transition into the lookahead margin, like an intersection
/// observer with a root margin. [`SentinelObserver::rearm`] re-observes the
/// marker after it moves, so a marker still inside the margin fires again.
#[derive(Debug, Clone, PartialEq)]
pub struct SentinelObserver {
    lookahead: f32,
    intersecting: bool,
}

impl SentinelObserver {
    pub fn new(lookahead: f32) -> Self {
        Self {
            lookahead: lookahead.max(0.0),
            intersecting: false,
        }
    }

    pub fn lookahead(&self) -> f32 {
        self.lookahead
    }

    /// `distance` is how far the sentinel sits below the viewport's bottom
    /// edge, negative once it is inside the viewport. Returns true when a
    /// load should be requested.
    pub fn observe(&mut self, distance: f32, pagination: &Pagination) -> bool {
        let within = distance <= self.lookahead;
        let entered = within && !self.intersecting;
        self.intersecting = within;
        entered && pagination.can_load()
    }

    pub fn rearm(&mut self) {
        self.intersecting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_entering_margin() {
        let pagination = Pagination::new(100, 24, 12);
        let mut sentinel = SentinelObserver::new(200.0);

        assert!(!sentinel.observe(500.0, &pagination));
        assert!(!sentinel.observe(201.0, &pagination));
        assert!(sentinel.observe(200.0, &pagination));
    }

    #[test]
    fn test_does_not_refire_without_rearm() {
        let pagination = Pagination::new(100, 24, 12);
        let mut sentinel = SentinelObserver::new(200.0);

        assert!(sentinel.observe(100.0, &pagination));
        assert!(!sentinel.observe(50.0, &pagination));
        assert!(!sentinel.observe(-10.0, &pagination));

        sentinel.rearm();
        assert!(sentinel.observe(-10.0, &pagination));
    }

    #[test]
    fn test_leaving_and_reentering_fires_again() {
        let pagination = Pagination::new(100, 24, 12);
        let mut sentinel = SentinelObserver::new(200.0);

        assert!(sentinel.observe(0.0, &pagination));
        assert!(!sentinel.observe(400.0, &pagination));
        assert!(sentinel.observe(150.0, &pagination));
    }

    #[test]
    fn test_guarded_by_pagination() {
        let mut pagination = Pagination::new(100, 24, 12);
        let mut sentinel = SentinelObserver::new(200.0);

        pagination.begin();
        assert!(!sentinel.observe(0.0, &pagination));

        let mut exhausted = Pagination::new(5, 24, 12);
        let range = exhausted.begin().unwrap();
        exhausted.complete(range.len());
        sentinel.rearm();
        assert!(!sentinel.observe(0.0, &exhausted));
    }
}

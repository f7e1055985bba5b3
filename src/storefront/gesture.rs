//! Pull-to-refresh gesture state machine.
//!
//! Driven by touch (mouse drag) events in arrival order:
//!
//! ```text
//! Idle -> Pulling <-> ReleaseReady -> Refreshing -> Idle
//!           \______________/
//!            touch end below threshold -> Idle
//! ```
//!
//! Positions are in layout units, not terminal rows.

pub const DEFAULT_PULL_THRESHOLD: f32 = 80.0;

/// Raw finger travel is halved.
const DAMPING: f32 = 0.5;
/// The damped distance is capped at this multiple of the threshold.
const MAX_PULL_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pulling,
    ReleaseReady,
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorLabel {
    PullDown,
    Release,
    Refreshing,
}

impl IndicatorLabel {
    pub fn text(self) -> &'static str {
        match self {
            IndicatorLabel::PullDown => "Yangilash uchun pastga torting",
            IndicatorLabel::Release => "Yangilash uchun qo'yib yuboring",
            IndicatorLabel::Refreshing => "Yangilanmoqda...",
        }
    }
}

/// Visual state of the refresh indicator above the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    /// Vertical offset; `-height` is fully tucked away, 0 fully shown.
    pub offset: f32,
    pub opacity: f32,
    pub label: IndicatorLabel,
    pub spinning: bool,
    /// Whether changes should ease rather than jump.
    pub eased: bool,
}

impl Indicator {
    fn hidden(height: f32, eased: bool) -> Self {
        Self {
            offset: -height,
            opacity: 0.0,
            label: IndicatorLabel::PullDown,
            spinning: false,
            eased,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Native scrolling proceeds.
    Ignored,
    /// The pull is tracked and native scrolling is suppressed.
    Pulling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Threshold reached: the caller must start a refresh.
    Refresh,
    /// Released short of the threshold (or not at the top).
    Cancelled,
    /// A refresh is already running; the gesture is dropped.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PullToRefresh {
    threshold: f32,
    indicator_height: f32,
    phase: GesturePhase,
    start_y: f32,
    current_y: f32,
    indicator: Indicator,
}

impl PullToRefresh {
    pub fn new(threshold: f32, indicator_height: f32) -> Self {
        Self {
            threshold,
            indicator_height,
            phase: GesturePhase::Idle,
            start_y: 0.0,
            current_y: 0.0,
            indicator: Indicator::hidden(indicator_height, false),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == GesturePhase::Refreshing
    }

    fn delta(&self) -> f32 {
        self.current_y - self.start_y
    }

    /// Damped and capped pull distance for a raw delta.
    pub fn pull_distance(&self, delta: f32) -> f32 {
        (delta * DAMPING).min(self.threshold * MAX_PULL_FACTOR)
    }

    pub fn touch_start(&mut self, y: f32) {
        self.start_y = y;
        self.current_y = y;
        if !self.is_refreshing() {
            self.indicator = Indicator::hidden(self.indicator_height, false);
        }
    }

    pub fn touch_move(&mut self, y: f32, scroll_top: f32) -> MoveOutcome {
        self.current_y = y;
        let delta = self.delta();
        if scroll_top != 0.0 || delta <= 0.0 || self.is_refreshing() {
            return MoveOutcome::Ignored;
        }

        let distance = self.pull_distance(delta);
        let ready = distance >= self.threshold;
        self.phase = if ready {
            GesturePhase::ReleaseReady
        } else {
            GesturePhase::Pulling
        };
        self.indicator = Indicator {
            offset: distance - self.indicator_height,
            opacity: (distance / self.threshold).min(1.0),
            label: if ready {
                IndicatorLabel::Release
            } else {
                IndicatorLabel::PullDown
            },
            spinning: false,
            eased: false,
        };
        MoveOutcome::Pulling
    }

    pub fn touch_end(&mut self, scroll_top: f32) -> ReleaseOutcome {
        let delta = self.delta();
        self.start_y = 0.0;
        self.current_y = 0.0;

        if self.is_refreshing() {
            return ReleaseOutcome::Ignored;
        }

        if scroll_top == 0.0 && delta * DAMPING >= self.threshold {
            self.phase = GesturePhase::Refreshing;
            self.indicator = Indicator {
                offset: 0.0,
                opacity: 1.0,
                label: IndicatorLabel::Refreshing,
                spinning: true,
                eased: true,
            };
            ReleaseOutcome::Refresh
        } else {
            self.phase = GesturePhase::Idle;
            self.indicator = Indicator::hidden(self.indicator_height, true);
            ReleaseOutcome::Cancelled
        }
    }

    /// Full-threshold pull, used by the keyboard shortcut.
    pub fn simulate_pull(&mut self) -> ReleaseOutcome {
        let travel = self.threshold / DAMPING;
        self.touch_start(0.0);
        self.touch_move(travel, 0.0);
        self.touch_end(0.0)
    }

    /// Leave `Refreshing`. Returns false when no refresh was running.
    pub fn finish_refresh(&mut self) -> bool {
        if !self.is_refreshing() {
            return false;
        }
        self.phase = GesturePhase::Idle;
        self.indicator = Indicator::hidden(self.indicator_height, true);
        true
    }
}

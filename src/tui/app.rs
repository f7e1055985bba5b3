use std::cmp::Ordering;

use ratatui::layout::Rect;
use tokio::time::Instant;

use crate::splash::Splash;
use crate::storefront::{ReleaseOutcome, Storefront};

use super::geometry::GridGeometry;

/// Rows the pull indicator takes when fully shown.
pub const INDICATOR_ROWS: u16 = 3;

/// Where typed characters go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    pub fn toggle(self) -> Self {
        match self {
            LayoutMode::Grid => LayoutMode::List,
            LayoutMode::List => LayoutMode::Grid,
        }
    }

    /// Header glyph for the mode the toggle switches to.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            LayoutMode::Grid => "☰",
            LayoutMode::List => "⊞",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Market,
    Gifts,
    Activity,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Market, Tab::Gifts, Tab::Activity, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Market => "Market",
            Tab::Gifts => "Gifts",
            Tab::Activity => "Activity",
            Tab::Profile => "Profile",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub struct SplashPhase {
    pub splash: Splash,
    pub started: Instant,
}

pub struct TuiApp {
    pub storefront: Storefront,
    pub splash: Option<SplashPhase>,
    pub layout: LayoutMode,
    pub tab: Tab,
    /// Scroll offset of the card grid, in rows.
    pub scroll: u32,
    pub units_per_row: f32,
    /// Grid viewport from the last draw.
    pub viewport: Rect,
    pub hovered: Option<usize>,
    /// Last row seen while the left button is held.
    pub drag_row: Option<u16>,
    pub input_mode: InputMode,
    /// Indicator rows on screen. Eased changes move one row per tick.
    pub indicator_rows: u16,
    pub refresh_due: Option<Instant>,
    /// Ticks since start, drives the spinner.
    pub ticks: u64,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(storefront: Storefront, units_per_row: f32) -> Self {
        Self {
            storefront,
            splash: None,
            layout: LayoutMode::default(),
            tab: Tab::default(),
            scroll: 0,
            units_per_row: units_per_row.max(1.0),
            viewport: Rect::default(),
            hovered: None,
            drag_row: None,
            input_mode: InputMode::default(),
            indicator_rows: 0,
            refresh_due: None,
            ticks: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn with_splash(mut self, splash: Splash) -> Self {
        self.splash = Some(SplashPhase {
            splash,
            started: Instant::now(),
        });
        self
    }

    pub fn in_splash(&self) -> bool {
        self.splash.is_some()
    }

    pub fn finish_splash(&mut self) {
        self.splash = None;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.layout, self.viewport)
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll as f32 * self.units_per_row
    }

    pub fn scroll_by(&mut self, rows: i64) {
        let max = i64::from(self.geometry().max_scroll(self.storefront.cards().len()));
        let next = (i64::from(self.scroll) + rows).clamp(0, max.max(0));
        self.scroll = next as u32;
        let scroll_top = self.scroll_top();
        self.storefront.on_scroll(scroll_top);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_by(-i64::from(self.scroll));
    }

    pub fn page_rows(&self) -> i64 {
        i64::from(self.viewport.height.saturating_sub(1).max(1))
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggle();
        self.scroll = self.scroll.min(self.geometry().max_scroll(self.storefront.cards().len()));
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            tracing::info!(page = tab.title(), "Navigated");
        }
    }

    /// Indicator rows for the current gesture state.
    pub fn target_indicator_rows(&self) -> u16 {
        let indicator = self.storefront.gesture().indicator();
        if !indicator.is_visible() {
            return 0;
        }
        let height = self.storefront.options().indicator_height;
        let shown = ((indicator.offset + height) / self.units_per_row).ceil();
        shown.clamp(1.0, f32::from(INDICATOR_ROWS)) as u16
    }

    /// Follow the indicator: jump while the finger drives it, otherwise
    /// slide one row on each tick.
    pub fn step_indicator(&mut self, tick: bool) {
        let target = self.target_indicator_rows();
        if !self.storefront.gesture().indicator().eased {
            self.indicator_rows = target;
        } else if tick {
            self.indicator_rows = match self.indicator_rows.cmp(&target) {
                Ordering::Less => self.indicator_rows + 1,
                Ordering::Greater => self.indicator_rows - 1,
                Ordering::Equal => target,
            };
        }
    }

    /// Start the refresh timer when a release asks for it.
    pub fn handle_release(&mut self, outcome: ReleaseOutcome) {
        if outcome == ReleaseOutcome::Refresh {
            self.refresh_due = Some(Instant::now() + self.storefront.options().refresh_delay);
        }
    }

    /// Push scroll position, visible ratios and the sentinel distance into
    /// the storefront. Runs after every layout-affecting change.
    pub fn sync_viewport(&mut self) {
        if self.viewport.height == 0 {
            return;
        }
        loop {
            let geometry = self.geometry();
            let count = self.storefront.cards().len();

            let ratios: Vec<_> = self
                .storefront
                .cards()
                .iter()
                .enumerate()
                .filter_map(|(i, card)| card.view.map(|v| (v, geometry.visible_ratio(i, self.scroll))))
                .collect();
            for (view, ratio) in ratios {
                self.storefront.report_visible_ratio(view, ratio);
            }

            let distance = geometry.sentinel_distance(count, self.scroll) as f32 * self.units_per_row;
            if self.storefront.observe_sentinel(distance) == 0 {
                break;
            }
        }
    }

    pub fn hover_card(&mut self, index: Option<usize>) {
        if self.hovered == index {
            return;
        }
        self.hovered = index;
        let view = index
            .and_then(|i| self.storefront.cards().get(i))
            .and_then(|card| card.view);
        self.storefront.hover(view);
    }
}

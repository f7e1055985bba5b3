//! Card placement inside the scrollable grid area.
//!
//! Positions are in terminal cells. `y` is measured from the top of the
//! whole card list, not the viewport; subtract the scroll offset to draw.

use ratatui::layout::Rect;

use super::app::LayoutMode;

const GRID_CARD_MIN_WIDTH: u16 = 22;
const GRID_CARD_HEIGHT: u32 = 8;
const LIST_CARD_HEIGHT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRect {
    pub x: u16,
    pub y: u32,
    pub width: u16,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub mode: LayoutMode,
    pub viewport: Rect,
    pub columns: u16,
    pub card_width: u16,
    pub card_height: u32,
}

impl GridGeometry {
    pub fn new(mode: LayoutMode, viewport: Rect) -> Self {
        let (columns, card_height) = match mode {
            LayoutMode::Grid => ((viewport.width / GRID_CARD_MIN_WIDTH).max(1), GRID_CARD_HEIGHT),
            LayoutMode::List => (1, LIST_CARD_HEIGHT),
        };
        Self {
            mode,
            viewport,
            columns,
            card_width: (viewport.width / columns).max(1),
            card_height,
        }
    }

    pub fn card_rect(&self, index: usize) -> CardRect {
        let columns = usize::from(self.columns);
        let col = (index % columns) as u16;
        let row = (index / columns) as u32;
        CardRect {
            x: col * self.card_width,
            y: row * self.card_height,
            width: self.card_width,
            height: self.card_height,
        }
    }

    /// Rows taken by `count` cards.
    pub fn content_height(&self, count: usize) -> u32 {
        let rows = count.div_ceil(usize::from(self.columns)) as u32;
        rows * self.card_height
    }

    pub fn max_scroll(&self, count: usize) -> u32 {
        self.content_height(count)
            .saturating_sub(u32::from(self.viewport.height))
    }

    /// Fraction of card `index` inside the viewport at `scroll`.
    pub fn visible_ratio(&self, index: usize, scroll: u32) -> f32 {
        let rect = self.card_rect(index);
        let top = rect.y.max(scroll);
        let bottom = (rect.y + rect.height).min(scroll + u32::from(self.viewport.height));
        if bottom <= top {
            return 0.0;
        }
        (bottom - top) as f32 / rect.height as f32
    }

    /// Rows between the viewport's bottom edge and the sentinel trailing the
    /// last card. Negative once the sentinel is on screen.
    pub fn sentinel_distance(&self, count: usize, scroll: u32) -> i64 {
        let sentinel = i64::from(self.content_height(count));
        let bottom = i64::from(scroll) + i64::from(self.viewport.height);
        sentinel - bottom
    }

    /// Card under a terminal cell, if any.
    pub fn card_at(&self, column: u16, row: u16, scroll: u32, count: usize) -> Option<usize> {
        let area = self.viewport;
        if column < area.x || column >= area.right() || row < area.y || row >= area.bottom() {
            return None;
        }
        let col = (column - area.x) / self.card_width;
        if col >= self.columns {
            return None;
        }
        let y = u32::from(row - area.y) + scroll;
        let index = (y / self.card_height) as usize * usize::from(self.columns) + usize::from(col);
        (index < count).then_some(index)
    }

    /// Screen rect of a card clipped to the viewport.
    pub fn screen_rect(&self, index: usize, scroll: u32) -> Option<Rect> {
        let rect = self.card_rect(index);
        let view_top = scroll;
        let view_bottom = scroll + u32::from(self.viewport.height);
        let top = rect.y.max(view_top);
        let bottom = (rect.y + rect.height).min(view_bottom);
        if bottom <= top {
            return None;
        }
        Some(Rect {
            x: self.viewport.x + rect.x,
            y: self.viewport.y + (top - scroll) as u16,
            width: rect.width,
            height: (bottom - top) as u16,
        })
    }
}

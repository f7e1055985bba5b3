use std::collections::HashMap;

use crate::animation::{AnimationRegistry, ViewId};

pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

#[derive(Debug, Default, Clone, Copy)]
struct ViewState {
    /// `None` until the first intersection report.
    intersecting: Option<bool>,
}

/// Decides per-view play/pause from viewport intersection and hover, with
/// page visibility layered on top as an override.
///
/// Handles are only referenced by [`ViewId`]; the registry keeps ownership.
#[derive(Debug)]
pub struct VisibilityCoordinator {
    threshold: f32,
    page_visible: bool,
    views: HashMap<ViewId, ViewState>,
    hovered: Option<ViewId>,
}

impl VisibilityCoordinator {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            page_visible: true,
            views: HashMap::new(),
            hovered: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_page_visible(&self) -> bool {
        self.page_visible
    }

    pub fn hovered(&self) -> Option<ViewId> {
        self.hovered
    }

    pub fn observe(&mut self, view: ViewId) {
        self.views.entry(view).or_default();
    }

    pub fn unobserve(&mut self, view: ViewId) {
        self.views.remove(&view);
        if self.hovered == Some(view) {
            self.hovered = None;
        }
    }

    pub fn clear(&mut self) {
        self.views.clear();
        self.hovered = None;
    }

    pub fn is_observed(&self, view: ViewId) -> bool {
        self.views.contains_key(&view)
    }

    pub fn is_intersecting(&self, view: ViewId) -> bool {
        self.views
            .get(&view)
            .and_then(|state| state.intersecting)
            .unwrap_or(false)
    }

    /// Report the visible fraction of `view`. Acts only when the view crosses
    /// the threshold (or on its first report). Returns the new intersection
    /// state when it changed.
    pub fn report_ratio(
        &mut self,
        view: ViewId,
        ratio: f32,
        registry: &mut AnimationRegistry,
    ) -> Option<bool> {
        let state = self.views.get_mut(&view)?;
        let intersecting = ratio > 0.0 && ratio >= self.threshold;
        if state.intersecting == Some(intersecting) {
            return None;
        }
        state.intersecting = Some(intersecting);

        if intersecting {
            if self.page_visible {
                registry.play(view);
            }
        } else {
            registry.pause(view);
        }
        Some(intersecting)
    }

    /// Move the pointer onto `view` (or off every view with `None`).
    pub fn hover(&mut self, view: Option<ViewId>, registry: &mut AnimationRegistry) {
        if self.hovered == view {
            return;
        }
        if let Some(left) = self.hovered.take() {
            registry.pause(left);
        }
        if let Some(entered) = view.filter(|v| self.views.contains_key(v)) {
            self.hovered = Some(entered);
            if self.page_visible {
                registry.play(entered);
            }
        }
    }

    /// Page-level override. Hiding pauses every registered handle; showing
    /// resumes exactly the views that currently intersect.
    pub fn set_page_visible(&mut self, visible: bool, registry: &mut AnimationRegistry) {
        if self.page_visible == visible {
            return;
        }
        self.page_visible = visible;

        if visible {
            for (view, state) in &self.views {
                if state.intersecting == Some(true) {
                    registry.play(*view);
                }
            }
        } else {
            registry.pause_all();
        }
    }
}

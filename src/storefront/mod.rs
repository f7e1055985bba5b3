//! Storefront core: pagination, infinite scroll, pull-to-refresh and
//! animation visibility, coordinated over one in-memory catalog.
//!
//! Nothing here knows about the terminal. The host reports scroll offsets,
//! sentinel distances, visible ratios, touches and page visibility; the
//! storefront mutates its card list and the animation registry in response.

pub mod filters;
pub mod gesture;
pub mod header;
pub mod pagination;
pub mod sentinel;
pub mod visibility;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::animation::{AnimationBackend, AnimationHandle, AnimationRegistry, ViewId};
use crate::app::Result;
use crate::domain::Item;

pub use filters::{Dropdown, DropdownOption, FilterBar};
pub use gesture::{GesturePhase, Indicator, IndicatorLabel, MoveOutcome, PullToRefresh, ReleaseOutcome};
pub use header::HeaderCollapse;
pub use pagination::Pagination;
pub use sentinel::SentinelObserver;
pub use visibility::VisibilityCoordinator;

/// Tunables for one storefront instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontOptions {
    pub initial_batch: usize,
    pub batch_size: usize,
    pub pull_threshold: f32,
    pub indicator_height: f32,
    pub lookahead: f32,
    pub visibility_threshold: f32,
    pub header_height: f32,
    pub refresh_delay: Duration,
    /// Card animations still loading after this long are dropped.
    pub load_timeout: Duration,
}

impl Default for StorefrontOptions {
    fn default() -> Self {
        Self {
            initial_batch: pagination::DEFAULT_INITIAL_BATCH,
            batch_size: pagination::DEFAULT_BATCH_SIZE,
            pull_threshold: gesture::DEFAULT_PULL_THRESHOLD,
            indicator_height: 48.0,
            lookahead: sentinel::DEFAULT_LOOKAHEAD,
            visibility_threshold: visibility::DEFAULT_VISIBILITY_THRESHOLD,
            header_height: 48.0,
            refresh_delay: Duration::from_millis(1500),
            load_timeout: Duration::from_secs(10),
        }
    }
}

/// One rendered item. `view` is `None` when no animation could be mounted
/// or the animation failed to load.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub item: Item,
    pub view: Option<ViewId>,
}

pub struct Storefront {
    options: StorefrontOptions,
    backend: Arc<dyn AnimationBackend>,
    catalog: Vec<Item>,
    cards: Vec<Card>,
    pagination: Pagination,
    sentinel: SentinelObserver,
    gesture: PullToRefresh,
    visibility: VisibilityCoordinator,
    header: HeaderCollapse,
    filters: FilterBar,
    registry: AnimationRegistry,
    user_icon: Option<ViewId>,
}

impl Storefront {
    pub fn new(
        options: StorefrontOptions,
        backend: Arc<dyn AnimationBackend>,
        catalog: Vec<Item>,
    ) -> Self {
        let pagination = Pagination::new(
            catalog.len(),
            options.initial_batch.max(1),
            options.batch_size.max(1),
        );
        Self {
            sentinel: SentinelObserver::new(options.lookahead),
            gesture: PullToRefresh::new(options.pull_threshold, options.indicator_height),
            visibility: VisibilityCoordinator::new(options.visibility_threshold),
            header: HeaderCollapse::new(options.header_height),
            filters: FilterBar::default(),
            registry: AnimationRegistry::new(),
            cards: Vec::new(),
            user_icon: None,
            pagination,
            catalog,
            backend,
            options,
        }
    }

    pub fn options(&self) -> &StorefrontOptions {
        &self.options
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn gesture(&self) -> &PullToRefresh {
        &self.gesture
    }

    pub fn visibility(&self) -> &VisibilityCoordinator {
        &self.visibility
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    pub fn user_icon(&self) -> Option<ViewId> {
        self.user_icon
    }

    pub fn is_header_hidden(&self) -> bool {
        self.header.is_hidden()
    }

    pub fn filters(&self) -> &FilterBar {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterBar {
        &mut self.filters
    }

    pub fn animation(&self, view: ViewId) -> Option<&dyn AnimationHandle> {
        self.registry.get(view)
    }

    /// Mount the header's avatar animation. It counts as always visible.
    pub fn mount_user_icon(&mut self, source: &str) -> Result<ViewId> {
        let url = Url::parse(source.trim())?;
        let view = self.registry.register(self.backend.mount(&url));
        self.visibility.observe(view);
        self.visibility.report_ratio(view, 1.0, &mut self.registry);
        self.user_icon = Some(view);
        Ok(view)
    }

    fn mount_card(&mut self, item: &Item) -> Option<ViewId> {
        match item.source_url() {
            Ok(url) => Some(self.registry.register(self.backend.mount(&url))),
            Err(err) => {
                tracing::warn!(
                    id = %item.id,
                    source = %item.animation_source,
                    %err,
                    "Could not create animation: source missing"
                );
                None
            }
        }
    }

    /// Append the next batch of cards. Returns how many were appended; zero
    /// when a load is already running or the catalog is exhausted.
    pub fn load_more(&mut self) -> usize {
        let Some(range) = self.pagination.begin() else {
            return 0;
        };

        let items = self.catalog[range].to_vec();
        let appended = items.len();
        for item in items {
            let view = self.mount_card(&item);
            if let Some(view) = view {
                self.visibility.observe(view);
            }
            self.cards.push(Card { item, view });
        }

        self.pagination.complete(appended);
        self.sentinel.rearm();
        tracing::debug!(
            appended,
            loaded = self.pagination.loaded(),
            has_more = self.pagination.has_more(),
            "Loaded cards"
        );
        appended
    }

    /// Feed the sentinel's distance below the viewport bottom. Loads a batch
    /// when the sentinel enters the lookahead margin.
    pub fn observe_sentinel(&mut self, distance: f32) -> usize {
        if self.sentinel.observe(distance, &self.pagination) {
            self.load_more()
        } else {
            0
        }
    }

    /// The filter bar collapses with the header; open dropdowns close.
    pub fn on_scroll(&mut self, scroll_top: f32) -> bool {
        let hidden = self.header.on_scroll(scroll_top);
        if hidden {
            self.filters.close_all();
        }
        hidden
    }

    pub fn report_visible_ratio(&mut self, view: ViewId, ratio: f32) {
        self.visibility.report_ratio(view, ratio, &mut self.registry);
    }

    pub fn hover(&mut self, view: Option<ViewId>) {
        self.visibility.hover(view, &mut self.registry);
    }

    pub fn set_page_visible(&mut self, visible: bool) {
        tracing::debug!(visible, "Page visibility changed");
        self.visibility.set_page_visible(visible, &mut self.registry);
    }

    pub fn touch_start(&mut self, y: f32) {
        self.gesture.touch_start(y);
    }

    pub fn touch_move(&mut self, y: f32, scroll_top: f32) -> MoveOutcome {
        self.gesture.touch_move(y, scroll_top)
    }

    pub fn touch_end(&mut self, scroll_top: f32) -> ReleaseOutcome {
        let outcome = self.gesture.touch_end(scroll_top);
        if outcome == ReleaseOutcome::Refresh {
            tracing::info!("Performing refresh...");
        }
        outcome
    }

    pub fn simulate_pull(&mut self) -> ReleaseOutcome {
        let outcome = self.gesture.simulate_pull();
        if outcome == ReleaseOutcome::Refresh {
            tracing::info!("Performing refresh...");
        }
        outcome
    }

    /// Swap in a fresh catalog after the refresh delay: drop every card,
    /// restart pagination and load the first batch. Ignored unless a refresh
    /// is running.
    pub fn complete_refresh(&mut self, catalog: Vec<Item>) -> bool {
        if !self.gesture.is_refreshing() {
            return false;
        }

        self.clear_cards();
        self.pagination.reset(catalog.len());
        self.catalog = catalog;
        self.sentinel.rearm();
        self.header.reset();
        self.load_more();
        self.gesture.finish_refresh();
        tracing::info!(loaded = self.pagination.loaded(), "Refresh complete!");
        true
    }

    /// Leave the refreshing state without touching the cards.
    pub fn abort_refresh(&mut self) -> bool {
        self.gesture.finish_refresh()
    }

    fn clear_cards(&mut self) {
        for card in self.cards.drain(..) {
            if let Some(view) = card.view {
                self.visibility.unobserve(view);
                self.registry.unregister(view);
            }
        }
    }

    /// Advance playing animations and drop the ones that failed to load or
    /// never finished loading.
    pub fn tick(&mut self) {
        self.registry.tick();
        let mut failed = self.registry.evict_failed();
        failed.extend(self.registry.evict_stalled(self.options.load_timeout));
        if failed.is_empty() {
            return;
        }
        for view in &failed {
            self.visibility.unobserve(*view);
        }
        for card in &mut self.cards {
            if card.view.is_some_and(|view| failed.contains(&view)) {
                card.view = None;
            }
        }
        if self.user_icon.is_some_and(|view| failed.contains(&view)) {
            self.user_icon = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::FakeBackend;

    fn catalog(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| {
                Item::new(
                    format!("#{}", 1000 + i),
                    format!("Generic NFT {}", i + 1),
                    1.0 + i as f64,
                    FakeBackend::url(&format!("item-{i}")).to_string(),
                )
            })
            .collect()
    }

    fn storefront(n: usize) -> Storefront {
        Storefront::new(
            StorefrontOptions::default(),
            Arc::new(FakeBackend::new()),
            catalog(n),
        )
    }

    #[test]
    fn test_load_more_scenario_over_100_items() {
        let mut store = storefront(100);

        assert_eq!(store.load_more(), 24);
        assert_eq!(store.pagination().loaded(), 24);
        assert_eq!(store.load_more(), 12);
        assert_eq!(store.pagination().loaded(), 36);
        for _ in 0..5 {
            store.load_more();
        }
        assert_eq!(store.pagination().loaded(), 96);

        assert_eq!(store.load_more(), 4);
        assert_eq!(store.pagination().loaded(), 100);
        assert!(!store.pagination().has_more());

        assert_eq!(store.load_more(), 0);
        assert_eq!(store.cards().len(), 100);
        assert!(!store.pagination().is_loading());
    }

    #[test]
    fn test_cards_follow_catalog_order_and_register_handles() {
        let mut store = storefront(30);
        store.load_more();

        assert_eq!(store.cards()[0].item.id, "#1000");
        assert_eq!(store.cards()[23].item.id, "#1023");
        assert_eq!(store.registry().len(), 24);
        assert!(store
            .cards()
            .iter()
            .all(|card| store.visibility().is_observed(card.view.unwrap())));
    }

    #[test]
    fn test_sentinel_drives_pagination() {
        let mut store = storefront(100);
        store.load_more();

        assert_eq!(store.observe_sentinel(900.0), 0);
        assert_eq!(store.observe_sentinel(150.0), 12);
        // re-armed after the append, still inside the margin
        assert_eq!(store.observe_sentinel(120.0), 12);
        assert_eq!(store.observe_sentinel(900.0), 0);
        assert_eq!(store.pagination().loaded(), 48);
    }

    #[test]
    fn test_pull_to_refresh_scenario() {
        let mut store = storefront(100);
        store.load_more();
        store.load_more();
        assert_eq!(store.pagination().loaded(), 36);

        store.touch_start(500.0);
        store.touch_move(560.0, 0.0);
        assert_eq!(store.gesture().phase(), GesturePhase::Pulling);
        store.touch_move(700.0, 0.0);
        assert_eq!(store.gesture().phase(), GesturePhase::ReleaseReady);
        assert_eq!(store.touch_end(0.0), ReleaseOutcome::Refresh);
        assert_eq!(store.gesture().phase(), GesturePhase::Refreshing);

        assert!(store.complete_refresh(catalog(100)));
        assert_eq!(store.gesture().phase(), GesturePhase::Idle);
        assert_eq!(store.pagination().loaded(), 24);
        assert!(store.pagination().has_more());
        assert_eq!(store.cards().len(), 24);
        assert!(!store.gesture().indicator().is_visible());
    }

    #[test]
    fn test_refresh_releases_registry_slots() {
        let mut store = storefront(100);
        store.mount_user_icon(FakeBackend::url("avatar").as_str()).unwrap();
        store.load_more();
        store.load_more();
        let capacity = store.registry().capacity();

        for _ in 0..3 {
            assert_eq!(store.simulate_pull(), ReleaseOutcome::Refresh);
            assert!(store.complete_refresh(catalog(100)));
        }
        assert_eq!(store.registry().len(), 24 + 1);
        assert_eq!(store.registry().capacity(), capacity);
        assert!(store.user_icon().is_some());
    }

    #[test]
    fn test_short_pull_never_touches_pagination() {
        let mut store = storefront(100);
        store.load_more();

        store.touch_start(500.0);
        store.touch_move(600.0, 0.0);
        assert_eq!(store.touch_end(0.0), ReleaseOutcome::Cancelled);
        assert_eq!(store.gesture().phase(), GesturePhase::Idle);
        assert!(!store.complete_refresh(catalog(10)));
        assert_eq!(store.pagination().loaded(), 24);
        assert_eq!(store.cards().len(), 24);
    }

    #[test]
    fn test_second_completion_is_ignored() {
        let mut store = storefront(100);
        store.load_more();
        store.simulate_pull();

        assert!(store.complete_refresh(catalog(50)));
        assert!(!store.complete_refresh(catalog(10)));
        assert_eq!(store.pagination().total(), 50);
    }

    #[test]
    fn test_refresh_resets_exhausted_catalog() {
        let mut store = storefront(20);
        store.load_more();
        assert!(!store.pagination().has_more());

        store.simulate_pull();
        store.complete_refresh(catalog(40));
        assert_eq!(store.pagination().loaded(), 24);
        assert!(store.pagination().has_more());
    }

    #[test]
    fn test_abort_refresh_keeps_cards() {
        let mut store = storefront(100);
        store.load_more();
        store.simulate_pull();

        assert!(store.abort_refresh());
        assert_eq!(store.gesture().phase(), GesturePhase::Idle);
        assert_eq!(store.cards().len(), 24);
    }

    #[test]
    fn test_missing_source_skips_animation_only() {
        let mut items = catalog(3);
        items[1].animation_source = String::new();
        let mut store = Storefront::new(
            StorefrontOptions::default(),
            Arc::new(FakeBackend::new()),
            items,
        );

        assert_eq!(store.load_more(), 3);
        assert!(store.cards()[1].view.is_none());
        assert_eq!(store.registry().len(), 2);
    }

    #[test]
    fn test_failed_animation_is_evicted_without_blocking() {
        let items = catalog(30);
        let backend = FakeBackend::new().failing("item-2");
        let mut store =
            Storefront::new(StorefrontOptions::default(), Arc::new(backend), items);
        store.load_more();
        let failed_view = store.cards()[2].view.unwrap();

        store.tick();
        assert!(store.cards()[2].view.is_none());
        assert!(!store.registry().contains(failed_view));
        assert!(!store.visibility().is_observed(failed_view));
        assert_eq!(store.registry().len(), 23);
        assert_eq!(store.load_more(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_animation_times_out() {
        let backend = FakeBackend::new().pending();
        let mut store =
            Storefront::new(StorefrontOptions::default(), Arc::new(backend), catalog(30));
        store.load_more();

        store.tick();
        assert_eq!(store.registry().len(), 24);

        tokio::time::advance(store.options().load_timeout).await;
        store.tick();
        assert!(store.registry().is_empty());
        assert!(store.cards().iter().all(|card| card.view.is_none()));
        assert_eq!(store.cards().len(), 24);
    }

    #[test]
    fn test_page_hidden_overrides_visible_cards() {
        let mut store = storefront(30);
        store.load_more();
        let views: Vec<_> = store.cards().iter().map(|c| c.view.unwrap()).collect();
        for view in &views[..4] {
            store.report_visible_ratio(*view, 1.0);
        }

        store.set_page_visible(false);
        assert!(views
            .iter()
            .all(|v| !store.animation(*v).unwrap().is_playing()));

        store.set_page_visible(true);
        for (i, view) in views.iter().enumerate() {
            assert_eq!(store.animation(*view).unwrap().is_playing(), i < 4);
        }
    }

    #[test]
    fn test_filters_collapse_with_header() {
        let mut store = storefront(30);
        store.filters_mut().toggle(0);
        assert!(!store.on_scroll(10.0));
        assert_eq!(store.filters().open_dropdown(), Some(0));

        assert!(store.on_scroll(200.0));
        assert_eq!(store.filters().open_dropdown(), None);
    }

    #[test]
    fn test_bad_user_icon_source_is_an_error() {
        let mut store = storefront(0);
        let err = store.mount_user_icon("not a url").unwrap_err();
        assert!(matches!(err, crate::app::PortalsError::InvalidSource(_)));
        assert!(store.user_icon().is_none());
    }

    #[test]
    fn test_user_icon_pauses_with_page() {
        let mut store = storefront(0);
        store.mount_user_icon(FakeBackend::url("avatar").as_str()).unwrap();
        let icon = store.user_icon().unwrap();
        assert!(store.animation(icon).unwrap().is_playing());

        store.set_page_visible(false);
        assert!(!store.animation(icon).unwrap().is_playing());
        store.set_page_visible(true);
        assert!(store.animation(icon).unwrap().is_playing());
    }
}

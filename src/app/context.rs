use std::sync::Arc;

use crate::animation::{AnimationBackend, GlyphBackend};
use crate::config::Config;
use crate::domain::{ItemSource, MockCatalog};

/// Wires the configuration to the animation backend and the item source.
pub struct AppContext {
    pub config: Arc<Config>,
    pub backend: Arc<dyn AnimationBackend>,
    pub source: Arc<dyn ItemSource>,
}

impl AppContext {
    /// Glyph animations and a generated catalog. `seed` pins the first
    /// catalog; each refresh advances it.
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let catalog = MockCatalog::new(config.storefront.catalog_size, seed);
        Self::with_parts(config, Arc::new(GlyphBackend::new()), Arc::new(catalog))
    }

    pub fn with_parts(
        config: Config,
        backend: Arc<dyn AnimationBackend>,
        source: Arc<dyn ItemSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            source,
        }
    }
}

//! In-memory item source.
//!
//! The storefront never talks to a backend. [`MockCatalog`] generates a fixed
//! set of featured items followed by randomly priced filler items, and every
//! fetch reseeds so a refresh yields a fresh generation.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::Result;
use crate::domain::Item;

pub const SKULLFLOWER: &str = "https://nft.fragment.com/gift/skullflower-12626.lottie.json";
pub const PLUSHPEPE: &str = "https://nft.fragment.com/gift/plushpepe-1626.lottie.json";
pub const DUROVSCAP: &str = "https://nft.fragment.com/gift/durovscap-1727.lottie.json";
pub const LOLLIPOP: &str = "https://nft.fragment.com/gift/heartlocket-876.lottie.json";
pub const CALENDAR: &str = "https://nft.fragment.com/gift/deskcalendar-67890.lottie.json";
pub const SAKURA: &str = "https://nft.fragment.com/gift/sakuraflower-11223.lottie.json";
pub const CAKE: &str = "https://nft.fragment.com/gift/skullflower-8765.lottie.json";

/// Animation shown next to the header title.
pub const USER_ICON: &str = SKULLFLOWER;

/// Sources filler items pick from. The user icon source is excluded.
pub const FILLER_SOURCES: [&str; 6] = [PLUSHPEPE, DUROVSCAP, LOLLIPOP, CALENDAR, SAKURA, CAKE];

pub const DEFAULT_CATALOG_SIZE: usize = 100;

/// Supplies the ordered item sequence at startup and again on every refresh.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Item>>;
}

#[derive(Debug)]
pub struct MockCatalog {
    size: usize,
    next_seed: AtomicU64,
}

impl MockCatalog {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            size,
            next_seed: AtomicU64::new(seed),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Generate a catalog and advance the seed for the next call.
    pub fn generate(&self) -> Vec<Item> {
        let seed = self.next_seed.fetch_add(1, Ordering::Relaxed);
        generate_with_seed(self.size, seed)
    }
}

#[async_trait]
impl ItemSource for MockCatalog {
    async fn fetch(&self) -> Result<Vec<Item>> {
        let items = self.generate();
        tracing::debug!(count = items.len(), "Generated catalog");
        Ok(items)
    }
}

fn featured() -> Vec<Item> {
    vec![
        Item::new("#1000", "Generic NFT 1", 0.89, SKULLFLOWER),
        Item::new("#1001", "Generic NFT 2", 0.72, LOLLIPOP),
        Item::new("#1002", "Generic NFT 3", 1.16, CALENDAR),
        Item::new("#1003", "Generic NFT 4", 2.2, SAKURA),
        Item::new("#1004", "Generic NFT 5", 4.75, PLUSHPEPE),
        Item::new("#1005", "Generic NFT 6", 5.03, SKULLFLOWER),
        Item::new("#1727", "Durov's cap", 200200.0, DUROVSCAP),
        Item::new("#1006", "Generic NFT 7", 1.5, SAKURA),
        Item::new("#1007", "Generic NFT 8", 3.2, PLUSHPEPE),
    ]
}

/// Deterministic generation for a given seed.
pub fn generate_with_seed(size: usize, seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut items = featured();
    items.truncate(size);

    let filler = size.saturating_sub(items.len());
    items.extend((0..filler).map(|i| {
        let source = FILLER_SOURCES[rng.random_range(0..FILLER_SOURCES.len())];
        let raw_price = rng.random::<f64>() * 10.0 + 0.5;
        Item::new(
            format!("#{:04}", 1000 + i + 8),
            format!("Generic NFT {}", i + 9),
            (raw_price * 100.0).round() / 100.0,
            source,
        )
    }));

    items
}

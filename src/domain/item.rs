use serde::{Deserialize, Serialize};
use url::Url;

/// A collectible shown as one card in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub animation_source: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        animation_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            animation_source: animation_source.into(),
        }
    }

    /// Price with two decimals, as printed on the buy button.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }

    pub fn source_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.animation_source.trim())
    }
}

pub mod catalog;
pub mod item;

pub use catalog::{ItemSource, MockCatalog};
pub use item::Item;

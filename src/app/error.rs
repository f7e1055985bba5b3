use thiserror::Error;

use crate::animation::AnimationError;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PortalsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Invalid animation source: {0}")]
    InvalidSource(#[from] url::ParseError),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, PortalsError>;

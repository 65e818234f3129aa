//! Error types raised while setting up a carousel.
//!
//! Index handling never fails; only strategy registration/lookup and strict
//! configuration parsing produce errors.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PagerError {
    /// No strategy was registered under the requested name.
    #[error("unknown animation strategy '{name}'")]
    UnknownStrategy { name: String },

    /// A strategy with this name already exists in the registry.
    #[error("animation strategy '{name}' is already registered")]
    DuplicateStrategy { name: String },

    /// Strategy names must be non-empty and free of surrounding whitespace.
    #[error("invalid animation strategy name '{name}'")]
    InvalidStrategyName { name: String },

    /// Strict configuration parsing failed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PagerError>;

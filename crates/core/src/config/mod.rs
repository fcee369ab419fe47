//! Service configuration: TOML file, environment overrides, validation.

mod loader;
mod types;
mod validate;

pub use loader::*;
pub use types::*;
pub use validate::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid config: {0}")]
    ParseError(String),

    #[error("Config rejected: {0}")]
    ValidationError(String),
}

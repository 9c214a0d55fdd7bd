//! Error types for configuration loading

use thiserror::Error;

/// Errors surfaced at the edges of the simulation.
///
/// Gameplay itself never fails; only loading and validating configuration can.
#[derive(Debug, Error)]
pub enum GameError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `GameConfig`
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidOverride { name: String, value: String },

    /// Values parsed but make no sense together
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, GameError>;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the simulation loop: config loading, logging setup and
/// the terminal front end.
/// The per-frame update never fails.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;

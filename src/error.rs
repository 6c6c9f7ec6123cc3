/// Error types for the ambient layers: configuration, score file and the
/// terminal. The game core itself has no failure paths.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("score file {path} does not hold a score: {contents:?}")]
    ScoreParse { path: PathBuf, contents: String },
}

/// Convenience alias: a `Result` using [`GameError`] as the error type.
pub type GameResult<T> = Result<T, GameError>;

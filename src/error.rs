use std::path::PathBuf;

/// Errors produced by the core game logic.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid action index {0} (valid actions: 0..4)")]
    InvalidAction(usize),
}

/// Errors that can occur when saving or loading a Q-table.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed table file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("table holds {values} values but its shape implies {expected}")]
    LengthMismatch { values: usize, expected: usize },
}

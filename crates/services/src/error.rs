//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use game_core::model::GameId;

/// Errors emitted while loading or querying the game catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog path {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse game file {file}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("game {game} has invalid content")]
    Invalid {
        game: GameId,
        #[source]
        source: game_core::Error,
    },
    #[error("game id {0} is defined more than once")]
    DuplicateGame(GameId),
    #[error("category {category} has more than one game at index {index}")]
    DuplicateIndex { category: String, index: u32 },
    #[error("unknown game {0}")]
    UnknownGame(GameId),
    #[error("catalog has no games")]
    Empty,
}

/// Errors emitted while assembling app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

use std::io;

use thiserror::Error;

/// Errors surfaced by the engine library. The binary maps each to one line
/// on stderr and a non-zero exit code.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("unrecognized argument: {0}")]
    UnrecognizedArgument(String),

    #[error("failed to read {path}: {source}")]
    HistoryRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    MoveWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}

//! Error type shared by every stage of basin delineation.
use thiserror::Error;

/// Failures surfaced by `basins-core`.
///
/// Shape and length errors are input problems and abort a run before any
/// cell is touched. `QueueOverflow` signals a sizing defect inside the
/// filler and is never expected with a correctly built queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasinError {
    #[error("grid shape mismatch: directions are {dir_rows}x{dir_cols}, streams are {stream_rows}x{stream_cols}")]
    ShapeMismatch {
        dir_rows: usize,
        dir_cols: usize,
        stream_rows: usize,
        stream_cols: usize,
    },
    #[error("grid has no cells ({rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("grid data length {len} does not match {rows}x{cols}")]
    DataLength { rows: usize, cols: usize, len: usize },
    #[error("fill queue overflow at capacity {capacity}")]
    QueueOverflow { capacity: usize },
}

pub type Result<T> = std::result::Result<T, BasinError>;

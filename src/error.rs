use thiserror::Error;

/// Errors produced while building grids or advancing generations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("bad pattern: {0}")]
    Pattern(String),

    /// A generation could not be computed; no partial grid is returned.
    #[error("generation computation failed: {0}")]
    ComputationFailure(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;

//! Error types for cell grouping and tiling operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CellGroupError>;

#[derive(Debug, Error)]
pub enum CellGroupError {
    /// The adjacency oracle failed or broke its own contract. Grouping is
    /// aborted and no partial partition is returned.
    #[error("Invalid adjacency oracle at cell {cell}: {reason}")]
    InvalidOracle { cell: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resolution {resolution} out of range [0, {max}]")]
    InvalidResolution { resolution: u8, max: u8 },

    #[error("Invalid cell identifier: {0}")]
    InvalidCell(String),

    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),

    #[error("Serialization error: {0}")]
    SerializationErrorWithContext(String),

    #[error("{0}")]
    Other(String),
}

impl CellGroupError {
    pub(crate) fn invalid_oracle(cell: &impl std::fmt::Debug, reason: impl ToString) -> Self {
        CellGroupError::InvalidOracle {
            cell: format!("{:?}", cell),
            reason: reason.to_string(),
        }
    }
}

impl From<geohash::GeohashError> for CellGroupError {
    fn from(e: geohash::GeohashError) -> Self {
        CellGroupError::InvalidGeohash(e.to_string())
    }
}

impl From<serde_json::Error> for CellGroupError {
    fn from(e: serde_json::Error) -> Self {
        CellGroupError::SerializationErrorWithContext(e.to_string())
    }
}

// Error types shared across the extraction and export paths

use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input string yielded no usable profile handle
    #[error("no usable handle in {0:?}")]
    InvalidProfile(String),

    /// Export requested with an empty song list
    #[error("no songs to export - run an extraction first")]
    NothingToExport,

    /// Destination file could not be written
    #[error("export failed: {0}")]
    ExportIo(#[from] std::io::Error),

    /// Song list could not be serialized
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

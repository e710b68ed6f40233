//! Source trait abstraction.

use async_trait::async_trait;
use sprintlens_core::RawObservation;

/// Error type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while fetching observation rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// A provider of raw observation rows.
///
/// This trait is the seam between the pure analytics engine and whatever
/// import layer feeds it: tracker exports, local files, cached API
/// responses. Implementations own their transport concerns, including
/// rate limiting.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetch every available observation row.
    async fn fetch(&self) -> Result<Vec<RawObservation>>;
}

//! JSON file source implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use sprintlens_core::RawObservation;
use tokio::fs;
use tracing::info;

use super::{ObservationSource, Result, TokenBucket};

/// Reads observation rows from a JSON array on disk.
///
/// This is the reference implementation of [`ObservationSource`]: the
/// shape a tracker-API source would take, minus the transport. The rate
/// limiter is injected so that a shared bucket can span several sources
/// hitting the same backend.
pub struct JsonFileSource {
    path: PathBuf,
    limiter: Arc<TokenBucket>,
}

impl JsonFileSource {
    /// Create a source for the given file.
    pub fn new(path: impl AsRef<Path>, limiter: Arc<TokenBucket>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limiter,
        }
    }
}

#[async_trait]
impl ObservationSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<RawObservation>> {
        self.limiter.acquire().await;
        let text = fs::read_to_string(&self.path).await?;
        let rows: Vec<RawObservation> = serde_json::from_str(&text)?;
        info!(rows = rows.len(), path = %self.path.display(), "loaded observation rows");
        Ok(rows)
    }
}

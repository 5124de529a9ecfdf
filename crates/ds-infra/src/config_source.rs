use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed source for the host-supplied partial configuration.
///
/// The file holds the same JSON object an embedding host would pass
/// directly; validation and defaulting happen in `ds_core::config`, not
/// here.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the partial configuration.
    pub async fn load(&self) -> Result<Value> {
        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read widget config failed: {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parse widget config failed: {}", self.path.display()))
    }
}

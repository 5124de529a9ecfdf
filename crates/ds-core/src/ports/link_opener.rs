use anyhow::Result;

/// Opens an external URL in the host's browser surface.
#[async_trait::async_trait]
pub trait LinkOpenerPort: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

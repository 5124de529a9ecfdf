use std::sync::Mutex;

use anyhow::Result;
use ds_core::ports::LinkOpenerPort;
use tracing::info;

/// Headless link opener: logs the URL and keeps it for assertions.
#[derive(Default)]
pub struct LoggingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl LoggingLinkOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LinkOpenerPort for LoggingLinkOpener {
    async fn open(&self, url: &str) -> Result<()> {
        info!(url, "opening external link");
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

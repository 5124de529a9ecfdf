use std::sync::Mutex;

use anyhow::Result;
use ds_core::ports::{RenderFrame, RenderPort};
use tracing::info;

/// Renderer for headless runs: logs a one-line summary per frame.
#[derive(Default)]
pub struct LoggingRenderer;

#[async_trait::async_trait]
impl RenderPort for LoggingRenderer {
    async fn render(&self, frame: RenderFrame) -> Result<()> {
        info!(
            heading = %frame.heading,
            matched = frame.matched,
            total = frame.total,
            show_add = frame.show_add,
            show_delete = frame.show_delete,
            "frame"
        );
        Ok(())
    }
}

/// Renderer that retains every frame, newest last.
///
/// The render loop is fire-and-observe, so tests assert against the
/// recorded frames instead of return values.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Mutex<Vec<RenderFrame>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<RenderFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.frames.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl RenderPort for RecordingRenderer {
    async fn render(&self, frame: RenderFrame) -> Result<()> {
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}

//! Local photo previews
//!
//! Encoding a photo as a data URI can be slow for large files, so it runs on
//! a blocking task off the interactive loop. The preview exists purely for
//! immediate user feedback; a failed or slow preview never affects the
//! submission itself.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::FutureExt as _;
use tokio::task::JoinHandle;

use super::ImageAttachment;

/// Render an attachment as a `data:` URI.
pub fn data_uri(image: &ImageAttachment) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        BASE64.encode(&image.bytes)
    )
}

/// Holds the background preview task and its result once finished.
pub(crate) struct PreviewSlot {
    task: Option<JoinHandle<String>>,
    ready: Option<String>,
}

impl PreviewSlot {
    pub(crate) fn new() -> Self {
        Self { task: None, ready: None }
    }

    /// Start rendering a preview, replacing any previous one.
    pub(crate) fn start(&mut self, image: &ImageAttachment) {
        let image = image.clone();
        self.ready = None;
        self.task = Some(tokio::task::spawn_blocking(move || data_uri(&image)));
    }

    /// Harvest the task result if it finished. Non-blocking; a task that
    /// panicked is dropped silently.
    pub(crate) fn poll(&mut self) {
        if self.task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.task.take() {
                if let Some(Ok(uri)) = task.now_or_never() {
                    self.ready = Some(uri);
                }
            }
        }
    }

    pub(crate) fn ready(&self) -> Option<&str> {
        self.ready.as_deref()
    }

    pub(crate) fn set_ready(&mut self, uri: String) {
        self.ready = Some(uri);
    }

    pub(crate) fn take_task(&mut self) -> Option<JoinHandle<String>> {
        self.task.take()
    }
}

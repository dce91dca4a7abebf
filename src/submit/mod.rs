//! Activity submission pipeline
//!
//! Validates a draft record client-side, encodes it (with an optional photo)
//! for the multipart upload endpoint, and reports the outcome. While a
//! submission is in flight, further attempts are rejected rather than
//! queued. An attached photo also gets a local data-URI preview rendered on
//! a background task; the preview never blocks or fails a submission.

mod preview;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{CategoryId, SubmitReceipt};
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::session::Session;

use preview::PreviewSlot;

pub use preview::data_uri;

/// A photo attached to an activity, held raw for transmission.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Load a photo from disk, inferring its MIME type from the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Attachment {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self { filename, content_type, bytes })
    }
}

/// A candidate record as entered in the form, fields still raw text.
#[derive(Debug, Clone, Default)]
pub struct ActivityDraft {
    pub category_id: String,
    pub description: String,
    pub points: String,
    pub carbon_offset: String,
    pub image: Option<ImageAttachment>,
}

impl ActivityDraft {
    /// Pre-flight validation. A failure here means no network call is made.
    pub fn validate(&self) -> Result<ActivityRequest> {
        let category_id = self.category_id.trim();
        let description = self.description.trim();
        let points = self.points.trim();
        let carbon_offset = self.carbon_offset.trim();

        if category_id.is_empty()
            || description.is_empty()
            || points.is_empty()
            || carbon_offset.is_empty()
        {
            return Err(Error::Validation("please fill in all fields".to_string()));
        }

        let category_id: CategoryId = category_id
            .parse()
            .map_err(|_| Error::Validation("category must be a catalog id".to_string()))?;
        let points: u32 = points.parse().map_err(|_| {
            Error::Validation("points must be a non-negative whole number".to_string())
        })?;
        let carbon_offset: f64 = carbon_offset
            .parse()
            .map_err(|_| Error::Validation("carbon offset must be a number".to_string()))?;
        if !carbon_offset.is_finite() || carbon_offset < 0.0 {
            return Err(Error::Validation(
                "carbon offset must be a non-negative number".to_string(),
            ));
        }

        Ok(ActivityRequest {
            category_id,
            description: description.to_string(),
            points,
            carbon_offset,
            image: self.image.clone(),
        })
    }
}

/// A validated record, ready for the upload endpoint.
#[derive(Debug, Clone)]
pub struct ActivityRequest {
    pub category_id: CategoryId,
    pub description: String,
    pub points: u32,
    /// Kilograms of CO2.
    pub carbon_offset: f64,
    pub image: Option<ImageAttachment>,
}

/// Result of a settled submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The backend accepted the activity. The caller should invalidate the
    /// dashboard snapshot and activity history.
    Accepted(SubmitReceipt),
    /// The session changed while the call was in flight; the response was
    /// discarded and nothing else happened.
    Stale,
}

struct SubmitState {
    submitting: bool,
    preview: PreviewSlot,
}

/// Drives drafts through validation and the upload endpoint.
pub struct Submitter {
    gateway: Arc<dyn Gateway>,
    session: Session,
    state: Mutex<SubmitState>,
}

impl Submitter {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(SubmitState {
                submitting: false,
                preview: PreviewSlot::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SubmitState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    /// The data-URI preview of the last attached photo, once its background
    /// task has finished. `None` while pending or if rendering failed.
    pub fn preview(&self) -> Option<String> {
        let mut state = self.state();
        state.preview.poll();
        state.preview.ready().map(str::to_string)
    }

    /// Wait for the pending preview task, if any, and return the result.
    pub async fn wait_preview(&self) -> Option<String> {
        let task = self.state().preview.take_task();
        if let Some(task) = task {
            if let Ok(uri) = task.await {
                self.state().preview.set_ready(uri);
            }
        }
        self.preview()
    }

    /// Validate and submit a draft. Exactly one upload call is issued for a
    /// valid draft; invalid drafts and attempts made while another
    /// submission is pending never reach the network.
    pub async fn submit(&self, draft: &ActivityDraft) -> Result<SubmitOutcome> {
        self.session.require_user()?;
        let request = draft.validate()?;

        {
            let mut state = self.state();
            if state.submitting {
                return Err(Error::SubmitInFlight);
            }
            if let Some(image) = &request.image {
                state.preview.start(image);
            }
            state.submitting = true;
        }

        let tag = self.session.tag();
        let result = self.gateway.submit_activity(&request).await;
        self.state().submitting = false;

        if !tag.is_current(&self.session) {
            tracing::debug!("discarding submit response for a superseded session");
            return Ok(SubmitOutcome::Stale);
        }

        Ok(SubmitOutcome::Accepted(result?))
    }
}

//! Typed boundary to the EcoBuddy backend
//!
//! All network I/O of the client core goes through the [`Gateway`] trait,
//! one operation per backend capability. The gateway performs no retries;
//! a failed call surfaces immediately to the component that issued it.

mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    Activity, AuthSession, Category, Challenge, ChallengeEntry, ChallengeId, GlobalEntry,
    JoinReceipt, Participation, RegisterRequest, StatsSummary, SubmitReceipt, UserId,
};
use crate::submit::ActivityRequest;

pub use http::HttpGateway;

/// A gateway call failed or the backend returned non-success.
///
/// `message` carries the backend's `detail` field when one was present,
/// otherwise a generic description; it is shown to the user verbatim.
/// `status` is `None` when the request never reached the backend.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    /// A failure without an HTTP status (connection refused, DNS, ...).
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    /// A failure carrying the backend's HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), message: message.into() }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Request/response boundary to the backend, one method per capability.
///
/// Components hold this as `Arc<dyn Gateway>`; tests substitute their own
/// recording implementation.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /login`
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, RemoteError>;

    /// `POST /register`
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, RemoteError>;

    /// `GET /activity-options`
    async fn categories(&self) -> Result<Vec<Category>, RemoteError>;

    /// `GET /challenges`
    async fn challenges(&self) -> Result<Vec<Challenge>, RemoteError>;

    /// `GET /user-challenges/{user_id}`
    async fn participations(&self, user_id: UserId) -> Result<Vec<Participation>, RemoteError>;

    /// `POST /upload-activity` (multipart)
    async fn submit_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<SubmitReceipt, RemoteError>;

    /// `POST /join-challenge`
    async fn join_challenge(&self, challenge_id: ChallengeId) -> Result<JoinReceipt, RemoteError>;

    /// `GET /leaderboard`
    async fn global_leaderboard(&self) -> Result<Vec<GlobalEntry>, RemoteError>;

    /// `GET /challenge-leaderboard/{challenge_id}`
    async fn challenge_leaderboard(
        &self,
        challenge_id: ChallengeId,
    ) -> Result<Vec<ChallengeEntry>, RemoteError>;

    /// `GET /user-stats/{user_id}`
    async fn user_stats(&self, user_id: UserId) -> Result<StatsSummary, RemoteError>;

    /// `GET /user-activities/{user_id}`
    async fn user_activities(&self, user_id: UserId) -> Result<Vec<Activity>, RemoteError>;
}

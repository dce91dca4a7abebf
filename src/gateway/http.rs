//! reqwest-backed gateway implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    Activity, AuthSession, Category, Challenge, ChallengeEntry, ChallengeId, GlobalEntry,
    JoinReceipt, Participation, RegisterRequest, StatsSummary, SubmitReceipt, UserId,
};
use crate::submit::ActivityRequest;

use super::{Gateway, RemoteError};

/// The backend wraps collection responses in single-key envelopes.
#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct ChallengesEnvelope {
    challenges: Vec<Challenge>,
}

#[derive(Deserialize)]
struct ParticipationsEnvelope {
    challenges: Vec<Participation>,
}

#[derive(Deserialize)]
struct ActivitiesEnvelope {
    activities: Vec<Activity>,
}

#[derive(Deserialize)]
struct LeaderboardEnvelope<T> {
    leaderboard: Vec<T>,
}

/// Error body shape used by the backend for all failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP implementation of [`Gateway`].
pub struct HttpGateway {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway for an unauthenticated session (login/register only).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attach the bearer token sent with every subsequent call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check the status and decode the body, extracting the backend's
    /// `detail` message on failure.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => format!("request failed with status {}", status.as_u16()),
            };
            return Err(RemoteError::status(status.as_u16(), message));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| {
            RemoteError::status(status.as_u16(), format!("invalid response body: {err}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let response = self.authed(self.http.get(self.url(path))).send().await?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, RemoteError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, RemoteError> {
        let response = self
            .http
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn categories(&self) -> Result<Vec<Category>, RemoteError> {
        let envelope: CategoriesEnvelope = self.get_json("/activity-options").await?;
        Ok(envelope.categories)
    }

    async fn challenges(&self) -> Result<Vec<Challenge>, RemoteError> {
        let envelope: ChallengesEnvelope = self.get_json("/challenges").await?;
        Ok(envelope.challenges)
    }

    async fn participations(&self, user_id: UserId) -> Result<Vec<Participation>, RemoteError> {
        let envelope: ParticipationsEnvelope =
            self.get_json(&format!("/user-challenges/{user_id}")).await?;
        Ok(envelope.challenges)
    }

    async fn submit_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<SubmitReceipt, RemoteError> {
        let mut form = reqwest::multipart::Form::new()
            .text("category_id", request.category_id.to_string())
            .text("description", request.description.clone())
            .text("points", request.points.to_string())
            .text("carbon_offset", request.carbon_offset.to_string());

        if let Some(image) = &request.image {
            let part = reqwest::multipart::Part::bytes(image.bytes.clone())
                .file_name(image.filename.clone())
                .mime_str(&image.content_type)
                .map_err(|err| RemoteError::transport(format!("invalid content type: {err}")))?;
            form = form.part("file", part);
        }

        let response = self
            .authed(self.http.post(self.url("/upload-activity")))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn join_challenge(&self, challenge_id: ChallengeId) -> Result<JoinReceipt, RemoteError> {
        let response = self
            .authed(self.http.post(self.url("/join-challenge")))
            .json(&serde_json::json!({ "challenge_id": challenge_id }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn global_leaderboard(&self) -> Result<Vec<GlobalEntry>, RemoteError> {
        let envelope: LeaderboardEnvelope<GlobalEntry> = self.get_json("/leaderboard").await?;
        Ok(envelope.leaderboard)
    }

    async fn challenge_leaderboard(
        &self,
        challenge_id: ChallengeId,
    ) -> Result<Vec<ChallengeEntry>, RemoteError> {
        let envelope: LeaderboardEnvelope<ChallengeEntry> = self
            .get_json(&format!("/challenge-leaderboard/{challenge_id}"))
            .await?;
        Ok(envelope.leaderboard)
    }

    async fn user_stats(&self, user_id: UserId) -> Result<StatsSummary, RemoteError> {
        self.get_json(&format!("/user-stats/{user_id}")).await
    }

    async fn user_activities(&self, user_id: UserId) -> Result<Vec<Activity>, RemoteError> {
        let envelope: ActivitiesEnvelope =
            self.get_json(&format!("/user-activities/{user_id}")).await?;
        Ok(envelope.activities)
    }
}

//! Shared test fixtures: a recording gateway double and domain builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tokio::sync::Semaphore;

use ecobuddy::domain::{
    Activity, AuthSession, Category, Challenge, ChallengeEntry, ChallengeId, GlobalEntry,
    JoinReceipt, JoinRecord, Participation, RegisterRequest, StatsSummary, SubmitReceipt, User,
    UserId,
};
use ecobuddy::gateway::{Gateway, RemoteError};
use ecobuddy::session::Session;
use ecobuddy::submit::ActivityRequest;

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

pub fn datetime(s: &str) -> NaiveDateTime {
    s.parse().expect("valid test datetime")
}

pub fn test_user(id: UserId) -> User {
    User {
        user_id: id,
        name: format!("User {id}"),
        email: format!("user{id}@ecobuddy.com"),
        user_type: "Individual".to_string(),
    }
}

/// A session already signed in as the given user.
pub fn signed_in(id: UserId) -> Session {
    let session = Session::new();
    session.complete_auth(AuthSession {
        access_token: format!("token-{id}"),
        token_type: "bearer".to_string(),
        user: test_user(id),
    });
    session
}

pub fn challenge(id: ChallengeId, end: &str) -> Challenge {
    Challenge {
        challenge_id: id,
        name: format!("Challenge {id}"),
        description: "A community challenge".to_string(),
        start_date: date("2025-11-01"),
        end_date: date(end),
        reward_points: 50,
        participant_count: 3,
        status: "Active".to_string(),
    }
}

pub fn participation(id: ChallengeId) -> Participation {
    Participation {
        challenge_id: id,
        name: format!("Challenge {id}"),
        description: "A community challenge".to_string(),
        start_date: date("2025-11-01"),
        end_date: date("2025-11-30"),
        reward_points: 50,
        status: "Active".to_string(),
        points_earned: 0,
        date_joined: datetime("2025-11-02T09:00:00"),
    }
}

pub fn global_entry(name: &str, points: u32) -> GlobalEntry {
    GlobalEntry {
        name: name.to_string(),
        email: format!("{}@ecobuddy.com", name.to_lowercase()),
        user_type: "Individual".to_string(),
        total_points: points,
        total_carbon_offset: points as f64 * 0.5,
        activities_count: 4,
    }
}

pub fn challenge_entry(name: &str, points: u32) -> ChallengeEntry {
    ChallengeEntry {
        name: name.to_string(),
        email: format!("{}@ecobuddy.com", name.to_lowercase()),
        points_earned: points,
        activities_count: 2,
        total_activity_points: points,
        date_joined: datetime("2025-11-02T09:00:00"),
    }
}

pub fn activity(id: i64, description: &str) -> Activity {
    Activity {
        activity_id: id,
        user_id: 1,
        category_id: 4,
        category_name: Some("Cycling".to_string()),
        user_name: None,
        description: description.to_string(),
        quantity: None,
        points: 10,
        carbon_offset: 3.0,
        date_time: datetime("2025-11-03T08:15:00"),
        image_data: None,
        image_filename: None,
        image_content_type: None,
    }
}

pub fn valid_draft() -> ecobuddy::submit::ActivityDraft {
    ecobuddy::submit::ActivityDraft {
        category_id: "4".to_string(),
        description: "Cycled to work".to_string(),
        points: "10".to_string(),
        carbon_offset: "3.0".to_string(),
        image: None,
    }
}

/// Per-operation call counters.
#[derive(Default)]
pub struct Calls {
    pub challenges: AtomicUsize,
    pub participations: AtomicUsize,
    pub submit: AtomicUsize,
    pub join: AtomicUsize,
    pub global_leaderboard: AtomicUsize,
    pub challenge_leaderboard: AtomicUsize,
    pub user_stats: AtomicUsize,
    pub user_activities: AtomicUsize,
}

impl Calls {
    pub fn submits(&self) -> usize {
        self.submit.load(Ordering::SeqCst)
    }

    pub fn joins(&self) -> usize {
        self.join.load(Ordering::SeqCst)
    }
}

/// Gateway double: canned fixtures, per-operation counters, optional
/// semaphore gates to hold calls in flight, optional injected failures.
///
/// A successful join appends a participation record, so a component's full
/// refetch observes the server-side effect.
#[derive(Default)]
pub struct RecordingGateway {
    pub calls: Calls,
    challenges: Mutex<Vec<Challenge>>,
    participations: Mutex<Vec<Participation>>,
    categories: Mutex<Vec<Category>>,
    stats: Mutex<StatsSummary>,
    activities: Mutex<Vec<Activity>>,
    global_rows: Mutex<Vec<GlobalEntry>>,
    challenge_rows: Mutex<HashMap<ChallengeId, Vec<ChallengeEntry>>>,
    join_error: Mutex<Option<RemoteError>>,
    submit_gate: Mutex<Option<Semaphore>>,
    join_gate: Mutex<Option<Semaphore>>,
    stats_gate: Mutex<Option<Semaphore>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_challenges(self, rows: Vec<Challenge>) -> Self {
        *self.challenges.lock().unwrap() = rows;
        self
    }

    pub fn with_participations(self, rows: Vec<Participation>) -> Self {
        *self.participations.lock().unwrap() = rows;
        self
    }

    pub fn with_stats(self, summary: StatsSummary) -> Self {
        *self.stats.lock().unwrap() = summary;
        self
    }

    pub fn with_activities(self, rows: Vec<Activity>) -> Self {
        *self.activities.lock().unwrap() = rows;
        self
    }

    pub fn with_global(self, rows: Vec<GlobalEntry>) -> Self {
        *self.global_rows.lock().unwrap() = rows;
        self
    }

    pub fn with_board(self, id: ChallengeId, rows: Vec<ChallengeEntry>) -> Self {
        self.challenge_rows.lock().unwrap().insert(id, rows);
        self
    }

    pub fn fail_join_with(self, err: RemoteError) -> Self {
        *self.join_error.lock().unwrap() = Some(err);
        self
    }

    /// Hold submit calls until [`Self::release_submits`] grants permits.
    pub fn gate_submits(self) -> Self {
        *self.submit_gate.lock().unwrap() = Some(Semaphore::new(0));
        self
    }

    pub fn release_submits(&self, n: usize) {
        if let Some(gate) = self.submit_gate.lock().unwrap().as_ref() {
            gate.add_permits(n);
        }
    }

    /// Hold join calls until [`Self::release_joins`] grants permits.
    pub fn gate_joins(self) -> Self {
        *self.join_gate.lock().unwrap() = Some(Semaphore::new(0));
        self
    }

    pub fn release_joins(&self, n: usize) {
        if let Some(gate) = self.join_gate.lock().unwrap().as_ref() {
            gate.add_permits(n);
        }
    }

    /// Hold user-stats calls until [`Self::release_stats`] grants permits.
    pub fn gate_stats(self) -> Self {
        *self.stats_gate.lock().unwrap() = Some(Semaphore::new(0));
        self
    }

    pub fn release_stats(&self, n: usize) {
        if let Some(gate) = self.stats_gate.lock().unwrap().as_ref() {
            gate.add_permits(n);
        }
    }

    /// Park until the gate (if any) grants a permit, without holding the
    /// fixture mutex across an await.
    async fn wait(gate: &Mutex<Option<Semaphore>>) {
        if gate.lock().unwrap().is_none() {
            return;
        }
        loop {
            let acquired = match gate.lock().unwrap().as_ref() {
                Some(semaphore) => match semaphore.try_acquire() {
                    Ok(permit) => {
                        permit.forget();
                        true
                    }
                    Err(_) => false,
                },
                None => true,
            };
            if acquired {
                return;
            }
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthSession, RemoteError> {
        Ok(AuthSession {
            access_token: "token-1".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                user_id: 1,
                name: "User 1".to_string(),
                email: email.to_string(),
                user_type: "Individual".to_string(),
            },
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, RemoteError> {
        Ok(AuthSession {
            access_token: "token-1".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                user_id: 1,
                name: request.name.clone(),
                email: request.email.clone(),
                user_type: request.user_type.clone(),
            },
        })
    }

    async fn categories(&self) -> Result<Vec<Category>, RemoteError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn challenges(&self) -> Result<Vec<Challenge>, RemoteError> {
        self.calls.challenges.fetch_add(1, Ordering::SeqCst);
        Ok(self.challenges.lock().unwrap().clone())
    }

    async fn participations(&self, _user_id: UserId) -> Result<Vec<Participation>, RemoteError> {
        self.calls.participations.fetch_add(1, Ordering::SeqCst);
        Ok(self.participations.lock().unwrap().clone())
    }

    async fn submit_activity(
        &self,
        _request: &ActivityRequest,
    ) -> Result<SubmitReceipt, RemoteError> {
        self.calls.submit.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.submit_gate).await;
        Ok(SubmitReceipt {
            message: "Activity uploaded successfully".to_string(),
            activity_id: 99,
        })
    }

    async fn join_challenge(&self, challenge_id: ChallengeId) -> Result<JoinReceipt, RemoteError> {
        self.calls.join.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.join_gate).await;
        if let Some(err) = self.join_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.participations.lock().unwrap().push(participation(challenge_id));
        Ok(JoinReceipt {
            message: "Successfully joined challenge".to_string(),
            data: JoinRecord {
                user_id: 1,
                challenge_id,
                date_joined: datetime("2025-11-02T09:00:00"),
            },
        })
    }

    async fn global_leaderboard(&self) -> Result<Vec<GlobalEntry>, RemoteError> {
        self.calls.global_leaderboard.fetch_add(1, Ordering::SeqCst);
        Ok(self.global_rows.lock().unwrap().clone())
    }

    async fn challenge_leaderboard(
        &self,
        challenge_id: ChallengeId,
    ) -> Result<Vec<ChallengeEntry>, RemoteError> {
        self.calls.challenge_leaderboard.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .challenge_rows
            .lock()
            .unwrap()
            .get(&challenge_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn user_stats(&self, _user_id: UserId) -> Result<StatsSummary, RemoteError> {
        self.calls.user_stats.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.stats_gate).await;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn user_activities(&self, _user_id: UserId) -> Result<Vec<Activity>, RemoteError> {
        self.calls.user_activities.fetch_add(1, Ordering::SeqCst);
        Ok(self.activities.lock().unwrap().clone())
    }
}

//! Challenge engagement
//!
//! Merges the challenge catalog with the current user's participation
//! records into a per-challenge engagement status, and executes the join
//! transition. The two collections are fetched and owned independently; the
//! merge is a pure lookup join keyed by challenge id, recomputed on every
//! evaluation so neither source can go stale inside a cached combination.
//!
//! Per challenge, from the current user's perspective:
//!
//! - `Available` - not joined, days remaining. Joining is permitted.
//! - `Joined`    - a participation record exists. Terminal; there is no
//!   leave operation.
//! - `Ended`     - not joined and the end date has passed. Joining is
//!   disabled.
//!
//! A challenge moves from `Available` to `Ended` purely through elapsed
//! wall-clock time, without any refetch.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::{Challenge, ChallengeId, Participation};
use crate::error::{Error, Result};
use crate::gateway::Gateway;
use crate::session::Session;

/// Days until a challenge closes, measured at `now`.
///
/// The end date is inclusive: a challenge ending today reports 1 until
/// midnight UTC, then 0. Never negative.
pub fn days_remaining_at(end_date: NaiveDate, now: NaiveDateTime) -> u32 {
    let cutoff = end_date
        .succ_opt()
        .unwrap_or(NaiveDate::MAX)
        .and_time(NaiveTime::MIN);
    let seconds = cutoff.signed_duration_since(now).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds as u64).div_ceil(86_400) as u32
}

/// Days until a challenge closes, measured now.
pub fn days_remaining(challenge: &Challenge) -> u32 {
    days_remaining_at(challenge.end_date, Utc::now().naive_utc())
}

/// The current user's standing on one challenge.
#[derive(Debug, Clone)]
pub enum Engagement {
    /// Not joined and still open.
    Available { days_remaining: u32 },
    /// A participation record exists for the current user.
    Joined { participation: Participation },
    /// Not joined and the end date has passed.
    Ended,
}

impl Engagement {
    pub fn is_joined(&self) -> bool {
        matches!(self, Engagement::Joined { .. })
    }

    pub fn can_join(&self) -> bool {
        matches!(self, Engagement::Available { .. })
    }

    /// Button label matching the product's challenge cards.
    pub fn label(&self) -> &'static str {
        match self {
            Engagement::Available { .. } => "Join Challenge",
            Engagement::Joined { .. } => "Joined",
            Engagement::Ended => "Challenge Ended",
        }
    }
}

/// Pure derivation of [`Engagement`] from the two source collections.
///
/// A participation record is the only signal that decides `Joined`.
fn derive(
    challenge: &Challenge,
    participations: &[Participation],
    now: NaiveDateTime,
) -> Engagement {
    if let Some(participation) = participations
        .iter()
        .find(|p| p.challenge_id == challenge.challenge_id)
    {
        return Engagement::Joined { participation: participation.clone() };
    }
    match days_remaining_at(challenge.end_date, now) {
        0 => Engagement::Ended,
        days_remaining => Engagement::Available { days_remaining },
    }
}

/// Settled result of a state-changing operation.
#[derive(Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated,
    /// The session changed while the call was in flight; the response was
    /// discarded and the prior state kept.
    Stale,
}

#[derive(Default)]
struct BoardState {
    catalog: Vec<Challenge>,
    participations: Vec<Participation>,
    joining: HashSet<ChallengeId>,
    epoch: u64,
}

/// The challenge catalog plus the current user's participation records.
pub struct ChallengeBoard {
    gateway: Arc<dyn Gateway>,
    session: Session,
    state: Mutex<BoardState>,
}

impl ChallengeBoard {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Lock the state, dropping any data that belongs to a previous session.
    fn state(&self) -> MutexGuard<'_, BoardState> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = self.session.epoch();
        if state.epoch != epoch {
            state.catalog.clear();
            state.participations.clear();
            state.joining.clear();
            state.epoch = epoch;
        }
        state
    }

    /// Fetch the catalog and the user's participations, concurrently.
    pub async fn refresh(&self) -> Result<SyncOutcome> {
        let user = self.session.require_user()?;
        let tag = self.session.tag();

        let result = futures::try_join!(
            self.gateway.challenges(),
            self.gateway.participations(user.user_id),
        );

        let mut state = self.state();
        if !tag.is_current(&self.session) {
            tracing::debug!("discarding challenge data for a superseded session");
            return Ok(SyncOutcome::Stale);
        }
        let (catalog, participations) = result?;
        state.catalog = catalog;
        state.participations = participations;
        Ok(SyncOutcome::Updated)
    }

    pub fn catalog(&self) -> Vec<Challenge> {
        self.state().catalog.clone()
    }

    pub fn participations(&self) -> Vec<Participation> {
        self.state().participations.clone()
    }

    /// Engagement for a challenge, measured at `now`.
    pub fn engagement_at(&self, challenge: &Challenge, now: NaiveDateTime) -> Engagement {
        derive(challenge, &self.state().participations, now)
    }

    /// Engagement for a challenge, measured against the wall clock.
    pub fn engagement_for(&self, challenge: &Challenge) -> Engagement {
        self.engagement_at(challenge, Utc::now().naive_utc())
    }

    /// Engagement looked up by id in the loaded catalog.
    pub fn engagement(&self, challenge_id: ChallengeId) -> Option<Engagement> {
        let state = self.state();
        let challenge = state
            .catalog
            .iter()
            .find(|c| c.challenge_id == challenge_id)?;
        Some(derive(challenge, &state.participations, Utc::now().naive_utc()))
    }

    /// The whole catalog annotated with the user's engagement.
    pub fn overview(&self) -> Vec<(Challenge, Engagement)> {
        let state = self.state();
        let now = Utc::now().naive_utc();
        state
            .catalog
            .iter()
            .map(|challenge| {
                (
                    challenge.clone(),
                    derive(challenge, &state.participations, now),
                )
            })
            .collect()
    }

    /// True while a join for this challenge is in flight.
    pub fn is_joining(&self, challenge_id: ChallengeId) -> bool {
        self.state().joining.contains(&challenge_id)
    }

    /// Execute the join transition for one challenge.
    ///
    /// Rejected without a network call when the challenge is unknown,
    /// already joined, ended, or already has a join in flight. The pending
    /// guard is per challenge id; joins on other challenges proceed
    /// independently. On success the participation set is refetched in full
    /// before the transition reports complete, so the result reflects
    /// authoritative server state rather than an optimistic append.
    pub async fn join(&self, challenge_id: ChallengeId) -> Result<SyncOutcome> {
        let user = self.session.require_user()?;
        let tag = self.session.tag();

        {
            let mut state = self.state();
            let challenge = state
                .catalog
                .iter()
                .find(|c| c.challenge_id == challenge_id)
                .ok_or(Error::UnknownChallenge(challenge_id))?;
            match derive(challenge, &state.participations, Utc::now().naive_utc()) {
                Engagement::Joined { .. } => return Err(Error::AlreadyJoined(challenge_id)),
                Engagement::Ended => return Err(Error::ChallengeEnded(challenge_id)),
                Engagement::Available { .. } => {}
            }
            if !state.joining.insert(challenge_id) {
                return Err(Error::JoinInFlight(challenge_id));
            }
        }

        match self.gateway.join_challenge(challenge_id).await {
            Ok(_receipt) => {
                let refetch = self.gateway.participations(user.user_id).await;
                let mut state = self.state();
                state.joining.remove(&challenge_id);
                if !tag.is_current(&self.session) {
                    tracing::debug!(
                        challenge_id,
                        "discarding join response for a superseded session"
                    );
                    return Ok(SyncOutcome::Stale);
                }
                state.participations = refetch?;
                Ok(SyncOutcome::Updated)
            }
            Err(err) => {
                let mut state = self.state();
                state.joining.remove(&challenge_id);
                if !tag.is_current(&self.session) {
                    tracing::debug!(
                        challenge_id,
                        "discarding join failure for a superseded session"
                    );
                    return Ok(SyncOutcome::Stale);
                }
                Err(err.into())
            }
        }
    }
}

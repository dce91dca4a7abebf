//! Leaderboard standings
//!
//! Rank is strictly the 1-based position in the sequence the backend
//! returned; the client never reorders entries. Per-challenge boards are
//! fetched lazily on first selection and memoized by challenge id for the
//! lifetime of this view, so re-selecting a board issues no further network
//! call. While a board's first fetch is in flight only that board reports
//! pending; cached boards stay visible untouched.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{ChallengeEntry, ChallengeId, GlobalEntry};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::session::Session;

pub use crate::domain::{Ranked, ranked};

/// Settled result of a board selection.
#[derive(Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Fetched from the backend and cached.
    Loaded,
    /// Served from the cache; no network call was made.
    Cached,
    /// The session changed while the fetch was in flight; the response was
    /// discarded and nothing was cached.
    Stale,
}

#[derive(Default)]
struct BoardsState {
    global: Option<Vec<GlobalEntry>>,
    boards: HashMap<ChallengeId, Vec<ChallengeEntry>>,
    pending: HashSet<ChallengeId>,
    global_pending: bool,
    epoch: u64,
}

/// Global and per-challenge standings with a lazy, memoized cache.
pub struct Leaderboards {
    gateway: Arc<dyn Gateway>,
    session: Session,
    state: Mutex<BoardsState>,
}

impl Leaderboards {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(BoardsState::default()),
        }
    }

    /// Lock the state, dropping boards that belong to a previous session.
    fn state(&self) -> MutexGuard<'_, BoardsState> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = self.session.epoch();
        if state.epoch != epoch {
            state.global = None;
            state.boards.clear();
            state.pending.clear();
            state.global_pending = false;
            state.epoch = epoch;
        }
        state
    }

    /// Make sure the global board is loaded.
    pub async fn load_global(&self) -> Result<SelectOutcome> {
        self.session.require_user()?;
        if self.state().global.is_some() {
            return Ok(SelectOutcome::Cached);
        }

        let tag = self.session.tag();
        self.state().global_pending = true;
        let result = self.gateway.global_leaderboard().await;
        let mut state = self.state();
        state.global_pending = false;

        if !tag.is_current(&self.session) {
            tracing::debug!("discarding global leaderboard for a superseded session");
            return Ok(SelectOutcome::Stale);
        }
        state.global = Some(result?);
        Ok(SelectOutcome::Loaded)
    }

    /// Select a challenge board, fetching it only the first time.
    pub async fn select(&self, challenge_id: ChallengeId) -> Result<SelectOutcome> {
        self.session.require_user()?;
        if self.state().boards.contains_key(&challenge_id) {
            return Ok(SelectOutcome::Cached);
        }

        let tag = self.session.tag();
        self.state().pending.insert(challenge_id);
        let result = self.gateway.challenge_leaderboard(challenge_id).await;
        let mut state = self.state();
        state.pending.remove(&challenge_id);

        if !tag.is_current(&self.session) {
            tracing::debug!(
                challenge_id,
                "discarding challenge leaderboard for a superseded session"
            );
            return Ok(SelectOutcome::Stale);
        }
        state.boards.insert(challenge_id, result?);
        Ok(SelectOutcome::Loaded)
    }

    /// The global board, if loaded.
    pub fn global(&self) -> Option<Vec<GlobalEntry>> {
        self.state().global.clone()
    }

    /// A challenge board, if cached.
    pub fn board(&self, challenge_id: ChallengeId) -> Option<Vec<ChallengeEntry>> {
        self.state().boards.get(&challenge_id).cloned()
    }

    /// True while this challenge's first fetch is in flight. Scoped to the
    /// one challenge; other boards are unaffected.
    pub fn is_pending(&self, challenge_id: ChallengeId) -> bool {
        self.state().pending.contains(&challenge_id)
    }

    /// True while the global board's first fetch is in flight.
    pub fn is_global_pending(&self) -> bool {
        self.state().global_pending
    }

    /// Drop everything cached so the next selection refetches.
    pub fn invalidate(&self) {
        let mut state = self.state();
        state.global = None;
        state.boards.clear();
    }
}

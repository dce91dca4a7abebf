//! Dashboard stats aggregation
//!
//! Derives the user's summary figures from two backend reads - the stats
//! summary and the activity history - issued concurrently and applied as a
//! single unit. A refresh either replaces the whole snapshot or leaves the
//! previous one untouched; partial results are never observable.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Activity, StatsSummary};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::session::Session;

pub use crate::challenges::SyncOutcome;

/// One atomic view of the user's figures and recent history.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub summary: StatsSummary,
    /// Activity history, newest first as the backend returns it.
    pub history: Vec<Activity>,
}

#[derive(Default)]
struct DashboardState {
    snapshot: Option<Snapshot>,
    epoch: u64,
}

/// Fetches and holds the current user's dashboard snapshot.
pub struct Dashboard {
    gateway: Arc<dyn Gateway>,
    session: Session,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// Lock the state, dropping a snapshot that belongs to a previous
    /// session.
    fn state(&self) -> MutexGuard<'_, DashboardState> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = self.session.epoch();
        if state.epoch != epoch {
            state.snapshot = None;
            state.epoch = epoch;
        }
        state
    }

    /// Issue both reads concurrently and replace the snapshot once both
    /// have settled. On any failure the prior snapshot is kept.
    pub async fn refresh(&self) -> Result<SyncOutcome> {
        let user = self.session.require_user()?;
        let tag = self.session.tag();

        let result = futures::try_join!(
            self.gateway.user_stats(user.user_id),
            self.gateway.user_activities(user.user_id),
        );

        let mut state = self.state();
        if !tag.is_current(&self.session) {
            tracing::debug!("discarding stats for a superseded session");
            return Ok(SyncOutcome::Stale);
        }
        let (summary, history) = result?;
        state.snapshot = Some(Snapshot { summary, history });
        Ok(SyncOutcome::Updated)
    }

    /// The latest snapshot, if one has been fetched for this session.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state().snapshot.clone()
    }

    /// Drop the snapshot so the next read refetches. Called after a
    /// successful activity submission.
    pub fn invalidate(&self) {
        self.state().snapshot = None;
    }
}

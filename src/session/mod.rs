//! Authenticated session state
//!
//! The session is the lifecycle gate for every other component: no user, no
//! data fetch. Each sign-in or sign-out bumps an epoch; components remember
//! the epoch their cached data belongs to and drop it when the epoch moves,
//! so nothing fetched for one user is ever shown to another.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{AuthSession, User, UserId};
use crate::error::{Error, Result};

#[derive(Default)]
struct State {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
    epoch: u64,
}

/// Cheaply clonable handle to the signed-in identity.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<State>>,
}

impl Session {
    /// A fresh, signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session persisted by a previous run.
    pub fn restored(user: User, token: impl Into<String>) -> Self {
        let session = Self::new();
        {
            let mut state = session.state();
            state.user = Some(user);
            state.token = Some(token.into());
            state.epoch = 1;
        }
        session
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark identity resolution as pending.
    pub fn begin_auth(&self) {
        self.state().loading = true;
    }

    /// Install the identity returned by login/register.
    pub fn complete_auth(&self, auth: AuthSession) {
        let mut state = self.state();
        state.user = Some(auth.user);
        state.token = Some(auth.access_token);
        state.loading = false;
        state.epoch += 1;
    }

    /// Identity resolution failed; the session stays signed out.
    pub fn fail_auth(&self) {
        self.state().loading = false;
    }

    /// Clear the identity. Every per-user cache becomes invalid.
    pub fn sign_out(&self) {
        let mut state = self.state();
        state.user = None;
        state.token = None;
        state.loading = false;
        state.epoch += 1;
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.state().user.as_ref().map(|u| u.user_id)
    }

    /// The signed-in user, or [`Error::NotSignedIn`].
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(Error::NotSignedIn)
    }

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    /// True while identity resolution is pending.
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Bumped on every sign-in/sign-out.
    pub fn epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Snapshot to tag an outgoing call with. Checked when the response
    /// arrives; a mismatch means the response belongs to a superseded
    /// identity and must be discarded.
    pub fn tag(&self) -> SessionTag {
        let state = self.state();
        SessionTag {
            epoch: state.epoch,
            user_id: state.user.as_ref().map(|u| u.user_id),
        }
    }
}

/// Stale-response guard: identifies the session a call was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTag {
    epoch: u64,
    user_id: Option<UserId>,
}

impl SessionTag {
    /// Does the session still match the one this call was issued under?
    pub fn is_current(&self, session: &Session) -> bool {
        *self == session.tag()
    }
}

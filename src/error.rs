//! Error taxonomy for the client core.
//!
//! Everything here leaves the affected component in its prior state; nothing
//! is fatal to the process.

use thiserror::Error;

use crate::domain::ChallengeId;
use crate::gateway::RemoteError;

/// The primary error type for client-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any network call was issued.
    #[error("{0}")]
    Validation(String),

    /// A gateway call failed or returned non-success.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An operation requiring a signed-in user ran without one.
    #[error("not signed in")]
    NotSignedIn,

    /// A submission is already in flight; wait for it to settle.
    #[error("an activity submission is already in progress")]
    SubmitInFlight,

    /// A join for this challenge is already in flight.
    #[error("join already in progress for challenge {0}")]
    JoinInFlight(ChallengeId),

    /// The user already joined this challenge.
    #[error("already joined challenge {0}")]
    AlreadyJoined(ChallengeId),

    /// The challenge's end date has passed; joining is disabled.
    #[error("challenge {0} has ended")]
    ChallengeEnded(ChallengeId),

    /// The challenge id is not in the loaded catalog.
    #[error("unknown challenge {0}")]
    UnknownChallenge(ChallengeId),

    /// An attachment could not be read from disk.
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for client-core operations.
pub type Result<T> = std::result::Result<T, Error>;

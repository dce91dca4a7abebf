//! Core domain types for the EcoBuddy client
//!
//! Field names mirror the backend's JSON exactly, so these types double as
//! the wire models used by the gateway.

mod activity;
mod challenge;
mod leaderboard;
mod stats;
mod user;

pub use activity::{Activity, Category, SubmitReceipt};
pub use challenge::{Challenge, JoinReceipt, JoinRecord, Participation};
pub use leaderboard::{ChallengeEntry, GlobalEntry, Ranked, ranked};
pub use stats::StatsSummary;
pub use user::{AuthSession, RegisterRequest, User};

/// Backend identifier for a user account.
pub type UserId = i64;

/// Backend identifier for an activity record.
pub type ActivityId = i64;

/// Backend identifier for an activity category.
pub type CategoryId = i64;

/// Backend identifier for a challenge.
pub type ChallengeId = i64;

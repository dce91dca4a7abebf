//! EcoBuddy client core
//!
//! EcoBuddy tracks eco-friendly actions: users log activities to earn points
//! and carbon-offset credit, join time-boxed community challenges, and
//! compare standing on leaderboards. This crate is the engagement core of
//! the client - everything between a view and the backend:
//!
//! - [`session`] gates all data access on the signed-in identity.
//! - [`gateway`] is the sole I/O boundary to the backend.
//! - [`submit`] validates and uploads new activity records.
//! - [`dashboard`] aggregates the user's summary figures.
//! - [`challenges`] derives per-challenge engagement and executes joins.
//! - [`leaderboard`] ranks standings with a lazy per-challenge cache.
//!
//! All state-changing operations guard against double submission, and every
//! in-flight call is tagged with the session it was issued under so a
//! response that outlives its session is discarded instead of applied.

pub mod challenges;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod leaderboard;
pub mod session;
pub mod submit;

pub use domain::*;
pub use error::{Error, Result};

use chrono::NaiveDateTime;
use serde::Deserialize;

/// One row of the global leaderboard, all-time totals per user.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalEntry {
    pub name: String,
    pub email: String,
    pub user_type: String,
    pub total_points: u32,
    pub total_carbon_offset: f64,
    pub activities_count: u32,
}

/// One row of a per-challenge leaderboard.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeEntry {
    pub name: String,
    pub email: String,
    pub points_earned: u32,
    pub activities_count: u32,
    #[serde(default)]
    pub total_activity_points: u32,
    pub date_joined: NaiveDateTime,
}

/// A leaderboard row paired with its display rank.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a, T> {
    /// 1-based position in the sequence the backend returned.
    pub rank: usize,
    pub entry: &'a T,
}

/// Annotate rows with their display rank.
///
/// The backend sends rows already sorted; rank is strictly the position in
/// that sequence. Rows are never reordered and ties are preserved as
/// received.
pub fn ranked<T>(entries: &[T]) -> impl Iterator<Item = Ranked<'_, T>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Ranked { rank: index + 1, entry })
}

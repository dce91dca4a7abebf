use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::{ChallengeId, UserId};

/// A time-boxed community challenge from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Challenge {
    pub challenge_id: ChallengeId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reward_points: u32,
    #[serde(default)]
    pub participant_count: u32,
    /// "Active" or a terminal label set by the backend.
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "Active".to_string()
}

/// The current user's join record for one challenge.
///
/// The user-challenges endpoint returns the challenge row merged with the
/// join fields, so the challenge metadata is repeated here. Existence of
/// this record is the one and only signal that the user has joined.
#[derive(Debug, Clone, Deserialize)]
pub struct Participation {
    pub challenge_id: ChallengeId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reward_points: u32,
    /// Participation status ("Active", "Completed", ...), display-only.
    pub status: String,
    pub points_earned: u32,
    pub date_joined: NaiveDateTime,
}

/// Acknowledgement returned by the join-challenge endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinReceipt {
    pub message: String,
    pub data: JoinRecord,
}

/// The join record echoed back on a successful join.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRecord {
    pub user_id: UserId,
    pub challenge_id: ChallengeId,
    pub date_joined: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_status_defaults_to_active() {
        let challenge: Challenge = serde_json::from_str(
            r#"{
                "challenge_id": 1,
                "name": "30-Day Recycling Challenge",
                "description": "Recycle daily for 30 days",
                "start_date": "2025-11-01",
                "end_date": "2025-11-30",
                "reward_points": 50,
                "participant_count": 12
            }"#,
        )
        .unwrap();
        assert_eq!(challenge.status, "Active");
        assert_eq!(challenge.end_date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
    }

    #[test]
    fn test_participation_decodes_merged_row() {
        let participation: Participation = serde_json::from_str(
            r#"{
                "challenge_id": 2,
                "name": "Green Commute Week",
                "description": "Use eco-friendly transport for a week",
                "start_date": "2025-11-01",
                "end_date": "2025-11-07",
                "reward_points": 20,
                "status": "Active",
                "points_earned": 5,
                "date_joined": "2025-11-02T09:00:00"
            }"#,
        )
        .unwrap();
        assert_eq!(participation.challenge_id, 2);
        assert_eq!(participation.points_earned, 5);
    }
}

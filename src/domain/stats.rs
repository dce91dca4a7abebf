use serde::Deserialize;

/// Aggregate figures for one user, computed server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSummary {
    pub total_activities: u32,
    pub total_points: u32,
    /// Kilograms of CO2 offset across all activities.
    pub total_carbon_offset: f64,
    pub challenges_joined: u32,
    pub challenge_points: u32,
}

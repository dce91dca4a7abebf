//! Dashboard summary command

use anyhow::Result;

use ecobuddy::dashboard::Dashboard;

use super::Context;

/// Fetch and print the user's dashboard snapshot.
pub async fn dashboard_command(ctx: Context) -> Result<()> {
    let user = ctx.session.require_user()?;
    let dashboard = Dashboard::new(ctx.gateway.clone(), ctx.session.clone());
    dashboard.refresh().await?;

    let Some(snapshot) = dashboard.snapshot() else {
        println!("No dashboard data available.");
        return Ok(());
    };

    println!("Dashboard for {}:\n", user.name);
    println!("  Total activities:   {}", snapshot.summary.total_activities);
    println!("  Total points:       {}", snapshot.summary.total_points);
    println!("  Carbon offset:      {} kg", snapshot.summary.total_carbon_offset);
    println!("  Challenges joined:  {}", snapshot.summary.challenges_joined);
    println!("  Challenge points:   {}", snapshot.summary.challenge_points);

    if !snapshot.history.is_empty() {
        println!("\nRecent activities:");
        for activity in snapshot.history.iter().take(5) {
            println!(
                "  [{}] {} - {} pts",
                activity.date_time.format("%Y-%m-%d"),
                activity.description,
                activity.points
            );
        }
    }
    Ok(())
}

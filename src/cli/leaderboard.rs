//! Leaderboard commands

use anyhow::Result;

use ecobuddy::leaderboard::{Leaderboards, ranked};

use super::Context;

/// Show the global board, or one challenge's board.
pub async fn leaderboard_command(ctx: Context, challenge: Option<i64>) -> Result<()> {
    let boards = Leaderboards::new(ctx.gateway.clone(), ctx.session.clone());
    let you = ctx.session.current_user();

    match challenge {
        None => {
            boards.load_global().await?;
            let Some(rows) = boards.global() else {
                println!("Leaderboard is empty.");
                return Ok(());
            };

            println!("Global leaderboard ({} entries):\n", rows.len());
            for row in ranked(&rows) {
                let marker = if you.as_ref().is_some_and(|u| u.name == row.entry.name) {
                    " (you)"
                } else {
                    ""
                };
                println!(
                    "  #{} {}{} [{}] - {} pts, {} kg CO2, {} activities",
                    row.rank,
                    row.entry.name,
                    marker,
                    row.entry.user_type,
                    row.entry.total_points,
                    row.entry.total_carbon_offset,
                    row.entry.activities_count
                );
            }
        }
        Some(challenge_id) => {
            boards.select(challenge_id).await?;
            let Some(rows) = boards.board(challenge_id) else {
                println!("Leaderboard is empty.");
                return Ok(());
            };

            println!("Challenge {challenge_id} leaderboard ({} entries):\n", rows.len());
            for row in ranked(&rows) {
                let marker = if you.as_ref().is_some_and(|u| u.name == row.entry.name) {
                    " (you)"
                } else {
                    ""
                };
                println!(
                    "  #{} {}{} - {} pts earned, {} activities, joined {}",
                    row.rank,
                    row.entry.name,
                    marker,
                    row.entry.points_earned,
                    row.entry.activities_count,
                    row.entry.date_joined.format("%Y-%m-%d")
                );
            }
        }
    }
    Ok(())
}

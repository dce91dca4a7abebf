//! Challenge listing and join commands

use anyhow::Result;

use ecobuddy::challenges::{ChallengeBoard, Engagement, SyncOutcome};

use super::Context;

/// List the catalog annotated with the user's engagement.
pub async fn challenges_command(ctx: Context) -> Result<()> {
    let board = ChallengeBoard::new(ctx.gateway.clone(), ctx.session.clone());
    board.refresh().await?;

    let overview = board.overview();
    if overview.is_empty() {
        println!("No challenges available.");
        return Ok(());
    }

    println!("Challenges ({}):\n", overview.len());
    for (challenge, engagement) in overview {
        println!(
            "  #{} {} ({} - {}, {} reward pts, {} participants)",
            challenge.challenge_id,
            challenge.name,
            challenge.start_date,
            challenge.end_date,
            challenge.reward_points,
            challenge.participant_count
        );
        match &engagement {
            Engagement::Available { days_remaining } => {
                println!("    {} - {} days remaining", engagement.label(), days_remaining);
            }
            Engagement::Joined { participation } => {
                println!(
                    "    {} on {} - {} pts earned",
                    engagement.label(),
                    participation.date_joined.format("%Y-%m-%d"),
                    participation.points_earned
                );
            }
            Engagement::Ended => {
                println!("    {}", engagement.label());
            }
        }
    }
    Ok(())
}

/// Join one challenge.
pub async fn join_command(ctx: Context, challenge_id: i64) -> Result<()> {
    let board = ChallengeBoard::new(ctx.gateway.clone(), ctx.session.clone());
    board.refresh().await?;

    match board.join(challenge_id).await {
        Ok(SyncOutcome::Updated) => {
            println!("Joined challenge {challenge_id}.");
            if let Some(Engagement::Joined { participation }) = board.engagement(challenge_id) {
                println!(
                    "  {} - joined {}",
                    participation.name,
                    participation.date_joined.format("%Y-%m-%d")
                );
            }
        }
        Ok(SyncOutcome::Stale) => {}
        Err(err) => eprintln!("Failed to join challenge: {err}"),
    }
    Ok(())
}

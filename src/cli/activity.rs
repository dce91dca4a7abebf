//! Activity logging and history commands

use std::path::PathBuf;

use anyhow::Result;

use ecobuddy::submit::{ActivityDraft, ImageAttachment, SubmitOutcome, Submitter};

use super::Context;

/// List the activity categories with their suggested per-unit rates.
pub async fn categories_command(ctx: Context) -> Result<()> {
    let categories = ctx.gateway.categories().await?;

    if categories.is_empty() {
        println!("No categories available.");
        return Ok(());
    }

    println!("Activity categories ({}):\n", categories.len());
    for category in categories {
        println!(
            "  #{} {} - {} ({} pts, {} kg CO2 per unit)",
            category.category_id,
            category.name,
            category.description,
            category.points_per_unit,
            category.carbon_per_unit
        );
    }
    Ok(())
}

/// Run a draft through the submission pipeline.
pub async fn log_command(
    ctx: Context,
    category: String,
    description: String,
    points: String,
    carbon_offset: String,
    photo: Option<PathBuf>,
) -> Result<()> {
    let image = match photo {
        Some(path) => Some(ImageAttachment::from_path(&path)?),
        None => None,
    };
    let draft = ActivityDraft { category_id: category, description, points, carbon_offset, image };

    let submitter = Submitter::new(ctx.gateway.clone(), ctx.session.clone());
    match submitter.submit(&draft).await {
        Ok(SubmitOutcome::Accepted(receipt)) => {
            println!("Activity logged (id {}).", receipt.activity_id);
            if let Some(preview) = submitter.wait_preview().await {
                tracing::debug!(bytes = preview.len(), "photo preview rendered");
            }
        }
        Ok(SubmitOutcome::Stale) => {}
        Err(err) => eprintln!("Failed to submit activity: {err}"),
    }
    Ok(())
}

/// Show the user's activity history, newest first.
pub async fn activities_command(ctx: Context) -> Result<()> {
    let user = ctx.session.require_user()?;
    let activities = ctx.gateway.user_activities(user.user_id).await?;

    if activities.is_empty() {
        println!("No activities logged yet.");
        return Ok(());
    }

    println!("Activities ({}):\n", activities.len());
    for activity in activities {
        println!(
            "  #{} [{}] {} - {} pts, {} kg CO2",
            activity.activity_id,
            activity.date_time.format("%Y-%m-%d %H:%M"),
            activity.description,
            activity.points,
            activity.carbon_offset
        );
        if let Some(category) = &activity.category_name {
            println!("    Category: {category}");
        }
        if let Some(filename) = &activity.image_filename {
            let size = activity.image_bytes().map(|b| b.len()).unwrap_or(0);
            println!("    Photo: {filename} ({size} bytes)");
        }
    }
    Ok(())
}

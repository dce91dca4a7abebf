use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "ecobuddy")]
#[command(about = "Log eco-friendly activities, join challenges, climb the leaderboards")]
#[command(version)]
struct Cli {
    /// Backend URL (overrides the configured one)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// "Individual" or "Organization"
        #[arg(long, default_value = "Individual")]
        user_type: String,
    },

    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the activity categories
    Categories,

    /// Log a new activity
    Log {
        /// Category id (see `categories`)
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        points: String,
        /// Kilograms of CO2 offset
        #[arg(long)]
        carbon_offset: String,
        /// Photo to attach
        #[arg(long)]
        photo: Option<std::path::PathBuf>,
    },

    /// Show the activity history
    Activities,

    /// List challenges with your engagement status
    Challenges,

    /// Join a challenge
    Join {
        challenge_id: i64,
    },

    /// Show a leaderboard
    Leaderboard {
        /// Show the board for one challenge instead of the global one
        #[arg(long)]
        challenge: Option<i64>,
    },

    /// Show your dashboard summary
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let ctx = cli::Context::load(cli.api_url)?;

    match cli.command {
        Commands::Register { name, email, password, user_type } => {
            cli::auth::register_command(ctx, name, email, password, user_type).await?;
        }
        Commands::Login { email, password } => {
            cli::auth::login_command(ctx, email, password).await?;
        }
        Commands::Logout => {
            cli::auth::logout_command(ctx)?;
        }
        Commands::Whoami => {
            cli::auth::whoami_command(ctx)?;
        }
        Commands::Categories => {
            cli::activity::categories_command(ctx).await?;
        }
        Commands::Log { category, description, points, carbon_offset, photo } => {
            cli::activity::log_command(ctx, category, description, points, carbon_offset, photo)
                .await?;
        }
        Commands::Activities => {
            cli::activity::activities_command(ctx).await?;
        }
        Commands::Challenges => {
            cli::challenge::challenges_command(ctx).await?;
        }
        Commands::Join { challenge_id } => {
            cli::challenge::join_command(ctx, challenge_id).await?;
        }
        Commands::Leaderboard { challenge } => {
            cli::leaderboard::leaderboard_command(ctx, challenge).await?;
        }
        Commands::Dashboard => {
            cli::dashboard::dashboard_command(ctx).await?;
        }
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod db;
mod models;
mod report;
mod risk;
mod scoring;

use models::{GameType, PerformanceSummary};

#[derive(Parser)]
#[command(name = "cognition-score-tracker")]
#[command(about = "Score tracking and risk screening for cognitive mini-games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Score one completed game session and store the result
    Record {
        #[arg(long, value_enum)]
        game: GameType,
        /// Fraction of the game's correctness criterion met, 0 to 1
        #[arg(long)]
        accuracy: f64,
        /// Elapsed play time in seconds
        #[arg(long)]
        elapsed: f64,
        /// Override the game's accuracy-vs-speed blend
        #[arg(long)]
        accuracy_weight: Option<f64>,
    },
    /// Import historical attempts from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// List stored attempts in the order they were recorded
    History {
        #[arg(long, value_enum)]
        game: Option<GameType>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Per-game averages and the overall performance aggregate
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// Heuristic risk screening across the four tracked categories
    Risks {
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Delete the whole attempt history
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Record {
            game,
            accuracy,
            elapsed,
            accuracy_weight,
        } => {
            let time_factor = scoring::time_factor(game.expected_seconds(), elapsed);
            let weight = accuracy_weight.unwrap_or(game.accuracy_weight());
            let attempt = db::record_attempt(&pool, game, accuracy, time_factor, weight).await?;
            println!(
                "Recorded {} attempt with score {:.1}.",
                attempt.game_type, attempt.score
            );
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} attempts from {}.", csv.display());
        }
        Commands::History { game, limit } => {
            let attempts = db::fetch_attempts(&pool, game).await?;
            if attempts.is_empty() {
                println!("No attempts recorded yet.");
                return Ok(());
            }

            let start = attempts.len().saturating_sub(limit);
            for attempt in &attempts[start..] {
                println!(
                    "- {} scored {:.1} on {}",
                    attempt.game_type,
                    attempt.score,
                    attempt.recorded_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Summary { json } => {
            let attempts = db::fetch_attempts(&pool, None).await?;
            let summary = PerformanceSummary {
                overall: scoring::overall_performance(&attempts),
                games: scoring::game_averages(&attempts),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if summary.games.is_empty() {
                println!("No attempts recorded yet.");
            } else {
                println!("Overall performance: {:.1} / 100", summary.overall);
                for average in &summary.games {
                    println!(
                        "- {}: {:.1} avg over {} attempts",
                        average.game_type, average.avg_score, average.attempts
                    );
                }
            }
        }
        Commands::Risks { json } => {
            let attempts = db::fetch_attempts(&pool, None).await?;

            if json {
                let assessment = risk::assess(&attempts);
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                let grouped = scoring::group_by_game(&attempts);
                println!("Risk screening (heuristic only, not a clinical instrument):");
                for profile in risk::PROFILES {
                    let metric = risk::category_metric(&grouped, profile);
                    println!(
                        "- {}: {} (metric {:.1})",
                        profile.name,
                        risk::level_for(metric, profile),
                        metric
                    );
                }
            }
        }
        Commands::Report { out } => {
            let attempts = db::fetch_attempts(&pool, None).await?;
            let report = report::build_report(&attempts);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Reset => {
            let removed = db::clear_attempts(&pool).await?;
            println!("Cleared {removed} stored attempts.");
        }
    }

    Ok(())
}

//! `daily-games` - seeds and maintains the daily games database.
//!
//! With no subcommand the binary seeds the configured database. `fresh` clears
//! every table first. `prune-guests` deletes guests whose token has expired.
//! Paths and the RNG seed come from the environment (see [`config`]) and can be
//! overridden with flags.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daily_platform::config;
use daily_platform::persistence::{Database, Repositories, SqliteStore};
use daily_platform::seed::DatabaseSeeder;

#[derive(Parser)]
#[command(name = "daily-games", about = "Seed and maintain the daily games database")]
struct Cli {
    /// Optional subcommand. When omitted, seeds the database.
    #[command(subcommand)]
    command: Option<Commands>,

    /// SQLite database file. Defaults to DAILY_DATABASE_PATH or the data directory.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Seed for reproducible factory output. Defaults to DAILY_SEED.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run every seed unit in order.
    Seed,
    /// Clear all tables, then seed.
    Fresh,
    /// Delete guests whose token has expired, along with their results.
    PruneGuests,
}

fn init_tracing() -> Option<WorkerGuard> {
    let (file_layer, guard) = match config::get_log_dir() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir).ok();
            let file_appender = tracing_appender::rolling::daily(log_dir, "daily-games");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE),
        )
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    guard
}

async fn seed(repos: &Repositories, seed: Option<u64>) -> anyhow::Result<()> {
    println!("Seeding database...");
    let summary = DatabaseSeeder::new(seed).run(repos).await?;

    for (unit, created) in &summary.units {
        println!("  {unit}: {created} records");
    }
    for notice in &summary.notices {
        println!("{notice}");
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.database.unwrap_or_else(config::get_database_path);
    tracing::info!("Using database: {}", path.display());

    let db = Database::open(&path)
        .await
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    let repos = Repositories::bind(SqliteStore::from_database(&db));
    let rng_seed = cli.seed.or_else(config::get_seed);

    match cli.command.unwrap_or(Commands::Seed) {
        Commands::Seed => seed(&repos, rng_seed).await,
        Commands::Fresh => {
            let removed = repos.truncate_all().await?;
            println!("Cleared {removed} rows.");
            seed(&repos, rng_seed).await
        }
        Commands::PruneGuests => {
            let pruned = repos.guests().prune_expired(daily_domain::now()).await?;
            println!("Pruned {pruned} expired guests.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _guard = init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

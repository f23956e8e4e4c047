//! Command-line entry point for the college arena
//!
//! Loads a roster into an in-memory store, replays recorded votes and/or
//! simulates new ones, then prints the ranked list and optional per-college
//! statistics.

use anyhow::{anyhow, Result};
use clap::Parser;
use college_arena::arena::{ArenaService, RandomPairingSelector};
use college_arena::config::AppConfig;
use college_arena::rating::{EloRatingCalculator, RatingCalculator};
use college_arena::roster::{load_roster, load_vote_log};
use college_arena::store::InMemoryArenaStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// College Arena - pairwise college ranking with ELO ratings
#[derive(Parser)]
#[command(
    name = "college-arena",
    version,
    about = "Rank colleges from head-to-head votes using ELO ratings",
    long_about = "College Arena loads a roster of colleges, applies head-to-head votes \
                 (replayed from a log or simulated), updates ratings with the Elo model \
                 and prints the ranked list together with win/loss and review statistics."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Roster of colleges (JSON array, or CSV with a header row)
    #[arg(short, long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Votes to replay (JSON array of {"winner", "loser"})
    #[arg(long, value_name = "FILE")]
    votes: Option<PathBuf>,

    /// Number of random comparisons to simulate
    #[arg(long, default_value_t = 0)]
    simulate: usize,

    /// Seed for pairing and simulated outcomes
    #[arg(long)]
    seed: Option<u64>,

    /// Number of colleges to print in the ranked list
    #[arg(short, long, value_name = "N")]
    top: Option<usize>,

    /// Print statistics and match history for one college
    #[arg(long, value_name = "ID")]
    college: Option<String>,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    metrics: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(top) = args.top {
        config.arena.leaderboard_size = top;
    }

    college_arena::config::validate_config(&config)?;
    Ok(config)
}

fn display_startup_banner(config: &AppConfig) {
    info!("College Arena v{}", college_arena::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   K-factor: {}", config.rating.k_factor);
    info!("   Initial rating: {}", config.rating.initial_rating);
    info!(
        "   Commit attempts: {} ({}ms apart)",
        config.arena.max_commit_attempts, config.arena.retry_delay_ms
    );
}

async fn replay_votes(service: &ArenaService, path: &Path) -> Result<()> {
    let votes = load_vote_log(path)?;
    let mut failed = 0usize;

    for vote in &votes {
        if let Err(e) = service.record_vote(&vote.winner, &vote.loser).await {
            warn!(winner = %vote.winner, loser = %vote.loser, "Skipping vote: {}", e);
            failed += 1;
        }
    }

    info!(replayed = votes.len() - failed, failed, "Vote log applied");
    Ok(())
}

async fn simulate_votes(
    service: &ArenaService,
    calculator: &dyn RatingCalculator,
    rounds: usize,
    rng: &mut StdRng,
) -> Result<()> {
    for _ in 0..rounds {
        let (first, second) = service.next_pair().await?;

        // The favourite wins with the probability the model assigns it
        let first_wins = rng.gen_bool(
            calculator
                .expected_score(first.elo_rating, second.elo_rating)
                .clamp(0.0, 1.0),
        );
        let (winner, loser) = if first_wins {
            (first, second)
        } else {
            (second, first)
        };

        service.record_vote(&winner.id, &loser.id).await?;
    }

    info!(rounds, "Simulation finished");
    Ok(())
}

async fn print_college(service: &ArenaService, college_id: &str) -> Result<()> {
    let stats = service.college_stats(college_id).await?;
    let history = service.college_history(college_id).await?;
    let reviews = service.college_reviews(college_id).await?;

    println!();
    println!("College {}", college_id);
    println!("  Total matches:  {}", stats.total_matches);
    println!("  Wins / losses:  {} / {}", stats.wins, stats.losses);
    println!("  Win rate:       {:.1}%", stats.win_rate * 100.0);
    println!(
        "  User rating:    {:.1} / 5 ({} reviews)",
        stats.average_rating, stats.review_count
    );

    for entry in history.iter().take(10) {
        let verb = if entry.won { "Won against" } else { "Lost to" };
        println!(
            "  {} {} {}",
            entry.date.format("%Y-%m-%d"),
            verb,
            entry.opponent_name
        );
    }

    for review in reviews.iter().take(3) {
        println!(
            "  {} {}/5 by {}: {}",
            review.date.format("%Y-%m-%d"),
            review.rating,
            review.author_name,
            review.content
        );
    }

    Ok(())
}

async fn run(args: Args, config: AppConfig) -> Result<()> {
    let roster_path = args
        .roster
        .as_ref()
        .ok_or_else(|| anyhow!("A roster file is required (--roster)"))?;
    let colleges = load_roster(roster_path, config.rating.initial_rating)?;

    let store = Arc::new(InMemoryArenaStore::with_colleges(colleges)?);
    let calculator = Arc::new(EloRatingCalculator::new(config.rating.clone())?);
    debug!("Rating calculator: {}", calculator.config());

    let pairing = match args.seed {
        Some(seed) => RandomPairingSelector::seeded(seed),
        None => RandomPairingSelector::new(),
    };
    let service = ArenaService::new(
        store,
        calculator.clone(),
        Arc::new(pairing),
        config.arena.clone(),
    );

    if let Some(path) = &args.votes {
        replay_votes(&service, path).await?;
    }

    if args.simulate > 0 {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        simulate_votes(&service, calculator.as_ref(), args.simulate, &mut rng).await?;
    }

    println!("{:>4}  {:>8}  {}", "Rank", "Rating", "College");
    for entry in service.leaderboard(None).await? {
        println!(
            "{:>4}  {:>8.1}  {}",
            entry.rank,
            entry.college.elo_rating,
            entry.college.name
        );
    }

    if let Some(college_id) = &args.college {
        print_college(&service, college_id).await?;
    }

    if args.metrics {
        println!();
        print!("{}", service.metrics().encode_text()?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful, exiting");
        return Ok(());
    }

    if let Err(e) = run(args, config).await {
        error!("College arena failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

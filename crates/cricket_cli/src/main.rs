//! Cricket Sim CLI
//!
//! Play a single seeded match, run the continuous match manager, or drive
//! the JSON API from a request file.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cricket_core::engine::config::CONFIG_PATH_ENV;
use cricket_core::{
    default_teams, find_team, simulate_match_json, CricketMatch, LogPublisher, ManagerConfig,
    MatchConfig, MatchManager,
};

const DEFAULT_LOG_FILTER: &str = "cricket_core=info,cricket_sim=info";

#[derive(Parser)]
#[command(name = "cricket_sim")]
#[command(about = "Limited-overs cricket match simulator", long_about = None)]
struct Cli {
    /// Verbose logging (per-delivery debug events)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match between two built-in teams and print the result
    Play {
        /// Team batting first
        #[arg(long, default_value = "India")]
        team_a: String,

        /// Team batting second
        #[arg(long, default_value = "Australia")]
        team_b: String,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overs per innings
        #[arg(long)]
        overs: Option<u32>,

        /// Print ball-by-ball commentary
        #[arg(long, default_value = "false")]
        commentary: bool,

        /// Print the final snapshot as JSON instead of a summary
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play matches continuously, publishing a snapshot after every delivery
    Run {
        /// Config file (falls back to $CRICKET_SIM_CONFIG_PATH, then defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Stop after this many matches
        #[arg(long)]
        matches: Option<usize>,

        /// Pause between deliveries in milliseconds
        #[arg(long)]
        delivery_ms: Option<u64>,

        /// Pause between matches in milliseconds
        #[arg(long)]
        match_ms: Option<u64>,

        /// RNG seed for team selection and match seeds
        #[arg(long)]
        seed: Option<u64>,

        /// Publish subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Simulate a match from a JSON request file
    Simulate {
        /// Input request JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output response JSON file path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the built-in teams
    Teams,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play { team_a, team_b, seed, overs, commentary, json } => {
            play(&team_a, &team_b, seed, overs, commentary, json)
        }
        Commands::Run { config, matches, delivery_ms, match_ms, seed, subject } => {
            let mut config = load_config(config)?;
            if let Some(ms) = delivery_ms {
                config.delivery_interval_ms = ms;
            }
            if let Some(ms) = match_ms {
                config.match_interval_ms = ms;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(subject) = subject {
                config.subject = subject;
            }
            run(config, matches)
        }
        Commands::Simulate { r#in, out } => simulate(&r#in, out.as_deref()),
        Commands::Teams => {
            for team in default_teams() {
                println!("{}", team.name());
                println!("  XI:      {}", team.players().join(", "));
                println!("  Bowlers: {}", team.bowlers().join(", "));
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cricket_core=debug,cricket_sim=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<ManagerConfig> {
    match path {
        Some(path) => {
            let display = path.display().to_string();
            ManagerConfig::from_file(&display)
                .with_context(|| format!("Failed to load config from {display}"))
        }
        None => ManagerConfig::from_env()
            .with_context(|| format!("Failed to load config named by ${CONFIG_PATH_ENV}")),
    }
}

fn play(
    team_a: &str,
    team_b: &str,
    seed: u64,
    overs: Option<u32>,
    commentary: bool,
    json: bool,
) -> Result<()> {
    let a = find_team(team_a).ok_or_else(|| anyhow!("Unknown team: {team_a}"))?;
    let b = find_team(team_b).ok_or_else(|| anyhow!("Unknown team: {team_b}"))?;
    let mut config = MatchConfig::default();
    if let Some(overs) = overs {
        config.total_overs = overs;
    }

    let mut game = CricketMatch::with_seed(a, b, config, seed).context("Failed to set up match")?;
    while let Some(event) = game.step() {
        if commentary {
            println!("{:>5}  {:<20} {}", event.overs, event.bowler, event.commentary);
        }
    }

    let snapshot = game.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{} {}", snapshot.title, snapshot.venue);
    for team in &snapshot.teams {
        println!("  {:<14} {:>3}/{:<2} ({} ov)", team.team, team.runs, team.wickets, team.overs);
    }
    println!("{}", snapshot.result);
    Ok(())
}

fn run(config: ManagerConfig, matches: Option<usize>) -> Result<()> {
    if matches == Some(0) {
        bail!("--matches must be at least 1");
    }
    let manager = Arc::new(MatchManager::with_default_teams(config).context("Invalid manager config")?);
    let handle = manager.start(Arc::new(LogPublisher), matches);
    let played = handle
        .join()
        .map_err(|_| anyhow!("Match manager thread panicked"))?
        .context("Match manager failed")?;

    for record in manager.history() {
        println!("{}: {}", record.title, record.result);
    }
    tracing::info!(played, "done");
    Ok(())
}

fn simulate(input: &Path, output: Option<&Path>) -> Result<()> {
    let request = fs::read_to_string(input)
        .with_context(|| format!("Failed to read request: {}", input.display()))?;
    let response = simulate_match_json(&request).context("Simulation failed")?;
    match output {
        Some(path) => {
            fs::write(path, &response)
                .with_context(|| format!("Failed to write response: {}", path.display()))?;
            println!("✅ Response written to {}", path.display());
        }
        None => println!("{response}"),
    }
    Ok(())
}

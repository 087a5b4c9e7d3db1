//! # referee-cli
//!
//! Binary entry point for Referee.
//!
//! This crate provides:
//! - CLI argument parsing using `clap`
//! - Logging initialization (stderr only; stdout carries the turn report)
//! - Configuration loading and command-line overrides
//! - Entry point to the turn loop between `./main` and `./judge`

use anyhow::{Context, Result};
use clap::Parser;
use referee_adapters::ProcessParticipant;
use referee_core::{
    DriverConfig, GameDriver, ParticipantConfig, RefereeConfig, TerminationReason,
    read_initial_state,
};
use referee_proto::{GameState, Role};
use std::io::stdout;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "referee.yml";

/// Referee - plays a game between a player process and a judge process
#[derive(Parser, Debug)]
#[command(name = "referee", version, about)]
struct Cli {
    /// File containing the initial game state
    #[arg(value_name = "INITIAL_GAME", value_parser = parse_initial_game)]
    initial_game: GameState,

    /// Path to configuration file (skipped if the default is absent)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Player command line (default: ./main)
    #[arg(long, value_name = "CMD")]
    player: Option<String>,

    /// Judge command line (default: ./judge)
    #[arg(long, value_name = "CMD")]
    judge: Option<String>,

    /// Stop after this many turns without a winner (exit code 2)
    #[arg(long, value_name = "N")]
    max_turns: Option<u32>,

    /// Per-process timeout in seconds
    #[arg(long, value_name = "SECS")]
    turn_timeout: Option<u64>,

    /// Treat a non-zero exit status from the player or judge as fatal
    #[arg(long)]
    strict_exit_status: bool,

    /// Show the effective configuration without running the game
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Reads the initial state while arguments are parsed, so an unreadable
/// file is reported as a usage error.
fn parse_initial_game(path: &str) -> Result<GameState, String> {
    read_initial_state(path).map_err(|e| format!("can't open '{path}': {e}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;

    // Initialize logging
    let level = if cli.verbose || config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let warnings = config.validate().context("Configuration validation failed")?;
    for warning in &warnings {
        eprintln!("{warning}");
    }

    if cli.dry_run {
        print_dry_run(&config, &cli.initial_game);
        return Ok(());
    }

    let reason = run_game(&config, cli.initial_game).await?;
    let exit_code = reason.exit_code();

    // Use explicit exit for non-zero codes to ensure proper exit status
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<RefereeConfig> {
    let mut config = if cli.config.exists() {
        RefereeConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load config from {:?}", cli.config))?
    } else if cli.config.as_os_str() == DEFAULT_CONFIG {
        RefereeConfig::default()
    } else {
        anyhow::bail!("Config file {:?} not found", cli.config);
    };

    apply_overrides(&mut config, cli)?;
    Ok(config)
}

fn apply_overrides(config: &mut RefereeConfig, cli: &Cli) -> Result<()> {
    if let Some(ref line) = cli.player {
        config.player = ParticipantConfig::from_command_line(line)
            .context("--player needs a command")?;
    }
    if let Some(ref line) = cli.judge {
        config.judge =
            ParticipantConfig::from_command_line(line).context("--judge needs a command")?;
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = Some(max_turns);
    }
    if let Some(secs) = cli.turn_timeout {
        config.turn_timeout_secs = Some(secs);
    }
    if cli.strict_exit_status {
        config.strict_exit_status = true;
    }
    if cli.verbose {
        config.verbose = true;
    }
    Ok(())
}

fn print_dry_run(config: &RefereeConfig, initial: &GameState) {
    println!("Dry run mode - configuration:");
    println!("  Player: {}", config.player.display_line());
    println!("  Judge: {}", config.judge.display_line());
    match config.effective_max_turns() {
        Some(n) => println!("  Max turns: {n}"),
        None => println!("  Max turns: unlimited"),
    }
    match config.turn_timeout() {
        Some(timeout) => println!("  Turn timeout: {}s", timeout.as_secs()),
        None => println!("  Turn timeout: none"),
    }
    println!("  Strict exit status: {}", config.strict_exit_status);
    println!("  Initial state: {} bytes", initial.as_str().len());
}

async fn run_game(config: &RefereeConfig, initial: GameState) -> Result<TerminationReason> {
    let player = ProcessParticipant::from_config(Role::Player, config);
    let judge = ProcessParticipant::from_config(Role::Judge, config);
    debug!(player = %player.backend(), judge = %judge.backend(), "Participants ready");

    let mut driver =
        GameDriver::new(player, judge, stdout().lock()).with_config(DriverConfig::from(config));

    let outcome = driver.run(initial).await.context("Game aborted")?;
    info!(
        reason = outcome.reason.as_str(),
        turns = outcome.turns,
        "Game finished"
    );

    Ok(outcome.reason)
}

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use clue_app::config::GameConfig;
use clue_app::console::{Console, run_game};
use clue_app::logging::init_logging;
use clue_app::turnlog::CsvTurnLog;
use clue_core::engine::DeductionEngine;
use clue_core::model::domain::CardDomain;

/// Deduction assistant for Clue.
#[derive(Debug, Parser)]
#[command(
    name = "mdclue",
    author,
    version,
    about = "Tracks what every player can and cannot be holding"
)]
struct Cli {
    /// Path to the YAML game configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "clue.yaml")]
    config: PathBuf,

    /// Override the game identifier (substitutes {game_id} templates).
    #[arg(long, value_name = "GAME_ID")]
    game_id: Option<String>,

    /// Start the built-in trial game instead of reading a config file.
    #[arg(long)]
    trial: bool,

    /// Exit after validating the configuration (no game is started).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = if cli.trial {
        GameConfig::trial()
    } else {
        GameConfig::from_path(&cli.config)?
    };

    if let Some(game_id) = cli.game_id {
        config.game_id = game_id;
    }

    config.validate()?;

    if cli.validate_only {
        println!(
            "Configuration '{}' is valid ({} players).",
            config.game_id,
            config.players.len() + 1
        );
        return Ok(());
    }

    let outputs = config.resolved_outputs();
    let _logging = init_logging(&config.logging, &outputs.session_log)?;

    let roster = config.roster()?;
    let observer_hand = config.observer_hand()?;
    let player_names: Vec<String> = roster.names().map(String::from).collect();
    let turn_log = CsvTurnLog::create(&outputs.turn_log, &player_names)
        .with_context(|| format!("creating turn log at {}", outputs.turn_log.display()))?;

    let mut engine = DeductionEngine::with_sink(
        CardDomain::standard(),
        roster,
        observer_hand,
        Box::new(turn_log),
    )?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    run_game(&mut engine, &config.game_id, &mut console)
}

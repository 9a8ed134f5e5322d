//! tictactoe_oracle - unified CLI
//!
//! Builds the solved registries and plays games in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_oracle::{FirstPlayer, GameSession, OracleConfig, RegistryStore, Terminal};
use tictactoe_oracle_core::{Assignment, Board, Symbol, choose_move, classify};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = OracleConfig::load_or_default(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    match cli.command {
        Command::Build { force } => run_build(config.with_rebuild(force)),
        Command::Play {
            level,
            first,
            second,
        } => {
            if let Some(level) = level {
                config = config.with_level(level);
            }
            if first {
                config = config.with_first_player(FirstPlayer::User);
            } else if second {
                config = config.with_first_player(FirstPlayer::Computer);
            }
            run_play(config)
        }
        Command::Classify { board, computer } => run_classify(&board, computer.into()),
        Command::Suggest {
            board,
            computer,
            level,
        } => {
            if let Some(level) = level {
                config = config.with_level(level);
            }
            run_suggest(config, &board, computer.into())
        }
    }
}

/// Build and save both registries
#[instrument(skip_all)]
fn run_build(config: OracleConfig) -> Result<()> {
    let store = RegistryStore::load_or_build(config.data_dir(), *config.rebuild())?;
    for symbol in [Symbol::X, Symbol::O] {
        println!(
            "computer {}: {} positions",
            symbol,
            store.for_computer(symbol).len()
        );
    }
    info!(data_dir = %config.data_dir().display(), "Build complete");
    Ok(())
}

/// Play one game on stdin/stdout
#[instrument(skip_all, fields(level = %config.level()))]
fn run_play(config: OracleConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout());
    terminal.welcome()?;

    let first_player = match config.first_player() {
        Some(first_player) => *first_player,
        None => terminal.ask_first_player()?,
    };

    let store = RegistryStore::load_or_build(config.data_dir(), *config.rebuild())?;
    terminal.show_slot_numbers()?;

    let mut session = GameSession::new(first_player.user_symbol(), *config.level(), &store);
    let status = terminal.play(&mut session, &mut rand::rng())?;
    terminal.announce(status)?;
    Ok(())
}

/// Print the solved outcome of a position
#[instrument]
fn run_classify(board: &str, computer: Symbol) -> Result<()> {
    let board = Board::parse(board)?;
    let assignment = Assignment::computer_plays(computer);
    let outcome = classify(&board, &assignment)?;
    print!("{board}");
    println!("computer {computer}: {outcome:?}");
    Ok(())
}

/// Print the computer's move for a position
#[instrument(skip(config))]
fn run_suggest(config: OracleConfig, board: &str, computer: Symbol) -> Result<()> {
    let board = Board::parse(board)?;
    let store = RegistryStore::load_or_build(config.data_dir(), *config.rebuild())?;
    let mut rng = rand::rng();
    let strategy = config.level().strategy(&mut rng);
    let slot = choose_move(
        &board,
        Some(store.for_computer(computer)),
        &Assignment::computer_plays(computer),
        strategy,
        &mut rng,
    )?;
    println!("{slot} ({strategy:?})");
    Ok(())
}

//! Command-line interface for tictactoe_oracle.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_oracle::Level;
use tictactoe_oracle_core::Symbol;

/// Tic-tac-toe against a solved computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_oracle")]
#[command(about = "Tic-tac-toe with a tunable perfect-play opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(long, global = true, default_value = "tictactoe_oracle.toml")]
    pub config: PathBuf,

    /// Directory for the persisted registries (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Symbol argument.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SymbolArg {
    /// X, moves first
    X,
    /// O, moves second
    O,
}

impl From<SymbolArg> for Symbol {
    fn from(arg: SymbolArg) -> Self {
        match arg {
            SymbolArg::X => Symbol::X,
            SymbolArg::O => Symbol::O,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and save both outcome registries
    Build {
        /// Rebuild even if registry files exist
        #[arg(long)]
        force: bool,
    },

    /// Play a game in the terminal
    Play {
        /// Opponent difficulty (overrides config)
        #[arg(short, long, value_enum)]
        level: Option<Level>,

        /// Move first as X
        #[arg(long, conflicts_with = "second")]
        first: bool,

        /// Move second as O
        #[arg(long)]
        second: bool,
    },

    /// Print the solved outcome of a position
    Classify {
        /// Board as 9 characters of X, O and -
        board: String,

        /// Symbol the computer plays
        #[arg(short, long, value_enum)]
        computer: SymbolArg,
    },

    /// Print the move the computer would play
    Suggest {
        /// Board as 9 characters of X, O and -
        board: String,

        /// Symbol the computer plays
        #[arg(short, long, value_enum)]
        computer: SymbolArg,

        /// Opponent difficulty (overrides config)
        #[arg(short, long, value_enum)]
        level: Option<Level>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_force_and_global_data_dir() {
        let cli = Cli::try_parse_from(["tictactoe_oracle", "build", "--force", "--data-dir", "out"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("out")));
        assert!(matches!(cli.command, Command::Build { force: true }));
    }

    #[test]
    fn test_play_rejects_first_and_second_together() {
        let result = Cli::try_parse_from(["tictactoe_oracle", "play", "--first", "--second"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_classify_and_suggest_arguments() {
        let cli = Cli::try_parse_from(["tictactoe_oracle", "classify", "XX-OO----", "-c", "o"])
            .unwrap();
        match cli.command {
            Command::Classify { board, computer } => {
                assert_eq!(board, "XX-OO----");
                assert_eq!(Symbol::from(computer), Symbol::O);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "tictactoe_oracle",
            "suggest",
            "X--------",
            "--computer",
            "o",
            "--level",
            "easy",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Suggest {
                computer: SymbolArg::O,
                level: Some(Level::Easy),
                ..
            }
        ));
    }
}

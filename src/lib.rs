//! Tic-tac-toe against a solved, tunable computer opponent.
//!
//! # Architecture
//!
//! - **Core** (`tictactoe_oracle_core`): board model, exhaustive solver, move policy
//! - **Store**: the two solved registries persisted as JSON
//! - **Session**: one game with an explicit player pairing and difficulty
//! - **Terminal**: line-based front end driving a session
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_oracle::{GameSession, Level, RegistryStore};
//! use tictactoe_oracle_core::Symbol;
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = RegistryStore::load_or_build("data", false)?;
//! let mut session = GameSession::new(Symbol::X, Level::Hard, &store);
//! session.user_move(4)?;
//! session.computer_move(&mut rand::rng())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod session;
mod settings;
mod store;
mod terminal;

pub use config::{ConfigError, OracleConfig};
pub use session::{GameSession, GameStatus, SessionError};
pub use settings::{FirstPlayer, Level};
pub use store::{RegistryStore, StoreError};
pub use terminal::Terminal;

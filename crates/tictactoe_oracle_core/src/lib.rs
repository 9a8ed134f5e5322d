//! Pure tic-tac-toe logic for a solved computer opponent.
//!
//! - **Board**: 3x3 position model, parsing, winner/draw/turn queries
//! - **Solver**: exhaustive backward induction into an outcome [`Registry`]
//! - **Policy**: optimal (registry) and heuristic move selection
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use tictactoe_oracle_core::{Assignment, Board, Strategy, Symbol, choose_move, classify_all};
//!
//! # fn main() -> Result<(), tictactoe_oracle_core::OracleError> {
//! let registry = classify_all(Symbol::O)?;
//! let board = Board::parse("X--------")?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let slot = choose_move(
//!     &board,
//!     Some(&registry),
//!     &Assignment::computer_plays(Symbol::O),
//!     Strategy::Optimal,
//!     &mut rng,
//! )?;
//! assert!(board.is_empty(slot));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod invariants;
mod lines;
mod policy;
mod solver;
mod types;

pub use board::{Board, CELLS};
pub use error::{OracleError, OracleErrorKind, OracleResult};
pub use invariants::{
    BalancedCounts, Invariant, InvariantSet, InvariantViolation, ReachableBoard,
    SingleWinningSymbol, WinnerMovedLast,
};
pub use lines::{Combination, WINNING_LINES};
pub use policy::{Strategy, choose_move, completing_slots, heuristic_move, optimal_move};
pub use solver::{Registry, classify, classify_all};
pub use types::{Assignment, Outcome, Player, Symbol};

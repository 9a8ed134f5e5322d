//! Reachability invariants for boards.
//!
//! A board reachable by alternating legal play satisfies every invariant
//! here. The solver checks them on each position it registers in debug
//! builds.

use crate::board::Board;
use crate::types::Symbol;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// X count equals O count, or exceeds it by one.
pub struct BalancedCounts;

impl Invariant<Board> for BalancedCounts {
    fn holds(board: &Board) -> bool {
        board.turn().is_ok()
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

/// At most one symbol owns a completed line.
pub struct SingleWinningSymbol;

impl Invariant<Board> for SingleWinningSymbol {
    fn holds(board: &Board) -> bool {
        let owners = |symbol: Symbol| {
            crate::lines::WINNING_LINES
                .iter()
                .any(|line| line.iter().all(|&i| board.cells()[i] == Some(symbol)))
        };
        !(owners(Symbol::X) && owners(Symbol::O))
    }

    fn description() -> &'static str {
        "At most one symbol owns a completed line"
    }
}

/// The owner of a completed line made the last move.
pub struct WinnerMovedLast;

impl Invariant<Board> for WinnerMovedLast {
    fn holds(board: &Board) -> bool {
        let (x, o) = (board.count(Symbol::X), board.count(Symbol::O));
        match board.winning_line() {
            Some((Symbol::X, _)) => x == o + 1,
            Some((Symbol::O, _)) => x == o,
            None => true,
        }
    }

    fn description() -> &'static str {
        "The owner of a completed line made the last move"
    }
}

/// Every invariant of a reachable board.
pub type ReachableBoard = (BalancedCounts, SingleWinningSymbol, WinnerMovedLast);

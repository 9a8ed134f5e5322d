//! Exhaustive outcome solver.
//!
//! Classifies every position reachable from the empty board by backward
//! induction, assuming both sides play optimally. The computer picks the
//! best child for itself (`Win`, then `Draw`, then `Loss`); the user picks
//! the worst child for the computer.
//!
//! Only final positions and positions where the user is about to move are
//! registered. Move selection hypothesizes a computer move and looks up the
//! resulting board, which is always one of those two kinds.

use crate::board::Board;
use crate::error::{OracleError, OracleErrorKind, OracleResult};
use crate::invariants::{InvariantSet, ReachableBoard};
use crate::types::{Assignment, Outcome, Player, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

/// Solved outcomes for one fixed computer symbol, keyed by canonical board key.
///
/// Built once by [`classify_all`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Symbol the computer plays in every registered position.
    computer: Symbol,
    /// Canonical key to outcome.
    outcomes: BTreeMap<String, Outcome>,
}

impl Registry {
    /// Symbol the computer plays.
    pub fn computer(&self) -> Symbol {
        self.computer
    }

    /// The player pairing this registry was solved for.
    pub fn assignment(&self) -> Assignment {
        Assignment::computer_plays(self.computer)
    }

    /// Outcome for `board`, if registered.
    pub fn get(&self, board: &Board) -> Option<Outcome> {
        self.outcomes.get(&board.key()).copied()
    }

    /// Outcome for `board`.
    ///
    /// # Errors
    ///
    /// `RegistryMiss` when the board is not registered.
    pub fn outcome(&self, board: &Board) -> OracleResult<Outcome> {
        let key = board.key();
        match self.outcomes.get(&key) {
            Some(outcome) => Ok(*outcome),
            None => Err(OracleError::new(OracleErrorKind::RegistryMiss { key })),
        }
    }

    /// Number of registered positions.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterates over `(key, outcome)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Outcome)> {
        self.outcomes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Checks a registry that came from outside the solver: every key must
    /// parse as a board and no outcome may be `Undetermined`.
    ///
    /// # Errors
    ///
    /// `CorruptRegistry` naming the first bad entry.
    #[instrument(skip(self), fields(computer = %self.computer, entries = self.outcomes.len()))]
    pub fn validate(&self) -> OracleResult<()> {
        for (key, outcome) in &self.outcomes {
            if let Err(e) = Board::parse(key) {
                return Err(OracleError::new(OracleErrorKind::CorruptRegistry {
                    key: key.clone(),
                    reason: e.kind().to_string(),
                }));
            }
            if !outcome.is_final() {
                return Err(OracleError::new(OracleErrorKind::CorruptRegistry {
                    key: key.clone(),
                    reason: "outcome is undetermined".to_string(),
                }));
            }
        }
        Ok(())
    }
}

/// Builds the full registry for a computer playing `computer`.
///
/// # Errors
///
/// `InvalidBoard` only if move generation produced an unreachable board,
/// which indicates a defect rather than bad input.
#[instrument]
pub fn classify_all(computer: Symbol) -> OracleResult<Registry> {
    let mut solver = Solver::new(Assignment::computer_plays(computer));
    let root = solver.rank(&Board::new())?;
    let registry = Registry {
        computer,
        outcomes: solver.table.into_iter().collect(),
    };
    info!(
        computer = %computer,
        entries = registry.len(),
        root = ?root,
        "Registry built"
    );
    Ok(registry)
}

/// Solves a single position under optimal play by both sides.
///
/// # Errors
///
/// `InvalidBoard` if `board` or any position below it is unreachable.
#[instrument(skip(board), fields(board = %board.key()))]
pub fn classify(board: &Board, assignment: &Assignment) -> OracleResult<Outcome> {
    let outcome = Solver::new(*assignment).rank(board)?;
    debug!(?outcome, "Position classified");
    Ok(outcome)
}

/// Memoizing minimax over one assignment.
struct Solver {
    assignment: Assignment,
    table: HashMap<String, Outcome>,
}

impl Solver {
    fn new(assignment: Assignment) -> Self {
        Self {
            assignment,
            table: HashMap::new(),
        }
    }

    fn rank(&mut self, board: &Board) -> OracleResult<Outcome> {
        let key = board.key();
        if let Some(&outcome) = self.table.get(&key) {
            return Ok(outcome);
        }

        let rank = board.rank(&self.assignment);
        if rank.is_final() {
            self.register(key, board, rank);
            return Ok(rank);
        }

        let mover = board.turn_player(&self.assignment)?;
        let symbol = self.assignment.symbol_of(mover);
        let mut outcomes = Vec::with_capacity(board.available_slots().len());
        for slot in board.available_slots() {
            let child = board.with_move(slot, symbol)?;
            outcomes.push(self.rank(&child)?);
        }

        // Children are final, so min/max follow Win < Draw < Loss.
        let best = match mover {
            Player::Computer => outcomes.iter().min(),
            Player::User => outcomes.iter().max(),
        };
        let outcome = best
            .copied()
            .ok_or_else(|| OracleError::new(OracleErrorKind::NoAvailableSlots))?;

        if mover == Player::User {
            self.register(key, board, outcome);
        }
        Ok(outcome)
    }

    fn register(&mut self, key: String, board: &Board, outcome: Outcome) {
        debug_assert!(
            ReachableBoard::check_all(board).is_ok(),
            "registering unreachable board {key}"
        );
        self.table.insert(key, outcome);
    }
}

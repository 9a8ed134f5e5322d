//! Move selection.
//!
//! Two independently callable strategies: [`optimal_move`] reads a solved
//! [`Registry`], [`heuristic_move`] only looks one move ahead. Which one a
//! difficulty level runs is the caller's decision.

use crate::board::Board;
use crate::error::{OracleError, OracleErrorKind, OracleResult};
use crate::lines::WINNING_LINES;
use crate::solver::Registry;
use crate::types::{Assignment, Outcome, Symbol};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::{debug, instrument};

/// How the computer picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Strategy {
    /// Registry lookup; never does worse than the game-theoretic value.
    Optimal,
    /// Win if possible, else block, else anything.
    Heuristic,
}

/// Picks a move with `strategy`.
///
/// # Errors
///
/// `MissingRegistry` for [`Strategy::Optimal`] without a registry,
/// `PerspectiveMismatch` if the registry was solved for the other symbol,
/// plus anything the strategy itself reports.
#[instrument(skip(board, registry, rng), fields(board = %board.key()))]
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    registry: Option<&Registry>,
    assignment: &Assignment,
    strategy: Strategy,
    rng: &mut R,
) -> OracleResult<usize> {
    match strategy {
        Strategy::Optimal => {
            let registry =
                registry.ok_or_else(|| OracleError::new(OracleErrorKind::MissingRegistry))?;
            if registry.computer() != assignment.computer() {
                return Err(OracleError::new(OracleErrorKind::PerspectiveMismatch {
                    expected: assignment.computer(),
                    found: registry.computer(),
                }));
            }
            optimal_move(board, registry, rng)
        }
        Strategy::Heuristic => heuristic_move(board, assignment, rng),
    }
}

/// Picks uniformly among the moves whose resulting position has the best
/// registered outcome.
///
/// # Errors
///
/// `NoAvailableSlots` on a full board. `RegistryMiss` if a hypothetical
/// board is absent, which means the registry does not match the game.
#[instrument(skip(board, registry, rng), fields(board = %board.key(), computer = %registry.computer()))]
pub fn optimal_move<R: Rng + ?Sized>(
    board: &Board,
    registry: &Registry,
    rng: &mut R,
) -> OracleResult<usize> {
    let computer = registry.computer();
    let mut best = Outcome::Undetermined;
    let mut best_slots = Vec::new();

    for slot in board.available_slots() {
        let outcome = registry.outcome(&board.with_move(slot, computer)?)?;
        if outcome < best {
            best = outcome;
            best_slots.clear();
        }
        if outcome == best {
            best_slots.push(slot);
        }
    }

    let slot = pick(&best_slots, rng)?;
    debug!(slot, outcome = ?best, candidates = ?best_slots, "Optimal move chosen");
    Ok(slot)
}

/// Completes a computer line if one is open, otherwise blocks a user line,
/// otherwise plays any empty cell. Each tier picks uniformly among its slots.
///
/// # Errors
///
/// `NoAvailableSlots` on a full board.
#[instrument(skip(board, rng), fields(board = %board.key()))]
pub fn heuristic_move<R: Rng + ?Sized>(
    board: &Board,
    assignment: &Assignment,
    rng: &mut R,
) -> OracleResult<usize> {
    let wins = completing_slots(board, assignment.computer());
    if !wins.is_empty() {
        debug!(candidates = ?wins, "Heuristic takes a win");
        return pick(&wins, rng);
    }

    let blocks = completing_slots(board, assignment.user());
    if !blocks.is_empty() {
        debug!(candidates = ?blocks, "Heuristic blocks");
        return pick(&blocks, rng);
    }

    pick(&board.available_slots(), rng)
}

/// Empty cells that would complete a line for `symbol`, ascending, deduplicated.
pub fn completing_slots(board: &Board, symbol: Symbol) -> Vec<usize> {
    let mut slots: Vec<usize> = WINNING_LINES
        .iter()
        .filter_map(|line| {
            let owned = line
                .iter()
                .filter(|&&i| board.cells()[i] == Some(symbol))
                .count();
            let mut empty = line.iter().copied().filter(|&i| board.is_empty(i));
            match (owned, empty.next(), empty.next()) {
                (2, Some(slot), None) => Some(slot),
                _ => None,
            }
        })
        .collect();
    slots.sort_unstable();
    slots.dedup();
    slots
}

fn pick<R: Rng + ?Sized>(slots: &[usize], rng: &mut R) -> OracleResult<usize> {
    slots
        .choose(rng)
        .copied()
        .ok_or_else(|| OracleError::new(OracleErrorKind::NoAvailableSlots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::classify_all;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn board(text: &str) -> Board {
        Board::parse(text).expect("valid board text")
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_heuristic_blocks_threat() {
        let a = Assignment::computer_plays(Symbol::O);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(heuristic_move(&board("XX-------"), &a, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_heuristic_prefers_win_over_block() {
        let a = Assignment::computer_plays(Symbol::O);
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(heuristic_move(&board("XX-OO----"), &a, &mut rng).unwrap(), 5);
        }
    }

    fn heuristic_picks(text: &str, computer: Symbol) -> BTreeSet<usize> {
        let a = Assignment::computer_plays(computer);
        let b = board(text);
        (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                heuristic_move(&b, &a, &mut rng).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_heuristic_blocks_among_all_threats() {
        // X threatens both the top row and the left column.
        assert_eq!(heuristic_picks("XX-XO----", Symbol::O), BTreeSet::from([2, 6]));
    }

    #[test]
    fn test_heuristic_wins_among_all_open_lines() {
        // X can finish the top row or the left column.
        assert_eq!(heuristic_picks("XX-X-O-O-", Symbol::X), BTreeSet::from([2, 6]));
    }

    #[test]
    fn test_heuristic_falls_back_to_empty_cell() {
        let a = Assignment::computer_plays(Symbol::X);
        let b = board("X---O----");
        let slot = heuristic_move(&b, &a, &mut rng()).unwrap();
        assert!(b.available_slots().contains(&slot));
    }

    #[test]
    fn test_completing_slots_deduplicates() {
        // The center completes both the middle row and the middle column.
        assert_eq!(completing_slots(&board("-X-X-X-X-"), Symbol::X), vec![4]);
    }

    #[test]
    fn test_optimal_takes_win() {
        let registry = classify_all(Symbol::O).unwrap();
        let slot = optimal_move(&board("XX-OO-X--"), &registry, &mut rng()).unwrap();
        assert_eq!(slot, 5);
    }

    #[test]
    fn test_optimal_blocks() {
        let registry = classify_all(Symbol::O).unwrap();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(optimal_move(&board("X-O-X----"), &registry, &mut rng).unwrap(), 8);
        }
    }

    #[test]
    fn test_optimal_without_registry_fails() {
        let a = Assignment::computer_plays(Symbol::X);
        let err = choose_move(&Board::new(), None, &a, Strategy::Optimal, &mut rng()).unwrap_err();
        assert_eq!(err.kind(), &OracleErrorKind::MissingRegistry);
    }

    #[test]
    fn test_unregistered_position_is_fatal() {
        // O has just moved, so none of X's replies are registered for computer O.
        let registry = classify_all(Symbol::O).unwrap();
        let b = board("XO-------");

        let err = optimal_move(&b, &registry, &mut rng()).unwrap_err();
        assert!(matches!(err.kind(), OracleErrorKind::RegistryMiss { .. }));

        let a = Assignment::computer_plays(Symbol::O);
        let err = choose_move(&b, Some(&registry), &a, Strategy::Optimal, &mut rng()).unwrap_err();
        assert_eq!(
            err.kind(),
            &OracleErrorKind::RegistryMiss {
                key: "XOO------".to_string()
            }
        );
    }

    #[test]
    fn test_perspective_mismatch_is_rejected() {
        let registry = classify_all(Symbol::X).unwrap();
        let a = Assignment::computer_plays(Symbol::O);
        let err = choose_move(
            &board("X--------"),
            Some(&registry),
            &a,
            Strategy::Optimal,
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &OracleErrorKind::PerspectiveMismatch {
                expected: Symbol::O,
                found: Symbol::X
            }
        );
    }

    #[test]
    fn test_full_board_has_no_move() {
        let a = Assignment::computer_plays(Symbol::X);
        let err = heuristic_move(&board("XOXXOOOXX"), &a, &mut rng()).unwrap_err();
        assert_eq!(err.kind(), &OracleErrorKind::NoAvailableSlots);
    }
}

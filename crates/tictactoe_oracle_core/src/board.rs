//! The 3x3 board and its queries.

use crate::error::{OracleError, OracleErrorKind, OracleResult};
use crate::lines::{Combination, WINNING_LINES};
use crate::types::{Assignment, Outcome, Player, Symbol};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Character used for an empty cell in keys and renderings.
const EMPTY: char = '-';

/// 3x3 tic-tac-toe board.
///
/// Cells are indexed 0-8 in row-major order. Boards are plain values:
/// [`Board::with_move`] returns a new board and leaves the original alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Option<Symbol>; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from up to 9 leading cells; the rest are empty.
    ///
    /// # Errors
    ///
    /// `InvalidLength` if more than 9 cells are supplied.
    #[instrument(skip(cells), fields(len = cells.len()))]
    pub fn from_cells(cells: &[Option<Symbol>]) -> OracleResult<Self> {
        if cells.len() > CELLS {
            return Err(OracleError::new(OracleErrorKind::InvalidLength {
                found: cells.len(),
            }));
        }
        let mut board = Self::new();
        board.cells[..cells.len()].copy_from_slice(cells);
        Ok(board)
    }

    /// Parses the `X`/`O`/`-` text form. Whitespace is skipped, so both
    /// [`Board::key`] and the grid rendering parse back.
    ///
    /// # Errors
    ///
    /// `InvalidCharacter` for anything else, `InvalidLength` unless
    /// exactly 9 cells are found.
    #[instrument]
    pub fn parse(text: &str) -> OracleResult<Self> {
        let mut cells = Vec::with_capacity(CELLS);
        for (position, character) in text.chars().enumerate() {
            let cell = match character {
                'X' => Some(Symbol::X),
                'O' => Some(Symbol::O),
                EMPTY => None,
                c if c.is_whitespace() => continue,
                character => {
                    return Err(OracleError::new(OracleErrorKind::InvalidCharacter {
                        character,
                        position,
                    }));
                }
            };
            cells.push(cell);
        }
        if cells.len() != CELLS {
            return Err(OracleError::new(OracleErrorKind::InvalidLength {
                found: cells.len(),
            }));
        }
        Self::from_cells(&cells)
    }

    /// Canonical 9-character key, one of `X`/`O`/`-` per cell in index order.
    pub fn key(&self) -> String {
        self.cells.iter().map(|cell| cell_char(*cell)).collect()
    }

    /// Gets the cell at `index`, `None` when out of range.
    pub fn cell(&self, index: usize) -> Option<Option<Symbol>> {
        self.cells.get(index).copied()
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Option<Symbol>; CELLS] {
        &self.cells
    }

    /// Checks if a cell is empty. Out-of-range indices are not empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cell(index), Some(None))
    }

    /// Checks if every cell holds a symbol.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|c| **c == Some(symbol)).count()
    }

    /// First completed line in scan order and the symbol owning it.
    pub fn winning_line(&self) -> Option<(Symbol, Combination)> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            match self.cells[a] {
                Some(symbol) if self.cells[b] == Some(symbol) && self.cells[c] == Some(symbol) => {
                    Some((symbol, line))
                }
                _ => None,
            }
        })
    }

    /// The winning player and their line, if any.
    pub fn winner(&self, assignment: &Assignment) -> Option<(Player, Combination)> {
        self.winning_line()
            .map(|(symbol, line)| (assignment.player_of(symbol), line))
    }

    /// Full board with no winner.
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winning_line().is_none()
    }

    /// Direct outcome of this position from the computer's perspective.
    pub fn rank(&self, assignment: &Assignment) -> Outcome {
        match self.winner(assignment) {
            Some((Player::Computer, _)) => Outcome::Win,
            Some((Player::User, _)) => Outcome::Loss,
            None if self.is_full() => Outcome::Draw,
            None => Outcome::Undetermined,
        }
    }

    /// Indices of empty cells, ascending.
    pub fn available_slots(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    /// Symbol due to move, derived from the symbol counts.
    ///
    /// # Errors
    ///
    /// `InvalidBoard` when the counts cannot arise from alternating play.
    pub fn turn(&self) -> OracleResult<Symbol> {
        let x_count = self.count(Symbol::X);
        let o_count = self.count(Symbol::O);
        if x_count == o_count {
            Ok(Symbol::X)
        } else if x_count == o_count + 1 {
            Ok(Symbol::O)
        } else {
            Err(OracleError::new(OracleErrorKind::InvalidBoard {
                x_count,
                o_count,
            }))
        }
    }

    /// Player due to move under `assignment`.
    pub fn turn_player(&self, assignment: &Assignment) -> OracleResult<Player> {
        self.turn().map(|symbol| assignment.player_of(symbol))
    }

    /// Returns a copy of this board with `symbol` placed at `slot`.
    ///
    /// # Errors
    ///
    /// `SlotOutOfRange` or `SlotOccupied`.
    pub fn with_move(&self, slot: usize, symbol: Symbol) -> OracleResult<Self> {
        let mut next = *self;
        next.place(slot, symbol)?;
        Ok(next)
    }

    /// Places `symbol` at `slot` in place.
    ///
    /// # Errors
    ///
    /// `SlotOutOfRange` or `SlotOccupied`.
    pub fn place(&mut self, slot: usize, symbol: Symbol) -> OracleResult<()> {
        match self.cells.get_mut(slot) {
            None => Err(OracleError::new(OracleErrorKind::SlotOutOfRange { slot })),
            Some(Some(_)) => Err(OracleError::new(OracleErrorKind::SlotOccupied { slot })),
            Some(cell) => {
                *cell = Some(symbol);
                Ok(())
            }
        }
    }
}

fn cell_char(cell: Option<Symbol>) -> char {
    cell.map_or(EMPTY, Symbol::as_char)
}

impl FromStr for Board {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the human-readable grid: three rows of three space-separated
/// cells, each row newline-terminated.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(3) {
            let [a, b, c] = [row[0], row[1], row[2]].map(cell_char);
            writeln!(f, "{a} {b} {c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text).expect("valid board text")
    }

    #[test]
    fn test_empty_board() {
        let b = Board::new();
        assert_eq!(b.key(), "---------");
        assert_eq!(b.available_slots(), (0..9).collect::<Vec<_>>());
        assert_eq!(b.turn().unwrap(), Symbol::X);
    }

    #[test]
    fn test_from_cells_pads_with_empty() {
        let b = Board::from_cells(&[Some(Symbol::X), None, Some(Symbol::O)]).unwrap();
        assert_eq!(b.key(), "X-O------");
    }

    #[test]
    fn test_from_cells_rejects_ten() {
        let err = Board::from_cells(&[None; 10]).unwrap_err();
        assert_eq!(err.kind(), &OracleErrorKind::InvalidLength { found: 10 });
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let err = Board::parse("XO-XO-XOZ").unwrap_err();
        assert_eq!(
            err.kind(),
            &OracleErrorKind::InvalidCharacter {
                character: 'Z',
                position: 8
            }
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            Board::parse("XO-").unwrap_err().kind(),
            OracleErrorKind::InvalidLength { found: 3 }
        ));
        assert!(matches!(
            Board::parse("----------").unwrap_err().kind(),
            OracleErrorKind::InvalidLength { found: 10 }
        ));
    }

    #[test]
    fn test_grid_rendering_parses_back() {
        let b = board("XO--X---O");
        assert_eq!(b.to_string(), "X O -\n- X -\n- - O\n");
        assert_eq!(board(&b.to_string()), b);
    }

    #[test]
    fn test_winner_scan_order_prefers_rows() {
        // Row 0 and column 0 both complete: the row comes first.
        let b = board("XXXX--X--");
        assert_eq!(b.winning_line(), Some((Symbol::X, [0, 1, 2])));
    }

    #[test]
    fn test_winner_maps_to_player() {
        let b = board("O--XO-XXO");
        let a = Assignment::computer_plays(Symbol::O);
        assert_eq!(b.winner(&a), Some((Player::Computer, [0, 4, 8])));
        assert_eq!(b.rank(&a), Outcome::Win);
        assert_eq!(b.rank(&Assignment::computer_plays(Symbol::X)), Outcome::Loss);
    }

    #[test]
    fn test_draw_and_rank() {
        let a = Assignment::computer_plays(Symbol::X);
        let drawn = board("XOXXOOOXX");
        assert!(drawn.is_draw());
        assert_eq!(drawn.rank(&a), Outcome::Draw);

        let open = board("XO-------");
        assert!(!open.is_draw());
        assert_eq!(open.rank(&a), Outcome::Undetermined);
    }

    #[test]
    fn test_turn_rejects_unbalanced_counts() {
        assert_eq!(board("X--------").turn().unwrap(), Symbol::O);
        let err = board("XX-------").turn().unwrap_err();
        assert_eq!(
            err.kind(),
            &OracleErrorKind::InvalidBoard {
                x_count: 2,
                o_count: 0
            }
        );
        assert!(board("O--------").turn().is_err());
    }

    #[test]
    fn test_with_move_leaves_original() {
        let b = Board::new();
        let next = b.with_move(4, Symbol::X).unwrap();
        assert_eq!(b, Board::new());
        assert_eq!(next.key(), "----X----");
    }

    #[test]
    fn test_place_rejects_bad_slots() {
        let mut b = board("X--------");
        assert_eq!(
            b.place(0, Symbol::O).unwrap_err().kind(),
            &OracleErrorKind::SlotOccupied { slot: 0 }
        );
        assert_eq!(
            b.place(9, Symbol::O).unwrap_err().kind(),
            &OracleErrorKind::SlotOutOfRange { slot: 9 }
        );
    }
}

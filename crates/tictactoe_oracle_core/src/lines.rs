//! The eight winning combinations.

/// Three board indices forming a line.
pub type Combination = [usize; 3];

/// Winning lines in scan order: rows top-to-bottom, columns
/// left-to-right, then the two diagonals.
pub const WINNING_LINES: [Combination; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

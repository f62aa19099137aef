//! Winning line analysis for Tic-Tac-Toe

use super::Square;

/// Every square on the board, in row order
pub const ALL_SQUARES: [Square; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// The middle square
pub const CENTER: Square = 5;

/// Winning lines on the 3x3 board
pub const WINNING_LINES: [[Square; 3]; 8] = [
    [1, 2, 3],
    [4, 5, 6],
    [7, 8, 9], // rows
    [1, 4, 7],
    [2, 5, 8],
    [3, 6, 9], // columns
    [1, 5, 9],
    [3, 5, 7], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a set of claimed squares covers any winning line
    pub fn has_won(claimed: &[Square]) -> bool {
        Self::winning_line(claimed).is_some()
    }

    /// First winning line fully contained in `claimed`, if any
    pub fn winning_line(claimed: &[Square]) -> Option<[Square; 3]> {
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|sq| claimed.contains(sq)))
            .copied()
    }
}

//! Win condition checking for tic-tac-toe
//!
//! Three marks in a row, column or diagonal win.

use crate::board::{Bitboard, Board, Mark, Pos};

/// The eight winning lines as row-major cell triples
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // Rows
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6], // Columns
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8], // Diagonals
    [2, 4, 6],
];

#[inline]
fn line_mask(line: &[usize; 3]) -> u16 {
    line.iter().fold(0, |mask, &idx| mask | Bitboard::cell_bit(idx))
}

/// Check if `mark` has three in a row
#[inline]
pub fn has_three(board: &Board, mark: Mark) -> bool {
    find_line(board, mark).is_some()
}

fn find_line(board: &Board, mark: Mark) -> Option<&'static [usize; 3]> {
    let marks = board.marks(mark)?;
    WIN_LINES.iter().find(|line| marks.contains_all(line_mask(line)))
}

/// The side holding a completed line, if any.
///
/// X is checked first; boards where both sides hold a line cannot arise
/// from legal play.
pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_three(board, mark))
}

/// Positions of the first completed line, for highlighting
pub fn winning_line(board: &Board) -> Option<[Pos; 3]> {
    let mark = winner(board)?;
    let line = find_line(board, mark)?;
    Some(line.map(Pos::from_index))
}

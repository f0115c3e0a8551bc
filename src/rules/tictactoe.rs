//! Tic-tac-toe rules adapter
//!
//! Utility is scored for `maximizer`; successors are generated in row-major
//! order of the empty cells, which fixes the engine's tie-breaks.

use crate::board::{Board, Mark};
use crate::error::{Error, Result};

use super::{winner, Rules};

/// Tic-tac-toe seen from one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    maximizer: Mark,
}

impl TicTacToe {
    /// Rules scored for `maximizer`.
    ///
    /// # Panics
    ///
    /// If `maximizer` is `Mark::Empty`. See [`TicTacToe::try_new`].
    pub fn new(maximizer: Mark) -> Self {
        match Self::try_new(maximizer) {
            Ok(rules) => rules,
            Err(err) => panic!("{err}"),
        }
    }

    /// Rules scored for `maximizer`, which must be `Mark::X` or `Mark::O`.
    pub fn try_new(maximizer: Mark) -> Result<Self> {
        if maximizer == Mark::Empty {
            return Err(Error::EmptyMark { role: "maximizer" });
        }
        Ok(Self { maximizer })
    }

    /// The side whose wins count as positive utility
    pub fn maximizer(&self) -> Mark {
        self.maximizer
    }
}

impl Rules for TicTacToe {
    type State = Board;

    fn is_terminal(&self, state: &Board) -> bool {
        winner(state).is_some() || state.is_full()
    }

    fn utility(&self, state: &Board) -> i32 {
        match winner(state) {
            Some(mark) if mark == self.maximizer => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    fn successors(&self, state: &Board) -> Vec<Board> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        state
            .empty_cells()
            .iter_ones()
            .map(|pos| state.after(pos))
            .collect()
    }

    fn maximizer_to_move(&self, state: &Board) -> Option<bool> {
        Some(state.to_move == self.maximizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_empty_board_has_nine_successors() {
        let rules = TicTacToe::new(Mark::O);
        let board = Board::with_first_mover(Mark::O);
        let next = rules.successors(&board);
        assert_eq!(next.len(), 9);
        assert_eq!(next[0].get(Pos::new(0, 0)), Mark::O);
        assert_eq!(next[8].get(Pos::new(2, 2)), Mark::O);
        assert!(next.iter().all(|b| b.to_move == Mark::X));
    }

    #[test]
    fn test_utility_is_relative_to_maximizer() {
        let x_wins = Board::parse("111000000", "000110000", Mark::O).unwrap();
        assert!(TicTacToe::new(Mark::O).is_terminal(&x_wins));
        assert_eq!(TicTacToe::new(Mark::O).utility(&x_wins), -1);
        assert_eq!(TicTacToe::new(Mark::X).utility(&x_wins), 1);
    }

    #[test]
    fn test_won_board_has_no_successors() {
        let x_wins = Board::parse("111000000", "000110000", Mark::O).unwrap();
        assert!(TicTacToe::new(Mark::O).successors(&x_wins).is_empty());
    }

    #[test]
    fn test_draw_is_terminal_with_zero_utility() {
        // X O X / X O O / O X X
        let draw = Board::parse("101100011", "010011100", Mark::O).unwrap();
        let rules = TicTacToe::new(Mark::O);
        assert!(rules.is_terminal(&draw));
        assert_eq!(rules.utility(&draw), 0);
    }

    #[test]
    fn test_maximizer_must_be_a_player() {
        assert_eq!(TicTacToe::try_new(Mark::X).unwrap().maximizer(), Mark::X);
        assert_eq!(
            TicTacToe::try_new(Mark::Empty),
            Err(Error::EmptyMark { role: "maximizer" })
        );
    }

    #[test]
    #[should_panic(expected = "maximizer must be X or O")]
    fn test_new_panics_on_empty_maximizer() {
        let _ = TicTacToe::new(Mark::Empty);
    }

    #[test]
    fn test_role_hint_follows_side_to_move() {
        let rules = TicTacToe::new(Mark::O);
        assert_eq!(rules.maximizer_to_move(&Board::with_first_mover(Mark::O)), Some(true));
        assert_eq!(rules.maximizer_to_move(&Board::with_first_mover(Mark::X)), Some(false));
    }
}

//! Board value type with side to move

use std::fmt;

use super::bitboard::{Bitboard, FULL_MASK};
use super::{Mark, Pos, TOTAL_CELLS};
use crate::error::{Error, Result};
use crate::rules::winner;

/// Tic-tac-toe position: both players' marks plus the side to move.
///
/// `Board` is a small `Copy` value; hashing and equality cover all three
/// fields, so it can key the engine's move cache directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// X marks
    pub x: Bitboard,
    /// O marks
    pub o: Bitboard,
    /// Side to move (never `Mark::Empty`)
    pub to_move: Mark,
}

impl Board {
    /// Empty board with X to move
    pub fn new() -> Self {
        Self::with_first_mover(Mark::X)
    }

    /// Empty board with the given side to move
    ///
    /// # Panics
    ///
    /// If `first` is `Mark::Empty`. See [`Board::try_with_first_mover`].
    pub fn with_first_mover(first: Mark) -> Self {
        match Self::try_with_first_mover(first) {
            Ok(board) => board,
            Err(err) => panic!("{err}"),
        }
    }

    /// Empty board with `first` to move, which must be `Mark::X` or `Mark::O`
    pub fn try_with_first_mover(first: Mark) -> Result<Self> {
        if first == Mark::Empty {
            return Err(Error::EmptyMark { role: "first mover" });
        }
        Ok(Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
            to_move: first,
        })
    }

    /// Build a board from raw masks (cell `i` in bit `8 - i`).
    ///
    /// Rejects stray bits, shared cells and piece counts that no game with
    /// `to_move` on turn could produce.
    pub fn from_bits(x: u16, o: u16, to_move: Mark) -> Result<Self> {
        let x_board = Bitboard::from_bits(x).ok_or_else(|| Error::InvalidBoardString {
            input: format!("{x:#b}"),
            reason: "more than nine cells".to_string(),
        })?;
        let o_board = Bitboard::from_bits(o).ok_or_else(|| Error::InvalidBoardString {
            input: format!("{o:#b}"),
            reason: "more than nine cells".to_string(),
        })?;
        if x & o != 0 {
            return Err(Error::OverlappingMarks { overlap: x & o });
        }

        let (x_count, o_count) = (x_board.count(), o_board.count());
        // Either side may open, so equal counts allow both; otherwise the
        // side that is behind must be on turn.
        let consistent = match to_move {
            Mark::X => x_count == o_count || o_count == x_count + 1,
            Mark::O => x_count == o_count || x_count == o_count + 1,
            Mark::Empty => false,
        };
        if !consistent {
            return Err(Error::InvalidPieceCounts {
                x_count,
                o_count,
                to_move: to_move.symbol(),
            });
        }

        Ok(Self {
            x: x_board,
            o: o_board,
            to_move,
        })
    }

    /// Parse a board from two nine-character bit strings, e.g.
    /// `Board::parse("101001000", "010110000", Mark::O)`.
    /// Underscores are ignored so `"101_001_000"` works too.
    pub fn parse(x: &str, o: &str, to_move: Mark) -> Result<Self> {
        Self::from_bits(parse_mask(x)?, parse_mask(o)?, to_move)
    }

    /// Get mark at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        if self.x.get(pos) {
            Mark::X
        } else if self.o.get(pos) {
            Mark::O
        } else {
            Mark::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.x.get(pos) && !self.o.get(pos)
    }

    /// Get bitboard for a mark (returns None for Empty)
    #[inline]
    pub fn marks(&self, mark: Mark) -> Option<&Bitboard> {
        match mark {
            Mark::X => Some(&self.x),
            Mark::O => Some(&self.o),
            Mark::Empty => None,
        }
    }

    /// Unoccupied cells
    #[inline]
    pub fn empty_cells(&self) -> Bitboard {
        Bitboard::from_bits(!(self.x.bits() | self.o.bits()) & FULL_MASK).unwrap_or_default()
    }

    /// Total marks on board
    #[inline]
    pub fn mark_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    /// Check if every cell is taken
    #[inline]
    pub fn is_full(&self) -> bool {
        self.mark_count() as usize == TOTAL_CELLS
    }

    /// Board after the side to move marks `pos`. The caller guarantees the
    /// cell is empty; use [`Board::play`] for checked moves.
    #[inline]
    pub fn after(&self, pos: Pos) -> Board {
        debug_assert!(self.is_empty(pos));
        let mut next = *self;
        match self.to_move {
            Mark::X => next.x.set(pos),
            Mark::O => next.o.set(pos),
            Mark::Empty => {}
        }
        next.to_move = self.to_move.opponent();
        next
    }

    /// Checked move by the side to move at row-major cell `index`.
    pub fn play(&self, index: usize) -> Result<Board> {
        if index >= TOTAL_CELLS {
            return Err(Error::InvalidPosition { index });
        }
        if winner(self).is_some() || self.is_full() {
            return Err(Error::GameOver);
        }
        let pos = Pos::from_index(index);
        if !self.is_empty(pos) {
            return Err(Error::CellOccupied { index });
        }
        Ok(self.after(pos))
    }

    /// The cell that differs between `self` and a successor, if exactly
    /// one mark was added.
    pub fn move_to(&self, next: &Board) -> Option<Pos> {
        let before = self.x.bits() | self.o.bits();
        let after = next.x.bits() | next.o.bits();
        let added = after & !before;
        if added.count_ones() != 1 || before & !after != 0 {
            return None;
        }
        let idx = TOTAL_CELLS - 1 - added.trailing_zeros() as usize;
        Some(Pos::from_index(idx))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            write!(f, "{}", self.get(pos).symbol())?;
            if pos.col as usize == super::BOARD_SIZE - 1 {
                if idx + 1 < TOTAL_CELLS {
                    writeln!(f)?;
                }
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

fn parse_mask(input: &str) -> Result<u16> {
    let digits: Vec<char> = input.chars().filter(|&c| c != '_').collect();
    if digits.len() != TOTAL_CELLS {
        return Err(Error::InvalidBoardString {
            input: input.to_string(),
            reason: format!("expected {TOTAL_CELLS} cells, got {}", digits.len()),
        });
    }

    let mut mask = 0u16;
    for (idx, c) in digits.into_iter().enumerate() {
        match c {
            '1' => mask |= Bitboard::cell_bit(idx),
            '0' => {}
            other => {
                return Err(Error::InvalidBoardString {
                    input: input.to_string(),
                    reason: format!("unexpected character '{other}'"),
                })
            }
        }
    }
    Ok(mask)
}

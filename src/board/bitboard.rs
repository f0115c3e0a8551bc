//! Bitboard for the 3x3 grid
//!
//! Cell `i` (row-major, top-left = 0) lives in bit `8 - i`, so a binary
//! literal such as `0b101_001_000` reads like the board it describes.

use super::{Pos, TOTAL_CELLS};

/// Mask with all nine cells set
pub const FULL_MASK: u16 = (1 << TOTAL_CELLS) - 1;

/// Nine-cell bitboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u16,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create from raw bits. Returns `None` if bits beyond the ninth cell are set.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !FULL_MASK != 0 {
            None
        } else {
            Some(Self { bits })
        }
    }

    /// Raw bits
    #[inline]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Bit for a row-major cell index
    #[inline]
    pub const fn cell_bit(idx: usize) -> u16 {
        1 << (TOTAL_CELLS - 1 - idx)
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= Self::cell_bit(pos.to_index());
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.bits &= !Self::cell_bit(pos.to_index());
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        self.bits & Self::cell_bit(pos.to_index()) != 0
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Check whether every bit of `mask` is set
    #[inline]
    pub fn contains_all(&self, mask: u16) -> bool {
        self.bits & mask == mask
    }

    /// Iterate over set positions in row-major order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            next_idx: 0,
        }
    }
}

/// Iterator over set bits in a Bitboard, top-left first
pub struct BitboardIter {
    bits: u16,
    next_idx: usize,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_idx < TOTAL_CELLS {
            let idx = self.next_idx;
            self.next_idx += 1;
            if self.bits & Bitboard::cell_bit(idx) != 0 {
                return Some(Pos::from_index(idx));
            }
        }
        None
    }
}

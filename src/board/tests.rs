use super::*;
use crate::error::Error;

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(1, 1); // Center
    assert_eq!(pos.to_index(), 4);

    let pos2 = Pos::from_index(7);
    assert_eq!(pos2.row, 2);
    assert_eq!(pos2.col, 1);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(2, 2));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, 3));
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 2) < Pos::new(1, 0));
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
}

#[test]
fn test_bitboard_cell_bits_read_like_the_board() {
    // Top-left is the most significant of the nine bits
    assert_eq!(Bitboard::cell_bit(0), 0b100_000_000);
    assert_eq!(Bitboard::cell_bit(8), 0b000_000_001);

    let bb = Bitboard::from_bits(0b101_001_000).unwrap();
    let cells: Vec<usize> = bb.iter_ones().map(Pos::to_index).collect();
    assert_eq!(cells, vec![0, 2, 5]);
    assert_eq!(bb.count(), 3);
}

#[test]
fn test_bitboard_rejects_stray_bits() {
    assert!(Bitboard::from_bits(1 << 9).is_none());
}

#[test]
fn test_parse_matches_from_bits() {
    let parsed = Board::parse("101001000", "010110000", Mark::O).unwrap();
    let raw = Board::from_bits(0b101_001_000, 0b010_110_000, Mark::O).unwrap();
    assert_eq!(parsed, raw);
    assert_eq!(Board::parse("101_001_000", "010_110_000", Mark::O).unwrap(), raw);
    assert_eq!(parsed.to_string(), "X O X\nO O X\n- - -");
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        Board::parse("10100100", "000000000", Mark::O),
        Err(Error::InvalidBoardString { .. })
    ));
    assert!(matches!(
        Board::parse("10100100x", "000000000", Mark::O),
        Err(Error::InvalidBoardString { .. })
    ));
    assert!(matches!(
        Board::parse("100000000", "100000000", Mark::O),
        Err(Error::OverlappingMarks { overlap: 0b100_000_000 })
    ));
    assert!(matches!(
        Board::parse("110000000", "000000000", Mark::X),
        Err(Error::InvalidPieceCounts { x_count: 2, o_count: 0, .. })
    ));
}

#[test]
fn test_play_switches_turn() {
    let board = Board::with_first_mover(Mark::O);
    let next = board.play(4).unwrap();
    assert_eq!(next.get(Pos::new(1, 1)), Mark::O);
    assert_eq!(next.to_move, Mark::X);
    assert_eq!(board.move_to(&next), Some(Pos::new(1, 1)));
}

#[test]
fn test_play_rejects_illegal_moves() {
    let board = Board::new().play(0).unwrap();
    assert_eq!(board.play(0), Err(Error::CellOccupied { index: 0 }));
    assert_eq!(board.play(9), Err(Error::InvalidPosition { index: 9 }));

    // X has the top row
    let won = Board::parse("111000000", "000110000", Mark::O).unwrap();
    assert_eq!(won.play(8), Err(Error::GameOver));
}

#[test]
fn test_empty_cells_and_full() {
    let board = Board::parse("101001000", "010110000", Mark::O).unwrap();
    assert_eq!(board.empty_cells().bits(), 0b000_000_111);
    assert!(!board.is_full());

    let full = Board::parse("101011010", "010100101", Mark::O).unwrap();
    assert!(full.is_full());
    assert!(full.empty_cells().is_empty());
}

#[test]
fn test_first_mover_must_be_a_player() {
    let board = Board::try_with_first_mover(Mark::O).unwrap();
    assert_eq!(board, Board::with_first_mover(Mark::O));
    assert_eq!(
        Board::try_with_first_mover(Mark::Empty),
        Err(Error::EmptyMark { role: "first mover" })
    );
}

#[test]
#[should_panic(expected = "first mover must be X or O")]
fn test_with_first_mover_panics_on_empty() {
    let _ = Board::with_first_mover(Mark::Empty);
}

//! Engine behaviour on tic-tac-toe positions

use minimax::{Board, Engine, EngineConfig, Mark, MoveSource, Rules, TicTacToe};

fn o_to_move(x: &str, o: &str) -> Board {
    Board::parse(x, o, Mark::O).unwrap()
}

fn x_to_move(x: &str, o: &str) -> Board {
    Board::parse(x, o, Mark::X).unwrap()
}

/// Engine playing O as the maximizer, searched from `start`
fn o_engine(start: &Board) -> Engine<TicTacToe> {
    Engine::new(TicTacToe::new(Mark::O), start, true)
}

#[test]
fn test_completes_winning_line() {
    let board = o_to_move("101001000", "010110000");
    let mut engine = o_engine(&board);
    assert_eq!(engine.solve(&board), Some(x_to_move("101001000", "010110010")));
}

#[test]
fn test_takes_immediate_win() {
    let board = o_to_move("110000000", "000110000");
    let mut engine = o_engine(&board);
    assert_eq!(engine.solve(&board), Some(x_to_move("110000000", "000111000")));
    assert_eq!(engine.last_build().unwrap().root_value, Some(99));
}

#[test]
fn test_blocks_immediate_loss() {
    let board = o_to_move("110000000", "000100000");
    let mut engine = o_engine(&board);
    assert_eq!(engine.solve(&board), Some(x_to_move("110000000", "001100000")));
}

#[test]
fn test_playthrough_from_empty_board_is_a_draw() {
    let start = Board::with_first_mover(Mark::O);
    let mut engine = o_engine(&start);

    let mut board = start;
    let mut plies = 0;
    while let Some(next) = engine.solve(&board) {
        // Exactly one mark added, by the side to move
        let pos = board.move_to(&next).expect("successor is one placement away");
        assert_eq!(next, board.play(pos.to_index()).unwrap());

        board = next;
        plies += 1;
        assert!(plies <= 9, "game must end within nine plies");
    }

    assert!(engine.rules().is_terminal(&board));
    assert_eq!(plies, 9);
    assert_eq!(engine.rules().utility(&board), 0);
}

#[test]
fn test_playthrough_with_x_first() {
    let start = Board::new();
    let mut engine = Engine::new(TicTacToe::new(Mark::O), &start, false);

    let line = engine.principal_line(&start);
    let last = line.last().unwrap();
    assert!(last.is_full());
    assert_eq!(engine.rules().utility(last), 0);
}

#[test]
fn test_terminal_position_returns_none() {
    // X holds the top row
    let board = o_to_move("111000000", "000110000");
    let mut engine = o_engine(&board);
    let result = engine.solve_with_stats(&board);
    assert_eq!(result.best_move, None);
    assert_eq!(result.source, MoveSource::GameOver);
    assert!(engine.cache().is_empty());
}

#[test]
fn test_second_solve_does_not_rebuild() {
    let start = Board::with_first_mover(Mark::O);
    let board = o_to_move("110000000", "000100000");
    let mut engine = o_engine(&start);

    let first = engine.solve(&board);
    let rebuilds = engine.rebuilds();
    let second = engine.solve_with_stats(&board);

    assert_eq!(second.best_move, first);
    assert_eq!(second.source, MoveSource::Cached);
    assert_eq!(engine.rebuilds(), rebuilds);
}

#[test]
fn test_cache_only_grows() {
    let start = Board::with_first_mover(Mark::O);
    let mut engine = o_engine(&start);
    let initial: Vec<(Board, Board)> = engine.cache().iter().map(|(s, n)| (*s, *n)).collect();

    // Visit every reply to every opening, forcing rebuilds off the cached line
    for opening in engine.rules().successors(&start) {
        for reply in engine.rules().successors(&opening) {
            let _ = engine.solve(&reply);
        }
    }

    assert!(engine.cache().len() >= initial.len());
    for (state, next) in initial {
        assert_eq!(engine.cache().get(&state), Some(&next));
    }
}

#[test]
fn test_eager_and_lazy_agree() {
    let start = Board::with_first_mover(Mark::O);
    let eager = Engine::with_config(TicTacToe::new(Mark::O), &start, true, EngineConfig::eager()).unwrap();
    let lazy = Engine::with_config(TicTacToe::new(Mark::O), &start, true, EngineConfig::lazy()).unwrap();

    assert_eq!(eager.cache().len(), lazy.cache().len());
    for (state, next) in lazy.cache().iter() {
        assert_eq!(eager.cache().get(state), Some(next));
    }

    let eager_stats = eager.last_build().unwrap();
    let lazy_stats = lazy.last_build().unwrap();
    assert_eq!(eager_stats.root_value, lazy_stats.root_value);
    assert_eq!(eager_stats.evaluated, lazy_stats.evaluated);
    // The full game tree versus the part alpha-beta visits
    assert_eq!(eager_stats.nodes, 549_946);
    assert!(lazy_stats.nodes < eager_stats.nodes);
}

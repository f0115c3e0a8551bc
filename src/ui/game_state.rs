//! Game state management for the tic-tac-toe GUI

use crate::board::{Board, Mark, Pos};
use crate::rules::{winner, winning_line, TicTacToe};
use crate::{Engine, MoveResult};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Engine specialised for the GUI's rules
pub type TicTacToeEngine = Engine<TicTacToe>;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE {
        human: Mark,
    },
    /// Player vs Player (hotseat)
    PvP {
        show_suggestions: bool,
    },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Mark::X }
    }
}

impl GameMode {
    /// Mark the engine maximizes for
    fn engine_mark(self) -> Mark {
        match self {
            GameMode::PvE { human } => human.opponent(),
            GameMode::PvP { .. } => Mark::X,
        }
    }
}

/// AI computation state. The engine travels to the worker and back.
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(TicTacToeEngine, MoveResult<Board>)>,
        start_time: Instant,
    },
}

/// How a game ended, or is predicted to end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl Outcome {
    /// Outcome of a finished board, if it is finished
    pub fn of(board: &Board) -> Option<Outcome> {
        match winner(board) {
            Some(mark) => Some(Outcome::Win(mark)),
            None if board.is_full() => Some(Outcome::Draw),
            None => None,
        }
    }
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub winning_line: Option<[Pos; 3]>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<Pos>,
    pub last_ai_result: Option<MoveResult<Board>>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    /// Result of perfect play from the position the last hint was asked for
    pub predicted_outcome: Option<Outcome>,
    pub message: Option<String>,

    // None while the worker thread holds it
    engine: Option<TicTacToeEngine>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        info!(?mode, "new game");
        Self {
            board: Board::new(),
            mode,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            predicted_outcome: None,
            message: None,
            engine: Some(Self::create_engine(mode)),
        }
    }

    fn create_engine(mode: GameMode) -> TicTacToeEngine {
        let start = Board::new();
        let mark = mode.engine_mark();
        Engine::new(TicTacToe::new(mark), &start, start.to_move == mark)
    }

    /// Start over in the same mode. The engine and its cache are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.predicted_outcome = None;
        self.message = None;

        // A worker still holding the engine is abandoned
        if self.is_ai_thinking() {
            self.ai_state = AiState::Idle;
            self.engine = Some(Self::create_engine(self.mode));
        }
    }

    /// Side to move
    pub fn current_turn(&self) -> Mark {
        self.board.to_move
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.board.to_move == human,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Number of positions the engine has a move for
    pub fn cached_positions(&self) -> Option<usize> {
        self.engine.as_ref().map(|engine| engine.cache().len())
    }

    /// Attempt to place a mark at the given position
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        let next = self.board.play(pos.to_index()).map_err(|e| e.to_string())?;
        self.execute_move(next, pos);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, next: Board, pos: Pos) {
        debug!(mark = ?self.board.to_move, index = pos.to_index(), "move played");

        self.board = next;
        self.move_history.push(pos);
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.predicted_outcome = None;
        self.move_timer.stop();

        if let Some(outcome) = Outcome::of(&self.board) {
            info!(?outcome, moves = self.move_history.len(), "game over");
            self.game_over = Some(GameResult {
                outcome,
                winning_line: winning_line(&self.board),
            });
            return;
        }

        self.move_timer.start();
        self.message = None;
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let Some(mut engine) = self.engine.take() else {
            self.message = Some("AI engine unavailable".to_string());
            return;
        };
        let board = self.board;

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.solve_with_stats(&board);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(std::sync::mpsc::TryRecvError::Empty) => None,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    warn!("AI worker exited without a result");
                    self.ai_state = AiState::Idle;
                    self.engine = Some(Self::create_engine(self.mode));
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(((engine, move_result), elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.engine = Some(engine);
            self.move_timer.set_ai_time(elapsed);

            let reply = move_result
                .best_move
                .and_then(|next| self.board.move_to(&next).map(|pos| (next, pos)));
            self.last_ai_result = Some(move_result);

            match reply {
                Some((next, pos)) => self.execute_move(next, pos),
                None => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion and predicted result for the side to move
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        let result = engine.solve_with_stats(&self.board);
        self.suggested_move = result.best_move.and_then(|next| self.board.move_to(&next));

        let line = engine.principal_line(&self.board);
        self.predicted_outcome = line.last().and_then(Outcome::of);
        if let GameMode::PvP { show_suggestions } = &mut self.mode {
            *show_suggestions = true;
        }

        self.last_ai_result = Some(result);
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo two moves (human + AI)
        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        // Simple undo: reset and replay
        let moves_to_keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<_> = self.move_history.drain(..moves_to_keep).collect();
        self.move_history.clear();

        self.board = Board::new();
        self.game_over = None;
        self.last_move = None;
        self.suggested_move = None;
        self.predicted_outcome = None;

        for pos in moves {
            match self.board.play(pos.to_index()) {
                Ok(next) => {
                    self.board = next;
                    self.move_history.push(pos);
                    self.last_move = Some(pos);
                }
                Err(err) => {
                    warn!(%err, "undo replay stopped");
                    break;
                }
            }
        }

        self.move_timer.start();
    }
}

//! Game session: one board, one engine side, one search at a time
//!
//! Holds everything a game loop needs between moves. The board is only
//! changed through [`GameSession::play`] and the engine turn methods, and
//! never while an engine request is in flight.

use std::time::{Duration, Instant};

use log::{info, warn};

use crate::board::{Board, Move, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::rules::find_winning_line;
use crate::worker::{MoveRequest, MoveResponse, PendingMove, SearchWorker};

/// Engine computation state
#[derive(Debug)]
pub enum EngineState {
    Idle,
    Thinking {
        pending: PendingMove,
        started: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Stone,
    /// The five (or longer) run that ended the game
    pub winning_line: Vec<Pos>,
}

/// Main game state
#[derive(Debug)]
pub struct GameSession {
    config: EngineConfig,
    engine: Engine,
    initial: Board,
    board: Board,
    engine_side: Stone,
    first_to_move: Stone,
    current_turn: Stone,
    move_history: Vec<Move>,
    last_move: Option<Pos>,
    game_over: Option<GameResult>,
    engine_state: EngineState,
    last_engine_result: Option<MoveResponse>,
}

impl GameSession {
    /// New game on an empty board.
    pub fn new(
        config: EngineConfig,
        engine_side: Stone,
        first_to_move: Stone,
    ) -> Result<Self, EngineError> {
        Self::from_board(config, Board::new(), engine_side, first_to_move)
    }

    /// Continue from an existing position. Undo never goes past it.
    pub fn from_board(
        config: EngineConfig,
        board: Board,
        engine_side: Stone,
        to_move: Stone,
    ) -> Result<Self, EngineError> {
        if engine_side == Stone::Empty || to_move == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        let engine = Engine::with_config(config)?;
        let game_over = existing_five(&board);

        Ok(Self {
            config,
            engine,
            initial: board.clone(),
            board,
            engine_side,
            first_to_move: to_move,
            current_turn: to_move,
            move_history: Vec::new(),
            last_move: None,
            game_over,
            engine_state: EngineState::Idle,
            last_engine_result: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn engine_side(&self) -> Stone {
        self.engine_side
    }

    pub fn human_side(&self) -> Stone {
        self.engine_side.opponent()
    }

    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    pub fn game_over(&self) -> Option<&GameResult> {
        self.game_over.as_ref()
    }

    pub fn last_engine_result(&self) -> Option<&MoveResponse> {
        self.last_engine_result.as_ref()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.current_turn == self.engine_side
    }

    /// Check if the engine is currently thinking
    pub fn is_thinking(&self) -> bool {
        matches!(self.engine_state, EngineState::Thinking { .. })
    }

    /// How long the outstanding request has been running
    pub fn thinking_elapsed(&self) -> Option<Duration> {
        match &self.engine_state {
            EngineState::Thinking { started, .. } => Some(started.elapsed()),
            EngineState::Idle => None,
        }
    }

    /// Board full and nobody won.
    pub fn is_draw(&self) -> bool {
        self.game_over.is_none() && self.board.is_full()
    }

    /// Human move for the side that is not the engine.
    pub fn play(&mut self, pos: Pos) -> Result<(), EngineError> {
        if self.game_over.is_some() {
            return Err(EngineError::GameOver);
        }
        if self.is_thinking() {
            return Err(EngineError::SearchInFlight);
        }
        if self.is_engine_turn() {
            return Err(EngineError::NotYourTurn);
        }
        if !Pos::is_valid(pos.row as i32, pos.col as i32) {
            return Err(EngineError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            });
        }

        self.execute_move(Move::new(pos, self.current_turn))
    }

    /// Snapshot the board into a worker and return immediately.
    pub fn start_engine_turn(&mut self) -> Result<(), EngineError> {
        self.check_engine_turn()?;

        let request = MoveRequest::new(self.board.clone(), self.engine_side, &self.config);
        let pending = SearchWorker::spawn(request)?;
        self.engine_state = EngineState::Thinking {
            pending,
            started: Instant::now(),
        };
        Ok(())
    }

    /// Poll the outstanding request and apply its move once it arrives.
    ///
    /// `Ok(None)` while the worker is still searching or when nothing is in
    /// flight.
    pub fn poll_engine(&mut self) -> Result<Option<MoveResponse>, EngineError> {
        let polled = match &self.engine_state {
            EngineState::Thinking { pending, .. } => pending.try_recv(),
            EngineState::Idle => return Ok(None),
        };

        match polled {
            Ok(Some(response)) => {
                self.engine_state = EngineState::Idle;
                self.apply_engine_response(response.clone())?;
                Ok(Some(response))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                warn!("search worker went away: {}", err);
                self.engine_state = EngineState::Idle;
                Err(err)
            }
        }
    }

    /// Block until the outstanding request answers, then apply it.
    pub fn wait_engine(&mut self) -> Result<Option<MoveResponse>, EngineError> {
        match std::mem::replace(&mut self.engine_state, EngineState::Idle) {
            EngineState::Thinking { pending, .. } => {
                let response = pending.wait()?;
                self.apply_engine_response(response.clone())?;
                Ok(Some(response))
            }
            EngineState::Idle => Ok(None),
        }
    }

    /// Engine move computed on the caller's thread.
    pub fn play_engine_turn(&mut self) -> Result<MoveResponse, EngineError> {
        self.check_engine_turn()?;

        let result = self
            .engine
            .get_move_with_stats(&self.board, self.engine_side);
        let response = MoveResponse::from(&result);
        self.apply_engine_response(response.clone())?;
        Ok(response)
    }

    /// Take back the last move pair (or the single move when only one was
    /// played) by replaying the rest from the starting position.
    ///
    /// Returns how many moves were removed.
    pub fn undo(&mut self) -> Result<usize, EngineError> {
        if self.is_thinking() {
            return Err(EngineError::SearchInFlight);
        }
        if self.move_history.is_empty() {
            return Ok(0);
        }

        let undo_count = self.move_history.len().min(2);
        let keep = self.move_history.len() - undo_count;
        let moves: Vec<Move> = self.move_history.drain(..keep).collect();

        self.board = self.initial.clone();
        self.current_turn = self.first_to_move;
        self.game_over = existing_five(&self.board);
        self.last_move = None;
        self.move_history.clear();

        for mv in moves {
            self.board.place_stone(mv.pos, mv.stone);
            self.move_history.push(mv);
            self.last_move = Some(mv.pos);
            self.current_turn = mv.stone.opponent();
        }

        Ok(undo_count)
    }

    /// Back to the starting position. An outstanding request is abandoned.
    pub fn reset(&mut self) {
        if self.is_thinking() {
            warn!("resetting with a search in flight, its answer will be dropped");
        }
        self.board = self.initial.clone();
        self.current_turn = self.first_to_move;
        self.move_history.clear();
        self.last_move = None;
        self.game_over = existing_five(&self.board);
        self.engine_state = EngineState::Idle;
        self.last_engine_result = None;
    }

    fn check_engine_turn(&self) -> Result<(), EngineError> {
        if self.game_over.is_some() {
            return Err(EngineError::GameOver);
        }
        if self.is_thinking() {
            return Err(EngineError::SearchInFlight);
        }
        if !self.is_engine_turn() {
            return Err(EngineError::NotYourTurn);
        }
        Ok(())
    }

    fn apply_engine_response(&mut self, response: MoveResponse) -> Result<(), EngineError> {
        let best_move = response.best_move;
        self.last_engine_result = Some(response);
        match best_move {
            Some(pos) => self.execute_move(Move::new(pos, self.engine_side)),
            // Only a full board leaves the engine without a move
            None => Ok(()),
        }
    }

    /// Execute a move (for both human and engine)
    fn execute_move(&mut self, mv: Move) -> Result<(), EngineError> {
        self.board.play(mv)?;
        self.move_history.push(mv);
        self.last_move = Some(mv.pos);

        if let Some(line) = find_winning_line(&self.board, mv.pos) {
            info!(
                "game over: {:?} wins with {} stones in a row",
                mv.stone,
                line.len()
            );
            self.game_over = Some(GameResult {
                winner: mv.stone,
                winning_line: line,
            });
            return Ok(());
        }

        self.current_turn = mv.stone.opponent();
        if self.board.is_full() {
            info!("game over: board full, draw");
        }
        Ok(())
    }
}

/// A five already standing on `board`, if any
fn existing_five(board: &Board) -> Option<GameResult> {
    Pos::all().find_map(|pos| {
        find_winning_line(board, pos).map(|line| GameResult {
            winner: board.get(pos),
            winning_line: line,
        })
    })
}

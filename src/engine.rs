//! Move orchestrator
//!
//! Runs the move strategies in priority order and returns the first move
//! any of them produces:
//!
//! 0. **Opening book**: fixed reply to the defender's first central stone
//! 1. **Immediate win**: a cell that completes five for the attacker
//! 2. **Defense**: a cell where the defender would complete five next move
//! 3. **Threat space**: forced win through open fours, under the time budget
//! 4. **Alpha-Beta**: fixed-depth fallback scored by the pattern evaluator
//! 5. **Last resort**: any empty cell next to a stone
//!
//! # Example
//!
//! ```
//! use gomoku::{Board, Engine, Pos, SearchType, Stone};
//!
//! let mut engine = Engine::new();
//! let mut board = Board::new();
//! for col in 2..6 {
//!     board.place_stone(Pos::new(7, col), Stone::Attacker);
//! }
//!
//! let result = engine.get_move_with_stats(&board, Stone::Attacker);
//! assert_eq!(result.best_move, Some(Pos::new(7, 1)));
//! assert_eq!(result.search_type, SearchType::ImmediateWin);
//! ```

use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Pos, Stone, BOARD_SIZE};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::opening::opening_reply;
use crate::search::{
    find_forced_block, find_immediate_win, Deadline, Decision, SearchResult, Searcher,
    ThreatSpaceSearcher,
};

/// Type of search that produced the result.
///
/// This indicates which phase of the search hierarchy found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// Reply from the opening book
    OpeningBook,
    /// Found immediate winning move (5-in-a-row)
    ImmediateWin,
    /// Defensive move to block opponent's five
    Defense,
    /// Forced win via open-four threats
    ThreatSpace,
    /// Fixed-depth alpha-beta result
    AlphaBeta,
    /// Any legal cell, when nothing else produced a move
    LastResort,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score of the position after the move
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn opening(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::OpeningBook,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 1_000_000,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn defense(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Defense,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn threat_space(pos: Pos, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 900_000,
            search_type: SearchType::ThreatSpace,
            time_ms,
            nodes,
        }
    }

    /// Map a fallback result onto the orchestrator's stages
    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64, nodes: u64) -> Self {
        let search_type = match result.decision {
            Decision::ImmediateWin => SearchType::ImmediateWin,
            Decision::ForcedBlock => SearchType::Defense,
            Decision::Evaluated => SearchType::AlphaBeta,
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            time_ms,
            nodes: nodes + result.nodes,
        }
    }

    #[inline]
    fn last_resort(pos: Option<Pos>, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: pos,
            score: 0,
            search_type: SearchType::LastResort,
            time_ms,
            nodes,
        }
    }
}

/// First empty cell (row-major) next to a stone; the centre on an empty
/// board; `None` only when the board is full.
pub fn last_resort(board: &Board) -> Option<Pos> {
    if board.is_board_empty() {
        let mid = (BOARD_SIZE / 2) as u8;
        return Some(Pos::new(mid, mid));
    }
    let mut empty = board.empty_cells().peekable();
    let first = empty.peek().copied();
    empty.find(|&p| board.has_neighbor(p)).or(first)
}

/// Move engine for one side of the board.
///
/// Holds the configuration and the searchers, which keep node counters
/// between calls. Boards are passed in per call and never kept.
///
/// # Example
///
/// ```
/// use gomoku::{Board, Engine, EngineConfig, Pos, Stone};
///
/// let config = EngineConfig { max_ply: 4, time_limit_ms: 200, use_opening_book: true };
/// let mut engine = Engine::with_config(config).unwrap();
///
/// let mut board = Board::new();
/// board.place_stone(Pos::new(4, 4), Stone::Defender);
/// assert_eq!(engine.get_move(&board, Stone::Attacker), Some(Pos::new(5, 5)));
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    threat_searcher: ThreatSpaceSearcher,
    searcher: Searcher,
}

impl Engine {
    /// Engine with [`EngineConfig::default`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            threat_searcher: ThreatSpaceSearcher::new(),
            searcher: Searcher::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for `attacker`, or `None` when the board is full.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, attacker: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, attacker).best_move
    }

    /// Best move with the stage that produced it and search statistics.
    ///
    /// The caller's board is never touched; searches run on a private copy.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, attacker: Stone) -> MoveResult {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;

        if attacker == Stone::Empty {
            return MoveResult::last_resort(None, elapsed(), 0);
        }

        // 0. Opening book
        if self.config.use_opening_book {
            if let Some(reply) = opening_reply(board, attacker) {
                debug!("opening book reply {}", reply);
                return MoveResult::opening(reply, elapsed());
            }
        }

        let mut work = board.clone();

        // 1. Our own five
        if let Some(win) = find_immediate_win(&mut work, attacker) {
            debug!("immediate win at {}", win);
            return MoveResult::immediate_win(win, elapsed());
        }

        // 2. Opponent's five must be blocked before anything slower
        if let Some(block) = find_forced_block(&mut work, attacker) {
            debug!("blocking opponent five at {}", block);
            return MoveResult::defense(block, elapsed());
        }

        // 3. Threat-space search under the time budget
        let deadline = Deadline::after_millis(self.config.time_limit_ms);
        let tss = self.threat_searcher.search_with_stats(
            &mut work,
            attacker,
            self.config.max_ply,
            deadline,
        );
        if let Some(pos) = tss.best_move {
            debug!(
                "threat space win at {} ({} nodes, {} root threats, {}ms)",
                pos,
                tss.nodes,
                tss.threats.len(),
                elapsed()
            );
            return MoveResult::threat_space(pos, elapsed(), tss.nodes);
        }

        // 4. Fixed-depth fallback
        let fallback = self.searcher.best_move(&mut work, attacker);
        if fallback.best_move.is_some() {
            debug!(
                "alpha-beta move {:?} score {} depth {} ({} nodes, {}ms)",
                fallback.best_move,
                fallback.score,
                fallback.depth,
                fallback.nodes,
                elapsed()
            );
            return MoveResult::from_alphabeta(fallback, elapsed(), tss.nodes);
        }

        // 5. Anything legal
        let pos = last_resort(board);
        debug!("last resort move {:?}", pos);
        MoveResult::last_resort(pos, elapsed(), tss.nodes + fallback.nodes)
    }

    /// Node count of the last threat-space search
    #[must_use]
    pub fn threat_nodes(&self) -> u64 {
        self.threat_searcher.nodes()
    }
}

/// One-shot move request: pick a move for `attacker` on `board`.
///
/// Fails fast on an empty side or an out-of-range configuration. `Ok(None)`
/// means the board has no empty cell left.
pub fn select_move(
    board: &Board,
    attacker: Stone,
    max_ply: u8,
    time_limit_ms: u64,
) -> Result<Option<Move>, EngineError> {
    if attacker == Stone::Empty {
        return Err(EngineError::InvalidSide);
    }
    let mut engine = Engine::with_config(EngineConfig {
        max_ply,
        time_limit_ms,
        ..EngineConfig::default()
    })?;
    Ok(engine
        .get_move(board, attacker)
        .map(|pos| Move::new(pos, attacker)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in setup {
            board.place_stone(Pos::new(row, col), stone);
        }
        board
    }

    #[test]
    fn test_engine_default() {
        let engine = Engine::default();
        assert_eq!(*engine.config(), EngineConfig::default());
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        let config = EngineConfig {
            max_ply: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::with_config(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_engine_opening_book() {
        let board = setup_board(&[(5, 4, Stone::Defender)]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);
        assert_eq!(result.best_move, Some(Pos::new(4, 5)));
        assert_eq!(result.search_type, SearchType::OpeningBook);
    }

    #[test]
    fn test_engine_book_disabled() {
        let board = setup_board(&[(5, 4, Stone::Defender)]);
        let mut engine = Engine::with_config(EngineConfig {
            use_opening_book: false,
            ..EngineConfig::default()
        })
        .unwrap();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(board.has_neighbor(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let board = setup_board(&[
            (9, 0, Stone::Attacker),
            (9, 1, Stone::Attacker),
            (9, 2, Stone::Attacker),
            (9, 3, Stone::Attacker),
            (8, 0, Stone::Defender),
            (8, 1, Stone::Defender),
            (8, 2, Stone::Defender),
            (8, 3, Stone::Defender),
        ]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let board = setup_board(&[
            (2, 6, Stone::Defender),
            (3, 6, Stone::Defender),
            (4, 6, Stone::Defender),
            (5, 6, Stone::Defender),
            (1, 6, Stone::Attacker),
            (9, 9, Stone::Attacker),
        ]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.best_move, Some(Pos::new(6, 6)));
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_engine_blocks_before_threat_space() {
        // Attacker has an open three, defender an open four on column 8
        let board = setup_board(&[
            (4, 3, Stone::Attacker),
            (4, 4, Stone::Attacker),
            (4, 5, Stone::Attacker),
            (2, 8, Stone::Defender),
            (3, 8, Stone::Defender),
            (4, 8, Stone::Defender),
            (5, 8, Stone::Defender),
        ]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.best_move, Some(Pos::new(1, 8)));
        assert_eq!(result.search_type, SearchType::Defense);
        assert_eq!(engine.threat_nodes(), 0);
    }

    #[test]
    fn test_engine_threat_space_win() {
        let board = setup_board(&[
            (4, 3, Stone::Attacker),
            (4, 4, Stone::Attacker),
            (4, 5, Stone::Attacker),
            (0, 9, Stone::Defender),
        ]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.best_move, Some(Pos::new(4, 6)));
        assert_eq!(result.search_type, SearchType::ThreatSpace);
        assert!(result.nodes > 0);
        assert!(engine.threat_nodes() > 0);
    }

    #[test]
    fn test_engine_falls_back_to_alphabeta() {
        let board = setup_board(&[
            (4, 4, Stone::Defender),
            (5, 5, Stone::Attacker),
            (3, 6, Stone::Defender),
        ]);
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.search_type, SearchType::AlphaBeta);
        let mv = result.best_move.unwrap();
        assert!(board.is_empty(mv));
        assert!(board.has_neighbor(mv));
    }

    #[test]
    fn test_engine_empty_board_uses_last_resort() {
        let board = Board::new();
        let mut engine = Engine::new();
        let result = engine.get_move_with_stats(&board, Stone::Attacker);

        assert_eq!(result.best_move, Some(Pos::new(5, 5)));
        assert_eq!(result.search_type, SearchType::LastResort);
    }

    #[test]
    fn test_engine_does_not_touch_board() {
        let board = setup_board(&[
            (4, 3, Stone::Attacker),
            (4, 4, Stone::Attacker),
            (3, 3, Stone::Defender),
            (5, 5, Stone::Defender),
        ]);
        let before = board.clone();
        let mut engine = Engine::new();
        let _ = engine.get_move(&board, Stone::Attacker);
        assert_eq!(board, before);
    }

    #[test]
    fn test_last_resort() {
        assert_eq!(last_resort(&Board::new()), Some(Pos::new(5, 5)));

        let board = setup_board(&[(0, 5, Stone::Defender)]);
        assert_eq!(last_resort(&board), Some(Pos::new(0, 4)));

        let mut full = Board::new();
        for (i, pos) in Pos::all().enumerate() {
            let stone = if (i / 2 + pos.row as usize) % 2 == 0 {
                Stone::Attacker
            } else {
                Stone::Defender
            };
            full.place_stone(pos, stone);
        }
        assert_eq!(last_resort(&full), None);
    }

    #[test]
    fn test_select_move() {
        let board = setup_board(&[
            (1, 1, Stone::Defender),
            (2, 2, Stone::Defender),
            (3, 3, Stone::Defender),
            (4, 4, Stone::Defender),
            (9, 0, Stone::Attacker),
        ]);
        let mv = select_move(&board, Stone::Attacker, 6, 500).unwrap();
        assert_eq!(mv, Some(Move::new(Pos::new(0, 0), Stone::Attacker)));

        assert!(matches!(
            select_move(&board, Stone::Empty, 6, 500),
            Err(EngineError::InvalidSide)
        ));
        assert!(select_move(&board, Stone::Attacker, 6, 0).is_err());
    }

    #[test]
    fn test_engine_multiple_searches() {
        let board = setup_board(&[(2, 2, Stone::Defender), (3, 3, Stone::Attacker)]);
        let mut engine = Engine::new();
        let first = engine.get_move(&board, Stone::Attacker);
        let second = engine.get_move(&board, Stone::Attacker);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_type_serializes_snake_case() {
        let json = serde_json::to_string(&SearchType::ThreatSpace).unwrap();
        assert_eq!(json, "\"threat_space\"");
    }
}

//! Move engine for 10x10 five-in-a-row
//!
//! Picks a move for one side (the attacker) against the other (the
//! defender). Five or more in a row along any axis wins; there are no
//! captures or forbidden moves.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Five-in-a-row detection and the win query
//! - [`search`]: Threat generation, threat-space search, alpha-beta fallback
//! - [`eval`]: Line-pattern evaluation for the fallback
//! - [`opening`]: Fixed replies to the defender's first central move
//! - [`engine`]: Move orchestrator tying the stages together
//! - [`worker`]: One-shot search on a separate thread
//! - [`session`]: Game state for a game loop
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{select_move, Board, Pos, Stone};
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(4, 3), Stone::Attacker);
//! board.place_stone(Pos::new(4, 4), Stone::Attacker);
//! board.place_stone(Pos::new(4, 5), Stone::Attacker);
//! board.place_stone(Pos::new(0, 9), Stone::Defender);
//!
//! // An open three is a forced win through open fours
//! let mv = select_move(&board, Stone::Attacker, 6, 500).unwrap();
//! assert_eq!(mv.map(|m| m.pos), Some(Pos::new(4, 6)));
//! ```
//!
//! # Search Priority
//!
//! 1. Opening book
//! 2. Immediate winning move
//! 3. Block of the opponent's immediate win
//! 4. Threat-space search under a time budget
//! 5. Fixed-depth alpha-beta
//! 6. Any empty cell next to a stone

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod opening;
pub mod rules;
pub mod search;
pub mod session;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Move, Pos, Stone, BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{select_move, Engine, MoveResult, SearchType};
pub use error::EngineError;
pub use rules::is_winning_move;
pub use session::{GameResult, GameSession};
pub use worker::{MoveRequest, MoveResponse, SearchWorker};

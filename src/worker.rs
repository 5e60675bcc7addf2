//! Isolated one-shot search worker
//!
//! A request carries a full board snapshot and the search limits. The worker
//! thread owns that copy, runs the engine once and sends back exactly one
//! response. The caller polls with [`PendingMove::try_recv`] or blocks with
//! [`PendingMove::wait`]; dropping the handle abandons the request and the
//! worker's late answer is discarded.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::{Engine, MoveResult, SearchType};
use crate::error::EngineError;

fn default_opening_book() -> bool {
    true
}

/// Search request sent to a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// 10x10 grid of cell codes (0 empty, 1 attacker, 2 defender)
    pub board: Board,
    /// Side to find a move for
    pub attacker: Stone,
    pub max_ply: u8,
    pub time_limit_ms: u64,
    #[serde(default = "default_opening_book")]
    pub use_opening_book: bool,
}

impl MoveRequest {
    pub fn new(board: Board, attacker: Stone, config: &EngineConfig) -> Self {
        Self {
            board,
            attacker,
            max_ply: config.max_ply,
            time_limit_ms: config.time_limit_ms,
            use_opening_book: config.use_opening_book,
        }
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            max_ply: self.max_ply,
            time_limit_ms: self.time_limit_ms,
            use_opening_book: self.use_opening_book,
        }
    }
}

/// The worker's single answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// `None` when the board had no legal cell left
    pub best_move: Option<Pos>,
    pub search_type: Option<SearchType>,
    pub time_ms: u64,
    pub nodes: u64,
}

impl From<&MoveResult> for MoveResponse {
    fn from(result: &MoveResult) -> Self {
        Self {
            best_move: result.best_move,
            search_type: result.best_move.map(|_| result.search_type),
            time_ms: result.time_ms,
            nodes: result.nodes,
        }
    }
}

/// Handle to an outstanding request
#[derive(Debug)]
pub struct PendingMove {
    receiver: Receiver<MoveResponse>,
    started: Instant,
}

impl PendingMove {
    /// Non-blocking poll. `Ok(None)` while the worker is still searching.
    pub fn try_recv(&self) -> Result<Option<MoveResponse>, EngineError> {
        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::WorkerDisconnected),
        }
    }

    /// Block up to `timeout` for the answer.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Option<MoveResponse>, EngineError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::WorkerDisconnected),
        }
    }

    /// Block until the answer arrives.
    pub fn wait(self) -> Result<MoveResponse, EngineError> {
        self.receiver
            .recv()
            .map_err(|_| EngineError::WorkerDisconnected)
    }

    /// Time since the request was sent
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Spawns search threads
pub struct SearchWorker;

impl SearchWorker {
    /// Validate `request` and start searching on a dedicated thread.
    ///
    /// The request is checked before the thread starts, so a bad side or
    /// out-of-range limits fail here rather than inside the worker.
    pub fn spawn(request: MoveRequest) -> Result<PendingMove, EngineError> {
        if request.attacker == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        let mut engine = Engine::with_config(request.config())?;

        let (tx, rx) = channel();
        let MoveRequest {
            board, attacker, ..
        } = request;

        info!(
            "search worker started: {} stones on board, {:?} to move",
            board.stone_count(),
            attacker
        );

        thread::Builder::new()
            .name("search-worker".to_string())
            .spawn(move || {
                let result = engine.get_move_with_stats(&board, attacker);
                let response = MoveResponse::from(&result);
                info!(
                    "search worker finished: {:?} via {:?} in {}ms ({} nodes)",
                    response.best_move, response.search_type, response.time_ms, response.nodes
                );
                if tx.send(response).is_err() {
                    warn!("search request was abandoned, discarding its response");
                }
            })?;

        Ok(PendingMove {
            receiver: rx,
            started: Instant::now(),
        })
    }
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

    fn request(board: Board) -> MoveRequest {
        MoveRequest::new(board, Stone::Attacker, &EngineConfig::default())
    }

    #[test]
    fn test_worker_answers_once() {
        let board = setup_board(&[(4, 4, Stone::Defender)]);
        let pending = SearchWorker::spawn(request(board)).unwrap();
        let response = pending.wait().unwrap();
        assert_eq!(response.best_move, Some(Pos::new(5, 5)));
        assert_eq!(response.search_type, Some(SearchType::OpeningBook));
    }

    #[test]
    fn test_worker_polling() {
        let board = setup_board(&[
            (3, 0, Stone::Attacker),
            (3, 1, Stone::Attacker),
            (3, 2, Stone::Attacker),
            (3, 3, Stone::Attacker),
        ]);
        let pending = SearchWorker::spawn(request(board)).unwrap();

        let mut response = None;
        while response.is_none() {
            response = pending.wait_timeout(Duration::from_millis(50)).unwrap();
        }
        let response = response.unwrap();
        assert_eq!(response.best_move, Some(Pos::new(3, 4)));
        assert_eq!(response.search_type, Some(SearchType::ImmediateWin));

        // Exactly one response: the channel is now closed
        assert!(matches!(
            pending.try_recv(),
            Err(EngineError::WorkerDisconnected)
        ));
    }

    #[test]
    fn test_worker_rejects_bad_requests() {
        let mut req = request(Board::new());
        req.attacker = Stone::Empty;
        assert!(matches!(
            SearchWorker::spawn(req),
            Err(EngineError::InvalidSide)
        ));

        let mut req = request(Board::new());
        req.time_limit_ms = 0;
        assert!(matches!(
            SearchWorker::spawn(req),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_abandoned_request_is_harmless() {
        let board = setup_board(&[(2, 2, Stone::Defender), (3, 3, Stone::Attacker)]);
        let pending = SearchWorker::spawn(request(board.clone())).unwrap();
        drop(pending);

        // A fresh request on the same snapshot still works
        let response = SearchWorker::spawn(request(board)).unwrap().wait().unwrap();
        assert!(response.best_move.is_some());
    }

    #[test]
    fn test_full_board_gives_no_move() {
        let mut board = Board::new();
        for (i, pos) in Pos::all().enumerate() {
            let stone = if (i / 2 + pos.row as usize) % 2 == 0 {
                Stone::Attacker
            } else {
                Stone::Defender
            };
            board.place_stone(pos, stone);
        }
        // Fullness matters here, not who would have won
        let response = SearchWorker::spawn(request(board)).unwrap().wait().unwrap();
        assert_eq!(response.best_move, None);
        assert_eq!(response.search_type, None);
    }

    #[test]
    fn test_request_json() {
        let mut cells = vec![vec![0u8; 10]; 10];
        cells[4][4] = 2;
        let json = serde_json::json!({
            "board": cells,
            "attacker": "attacker",
            "max_ply": 4,
            "time_limit_ms": 250
        });
        let req: MoveRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.board.get(Pos::new(4, 4)), Stone::Defender);
        assert_eq!(req.max_ply, 4);
        assert!(req.use_opening_book);

        let back = serde_json::to_value(&req).unwrap();
        assert_eq!(back["board"][4][4], 2);
    }

    #[test]
    fn test_request_json_rejects_bad_board() {
        let json = serde_json::json!({
            "board": vec![vec![0u8; 10]; 9],
            "attacker": "attacker",
            "max_ply": 4,
            "time_limit_ms": 250
        });
        assert!(serde_json::from_value::<MoveRequest>(json).is_err());

        let mut cells = vec![vec![0u8; 10]; 10];
        cells[0][0] = 3;
        let json = serde_json::json!({
            "board": cells,
            "attacker": "defender",
            "max_ply": 4,
            "time_limit_ms": 250
        });
        assert!(serde_json::from_value::<MoveRequest>(json).is_err());
    }
}

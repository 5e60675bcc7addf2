//! Error type shared by the engine, worker and session

use thiserror::Error;

/// Contract violations and session misuse.
///
/// Not finding a move is never an error; searches return `Option<Pos>`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is outside the 10x10 board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: i32, col: i32 },
    #[error("board must be 10x10, got {rows} rows (offending row length {cols})")]
    BoardShape { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) has unknown code {value}")]
    InvalidCell { row: usize, col: usize, value: u8 },
    #[error("a move needs a side, not an empty stone")]
    InvalidSide,
    #[error("game is over")]
    GameOver,
    #[error("not this side's turn")]
    NotYourTurn,
    #[error("a search is already in flight for this board")]
    SearchInFlight,
    #[error("search worker disconnected without answering")]
    WorkerDisconnected,
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

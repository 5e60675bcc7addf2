//! Open-four threat generation and forced-block calculation
//!
//! Both work on a 9-cell window centred on a candidate cell (offsets -4..=4
//! along one direction) and look for the exact pattern
//! `empty, four own stones, empty`. Cells past the board edge read as empty
//! inside the window but can never be returned as a block.

use crate::board::{Board, Direction, Pos, Stone, DIRECTIONS};
use crate::rules::is_win;

/// Half-width of the scan window
const REACH: i32 = 4;
const WINDOW_LEN: usize = 2 * REACH as usize + 1;
/// `_XXXX_`
const OPEN_FOUR_LEN: usize = 6;

/// Window cell, relative to the side being examined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Own,
    Other,
    Empty,
}

/// Nine cells along one direction around a centre cell.
#[derive(Debug, Clone)]
struct LineWindow {
    marks: [Mark; WINDOW_LEN],
    cells: [Option<Pos>; WINDOW_LEN],
}

impl LineWindow {
    fn build(board: &Board, center: Pos, dir: Direction, side: Stone) -> Self {
        let mut marks = [Mark::Empty; WINDOW_LEN];
        let mut cells = [None; WINDOW_LEN];

        for (i, k) in (-REACH..=REACH).enumerate() {
            let Some(p) = center.offset(dir, k) else {
                continue;
            };
            cells[i] = Some(p);
            marks[i] = match board.get(p) {
                Stone::Empty => Mark::Empty,
                s if s == side => Mark::Own,
                _ => Mark::Other,
            };
        }

        Self { marks, cells }
    }

    /// Index of the leading empty cell of the first `_XXXX_` match.
    fn open_four_start(&self) -> Option<usize> {
        (0..=WINDOW_LEN - OPEN_FOUR_LEN).find(|&s| {
            let w = &self.marks[s..s + OPEN_FOUR_LEN];
            w[0] == Mark::Empty
                && w[1..5].iter().all(|&m| m == Mark::Own)
                && w[5] == Mark::Empty
        })
    }

    /// The cell that blocks the matched open four: the leading boundary if it
    /// is on the board, otherwise the trailing one.
    fn block_cell(&self, start: usize, board: &Board) -> Option<Pos> {
        [self.cells[start], self.cells[start + OPEN_FOUR_LEN - 1]]
            .into_iter()
            .flatten()
            .find(|&p| board.is_empty(p))
    }
}

/// Does `side` (already standing on `pos`) have an open four through it
/// along `dir`?
fn has_open_four(board: &Board, pos: Pos, dir: Direction, side: Stone) -> bool {
    LineWindow::build(board, pos, dir, side)
        .open_four_start()
        .is_some()
}

/// Is `pos` a threat cell for `side`: playing there makes an open four in
/// some direction, or completes five outright.
///
/// `pos` must be empty. The board is restored before returning.
pub fn is_threat(board: &mut Board, pos: Pos, side: Stone) -> bool {
    debug_assert!(board.is_empty(pos));

    board.place_stone(pos, side);
    let found = is_win(board, pos)
        || DIRECTIONS
            .iter()
            .any(|&dir| has_open_four(board, pos, dir, side));
    board.remove_stone(pos);
    found
}

/// All threat cells for `side`, in row-major scan order.
///
/// Each cell appears at most once regardless of how many directions it
/// threatens in. The board is left exactly as it was.
pub fn find_threats(board: &mut Board, side: Stone) -> Vec<Pos> {
    let mut threats = Vec::new();
    for pos in Pos::all() {
        if board.is_empty(pos) && is_threat(board, pos, side) {
            threats.push(pos);
        }
    }
    threats
}

/// Cells the opponent must occupy to break every open four that `side`
/// gets by playing `threat`.
///
/// One candidate per direction with an open four, duplicates removed, in
/// direction order. When no open four is found the threat cell itself is
/// returned. `threat` may be empty or already hold `side`'s stone; its
/// previous state is restored before returning.
pub fn critical_blocks(board: &mut Board, threat: Pos, side: Stone) -> Vec<Pos> {
    let previous = board.get(threat);
    debug_assert!(previous == Stone::Empty || previous == side);
    board.set(threat, side);

    let mut blocks: Vec<Pos> = Vec::with_capacity(2);
    for dir in DIRECTIONS {
        let window = LineWindow::build(board, threat, dir, side);
        if let Some(start) = window.open_four_start() {
            if let Some(cell) = window.block_cell(start, board) {
                if !blocks.contains(&cell) {
                    blocks.push(cell);
                }
            }
        }
    }

    board.set(threat, previous);

    if blocks.is_empty() {
        blocks.push(threat);
    }
    blocks
}

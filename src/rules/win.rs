//! Five-in-a-row detection
//!
//! The stone at the queried position is treated as the last one played.
//! For each axis, same-side stones are counted outward in both directions
//! until a different cell or the board edge.

use crate::board::{Board, Direction, Pos, Stone, DIRECTIONS};
use crate::error::EngineError;

/// Number of contiguous stones of the side at `pos` along one axis,
/// counting `pos` itself. Zero when `pos` is empty.
pub fn run_length(board: &Board, pos: Pos, dir: Direction) -> usize {
    let color = board.get(pos);
    if color == Stone::Empty {
        return 0;
    }

    let mut count = 1;
    for sign in [1i32, -1] {
        let mut k = 1;
        while let Some(p) = pos.offset(dir, sign * k) {
            if board.get(p) != color {
                break;
            }
            count += 1;
            k += 1;
        }
    }
    count
}

/// Five or more along one specific axis through `pos`.
#[inline]
pub fn has_five_along(board: &Board, pos: Pos, dir: Direction) -> bool {
    run_length(board, pos, dir) >= 5
}

/// Axes through `pos` that hold five or more in a row.
pub fn winning_axes(board: &Board, pos: Pos) -> Vec<Direction> {
    DIRECTIONS
        .into_iter()
        .filter(|&dir| has_five_along(board, pos, dir))
        .collect()
}

/// Does the stone at `pos` complete five (or more) in any axis?
#[inline]
pub fn is_win(board: &Board, pos: Pos) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| has_five_along(board, pos, dir))
}

/// The cells of the first winning run through `pos`, ordered along the axis.
/// For display only.
pub fn find_winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }

    for dir in DIRECTIONS {
        let mut line = vec![pos];

        let mut k = 1;
        while let Some(p) = pos.offset(dir, -k) {
            if board.get(p) != color {
                break;
            }
            line.insert(0, p);
            k += 1;
        }

        k = 1;
        while let Some(p) = pos.offset(dir, k) {
            if board.get(p) != color {
                break;
            }
            line.push(p);
            k += 1;
        }

        if line.len() >= 5 {
            return Some(line);
        }
    }
    None
}

/// Would placing `color` at the empty cell `pos` complete five?
/// The board is left untouched.
pub fn creates_five(board: &mut Board, pos: Pos, color: Stone) -> bool {
    if !board.is_empty(pos) {
        return false;
    }
    board.place_stone(pos, color);
    let win = is_win(board, pos);
    board.remove_stone(pos);
    win
}

/// Win query for the game loop: is the stone at `(row, col)` part of a
/// completed five? Returns the run for highlighting when it is.
///
/// Coordinates off the board are rejected with [`EngineError::OutOfBounds`].
pub fn is_winning_move(
    board: &Board,
    row: u8,
    col: u8,
) -> Result<(bool, Option<Vec<Pos>>), EngineError> {
    let pos = Pos::try_new(row as i32, col as i32)?;
    let line = find_winning_line(board, pos);
    Ok((line.is_some(), line))
}

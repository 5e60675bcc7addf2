//! Static evaluation by line scanning
//!
//! Every row, column and diagonal of length 5 or more is read as a string
//! over {own, opponent, empty}. Each pattern counts at most once per line
//! and per side; the line scores add up over the whole board.

use std::sync::OnceLock;

use crate::board::{Board, Direction, Pos, Stone, BOARD_SIZE};

use super::patterns::{EMPTY, OPP, OWN, PATTERNS};

/// Shortest line that can hold five in a row
const MIN_LINE: usize = 5;

/// All scan lines, computed once
fn lines() -> &'static [Vec<Pos>] {
    static LINES: OnceLock<Vec<Vec<Pos>>> = OnceLock::new();
    LINES.get_or_init(build_lines)
}

fn build_lines() -> Vec<Vec<Pos>> {
    let n = BOARD_SIZE as u8;
    let mut starts: Vec<(Pos, Direction)> = Vec::new();

    for i in 0..n {
        starts.push((Pos::new(i, 0), Direction::Horizontal));
        starts.push((Pos::new(0, i), Direction::Vertical));
    }
    // Diagonals start on the top row or the first column
    for c in 0..n {
        starts.push((Pos::new(0, c), Direction::Diagonal));
    }
    for r in 1..n {
        starts.push((Pos::new(r, 0), Direction::Diagonal));
    }
    // Anti-diagonals start on the top row or the last column
    for c in 0..n {
        starts.push((Pos::new(0, c), Direction::AntiDiagonal));
    }
    for r in 1..n {
        starts.push((Pos::new(r, n - 1), Direction::AntiDiagonal));
    }

    starts
        .into_iter()
        .map(|(start, dir)| {
            (0..BOARD_SIZE as i32)
                .map_while(|k| start.offset(dir, k))
                .collect::<Vec<Pos>>()
        })
        .filter(|line| line.len() >= MIN_LINE)
        .collect()
}

/// Number of lines the evaluator scans
pub fn line_count() -> usize {
    lines().len()
}

/// Read a line as bytes from `side`'s point of view
fn encode<'a>(
    board: &Board,
    line: &[Pos],
    side: Stone,
    buf: &'a mut [u8; BOARD_SIZE],
) -> &'a [u8] {
    for (slot, &p) in buf.iter_mut().zip(line) {
        *slot = match board.get(p) {
            Stone::Empty => EMPTY,
            s if s == side => OWN,
            _ => OPP,
        };
    }
    &buf[..line.len()]
}

/// Sum of own pattern scores in an encoded line
pub fn score_own(line: &[u8]) -> i32 {
    PATTERNS
        .iter()
        .filter(|p| p.matches(line))
        .map(|p| p.own_score())
        .sum()
}

/// Sum of opponent penalties in a line encoded from the opponent's view
pub fn score_opponent(line: &[u8]) -> i32 {
    PATTERNS
        .iter()
        .filter(|p| p.matches(line))
        .map(|p| p.opponent_score())
        .sum()
}

/// Evaluate the board from the perspective of `side`.
///
/// Positive values favour `side`. Not antisymmetric:
/// `evaluate(b, A) != -evaluate(b, B)` in general, because opponent shapes
/// weigh more than own shapes.
#[must_use]
pub fn evaluate(board: &Board, side: Stone) -> i32 {
    if side == Stone::Empty {
        return 0;
    }
    let opponent = side.opponent();

    let mut buf = [EMPTY; BOARD_SIZE];

    lines()
        .iter()
        .map(|line| {
            let own = score_own(encode(board, line, side, &mut buf));
            own - score_opponent(encode(board, line, opponent, &mut buf))
        })
        .sum()
}

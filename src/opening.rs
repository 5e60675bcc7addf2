//! Opening book
//!
//! A fixed reply to the defender's first stone when it lands in the central
//! 4x4 block. The reply sits diagonally next to it, one step toward the
//! middle of the board. Anything else falls through to search.

use crate::board::{Board, Pos, Stone};

/// `(defender's first move, reply)` pairs, row-major by key
pub const OPENING_BOOK: [((u8, u8), (u8, u8)); 16] = [
    ((3, 3), (4, 4)),
    ((3, 4), (4, 5)),
    ((3, 5), (4, 4)),
    ((3, 6), (4, 5)),
    ((4, 3), (5, 4)),
    ((4, 4), (5, 5)),
    ((4, 5), (5, 4)),
    ((4, 6), (5, 5)),
    ((5, 3), (4, 4)),
    ((5, 4), (4, 5)),
    ((5, 5), (4, 4)),
    ((5, 6), (4, 5)),
    ((6, 3), (5, 4)),
    ((6, 4), (5, 5)),
    ((6, 5), (5, 4)),
    ((6, 6), (5, 5)),
];

/// Book reply for a first move at `key`, if there is one.
pub fn lookup(key: Pos) -> Option<Pos> {
    OPENING_BOOK
        .iter()
        .find(|&&((r, c), _)| Pos::new(r, c) == key)
        .map(|&(_, (r, c))| Pos::new(r, c))
}

/// Book move for `attacker`, only while the board holds exactly one stone
/// and that stone is the opponent's.
pub fn opening_reply(board: &Board, attacker: Stone) -> Option<Pos> {
    if attacker == Stone::Empty || board.stone_count() != 1 {
        return None;
    }
    let first = board.stones(attacker.opponent())?.iter_ones().next()?;
    lookup(first).filter(|&reply| board.is_empty(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_covers_central_block() {
        for r in 3..=6u8 {
            for c in 3..=6u8 {
                let reply = lookup(Pos::new(r, c));
                assert!(reply.is_some(), "no book entry for ({}, {})", r, c);
            }
        }
        assert_eq!(lookup(Pos::new(0, 0)), None);
        assert_eq!(lookup(Pos::new(2, 5)), None);
    }

    #[test]
    fn test_replies_are_diagonal_neighbours() {
        for &((r, c), (rr, rc)) in OPENING_BOOK.iter() {
            assert_eq!((r as i32 - rr as i32).abs(), 1, "({}, {})", r, c);
            assert_eq!((c as i32 - rc as i32).abs(), 1, "({}, {})", r, c);
            assert!((4..=5).contains(&rr) && (4..=5).contains(&rc));
        }
    }

    #[test]
    fn test_reply_to_single_defender_stone() {
        let mut board = Board::new();
        board.place_stone(Pos::new(4, 4), Stone::Defender);
        assert_eq!(opening_reply(&board, Stone::Attacker), Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_no_reply_outside_book_or_later() {
        let mut board = Board::new();
        assert_eq!(opening_reply(&board, Stone::Attacker), None);

        board.place_stone(Pos::new(0, 9), Stone::Defender);
        assert_eq!(opening_reply(&board, Stone::Attacker), None);

        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Attacker);
        assert_eq!(opening_reply(&board, Stone::Attacker), None);

        board.place_stone(Pos::new(4, 4), Stone::Defender);
        assert_eq!(opening_reply(&board, Stone::Attacker), None);
    }
}

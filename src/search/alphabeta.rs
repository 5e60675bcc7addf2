//! Fixed-depth alpha-beta fallback
//!
//! Used when threat-space search finds nothing. Before any scoring it takes
//! an immediate win for the attacker, then a block of the defender's
//! immediate win. Otherwise a plain minimax with alpha-beta pruning runs to
//! a fixed depth: the attacker maximizes, the defender minimizes, and leaves
//! are scored by [`evaluate`] from the attacker's side.
//!
//! Moves are limited to empty cells touching an existing stone. The board is
//! mutated in place and restored on every path.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(4, 4), Stone::Defender);
//! board.place_stone(Pos::new(5, 5), Stone::Attacker);
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&mut board, Stone::Attacker, 2);
//! assert!(result.best_move.is_some());
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, PatternScore};
use crate::rules::{creates_five, is_win};

/// Search depth once the attacker has stones on the board
pub const FALLBACK_DEPTH: u8 = 3;

/// Search depth for the attacker's very first move
pub const OPENING_FALLBACK_DEPTH: u8 = 4;

/// Infinity score for alpha-beta bounds
const INF: i32 = 64 * PatternScore::FIVE;

/// How the fallback picked its move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Completes five for the attacker
    ImmediateWin,
    /// Takes the cell where the defender would complete five
    ForcedBlock,
    /// Best evaluated candidate
    Evaluated,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation of the best move from the attacker's side
    pub score: i32,
    /// Depth searched, 0 when no tree search ran
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    pub decision: Decision,
}

impl SearchResult {
    fn direct(pos: Option<Pos>, decision: Decision) -> Self {
        Self {
            best_move: pos,
            score: 0,
            depth: 0,
            nodes: 0,
            decision,
        }
    }
}

/// First empty cell (row-major) where `side` completes five.
///
/// The board is restored before returning.
pub fn find_immediate_win(board: &mut Board, side: Stone) -> Option<Pos> {
    if side == Stone::Empty {
        return None;
    }
    let cells: Vec<Pos> = board.empty_cells().collect();
    cells
        .into_iter()
        .find(|&pos| creates_five(board, pos, side))
}

/// Cell the attacker must take so the defender cannot win next move.
pub fn find_forced_block(board: &mut Board, attacker: Stone) -> Option<Pos> {
    if attacker == Stone::Empty {
        return None;
    }
    find_immediate_win(board, attacker.opponent())
}

/// Fallback depth for `attacker` on this board.
pub fn fallback_depth(board: &Board, attacker: Stone) -> u8 {
    if board.count(attacker) == 0 {
        OPENING_FALLBACK_DEPTH
    } else {
        FALLBACK_DEPTH
    }
}

/// Fixed-depth minimax searcher
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Full fallback: immediate win, forced block, then the tree search at
    /// [`fallback_depth`].
    pub fn best_move(&mut self, board: &mut Board, attacker: Stone) -> SearchResult {
        self.nodes = 0;

        if let Some(pos) = find_immediate_win(board, attacker) {
            return SearchResult::direct(Some(pos), Decision::ImmediateWin);
        }
        if let Some(pos) = find_forced_block(board, attacker) {
            return SearchResult::direct(Some(pos), Decision::ForcedBlock);
        }

        let depth = fallback_depth(board, attacker);
        self.search(board, attacker, depth)
    }

    /// Tree search only, without the win and block shortcuts.
    ///
    /// Root candidates are visited in row-major order and only a strictly
    /// better score replaces the current best, so ties go to the first cell.
    pub fn search(&mut self, board: &mut Board, attacker: Stone, depth: u8) -> SearchResult {
        self.nodes = 0;
        let depth = depth.max(1);

        let mut result = SearchResult {
            best_move: None,
            score: -INF,
            depth,
            nodes: 0,
            decision: Decision::Evaluated,
        };
        if attacker == Stone::Empty {
            result.score = 0;
            return result;
        }

        let mut alpha = -INF;
        for pos in board.neighbor_moves() {
            board.place_stone(pos, attacker);
            let score = if is_win(board, pos) {
                self.nodes += 1;
                evaluate(board, attacker)
            } else {
                self.alpha_beta(board, attacker, depth - 1, alpha, INF, false)
            };
            board.remove_stone(pos);

            if score > result.score {
                result.score = score;
                result.best_move = Some(pos);
            }
            alpha = alpha.max(score);
        }

        if result.best_move.is_none() {
            result.score = 0;
        }
        result.nodes = self.nodes;
        result
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board, attacker);
        }

        let moves = board.neighbor_moves();
        if moves.is_empty() {
            return evaluate(board, attacker);
        }

        let mover = if maximizing {
            attacker
        } else {
            attacker.opponent()
        };
        let mut value = if maximizing { -INF } else { INF };

        for pos in moves {
            board.place_stone(pos, mover);
            let score = if is_win(board, pos) {
                evaluate(board, attacker)
            } else {
                self.alpha_beta(board, attacker, depth - 1, alpha, beta, !maximizing)
            };
            board.remove_stone(pos);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        value
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in setup {
            board.place_stone(Pos::new(row, col), stone);
        }
        board
    }

    #[test]
    fn test_search_empty_board() {
        let mut searcher = Searcher::new();
        let mut board = Board::new();

        let result = searcher.search(&mut board, Stone::Attacker, 3);
        assert!(result.best_move.is_none());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_immediate_win_first() {
        let mut board = setup_board(&[
            (2, 1, Stone::Attacker),
            (2, 2, Stone::Attacker),
            (2, 3, Stone::Attacker),
            (2, 4, Stone::Attacker),
            // Defender also threatens five, but winning comes first
            (7, 1, Stone::Defender),
            (7, 2, Stone::Defender),
            (7, 3, Stone::Defender),
            (7, 4, Stone::Defender),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.best_move(&mut board, Stone::Attacker);
        assert_eq!(result.best_move, Some(Pos::new(2, 0)));
        assert_eq!(result.decision, Decision::ImmediateWin);
    }

    #[test]
    fn test_blocks_opponent_win() {
        let mut board = setup_board(&[
            (0, 5, Stone::Defender),
            (1, 5, Stone::Defender),
            (2, 5, Stone::Defender),
            (3, 5, Stone::Defender),
            (6, 0, Stone::Attacker),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.best_move(&mut board, Stone::Attacker);
        assert_eq!(result.best_move, Some(Pos::new(4, 5)));
        assert_eq!(result.decision, Decision::ForcedBlock);
    }

    #[test]
    fn test_find_immediate_win_with_gap() {
        let mut board = setup_board(&[
            (6, 2, Stone::Attacker),
            (6, 3, Stone::Attacker),
            (6, 5, Stone::Attacker),
            (6, 6, Stone::Attacker),
        ]);
        assert_eq!(
            find_immediate_win(&mut board, Stone::Attacker),
            Some(Pos::new(6, 4))
        );
        assert_eq!(
            find_forced_block(&mut board, Stone::Defender),
            Some(Pos::new(6, 4))
        );
        assert_eq!(find_forced_block(&mut board, Stone::Attacker), None);
    }

    #[test]
    fn test_fallback_depth() {
        let mut board = setup_board(&[(4, 4, Stone::Defender)]);
        assert_eq!(
            fallback_depth(&board, Stone::Attacker),
            OPENING_FALLBACK_DEPTH
        );
        board.place_stone(Pos::new(5, 5), Stone::Attacker);
        assert_eq!(fallback_depth(&board, Stone::Attacker), FALLBACK_DEPTH);
    }

    #[test]
    fn test_search_only_touches_neighbors() {
        let mut board = setup_board(&[(0, 0, Stone::Defender), (1, 1, Stone::Attacker)]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&mut board, Stone::Attacker, 2);
        let mv = result.best_move.unwrap();
        assert!(board.has_neighbor(mv), "{:?} is not next to a stone", mv);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_extends_own_line() {
        // Open three for the attacker, nothing dangerous for the defender
        let mut board = setup_board(&[
            (4, 3, Stone::Attacker),
            (4, 4, Stone::Attacker),
            (4, 5, Stone::Attacker),
            (8, 8, Stone::Defender),
        ]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&mut board, Stone::Attacker, 1);
        let mv = result.best_move.unwrap();
        assert!(
            mv == Pos::new(4, 2) || mv == Pos::new(4, 6),
            "expected an open four, got {:?}",
            mv
        );
    }

    #[test]
    fn test_depth_one_ties_go_to_first_cell() {
        // Symmetric position: every neighbour of a lone stone scores the same
        let mut board = setup_board(&[(5, 5, Stone::Defender)]);
        let mut searcher = Searcher::new();
        let result = searcher.search(&mut board, Stone::Attacker, 1);
        // All eight neighbours score 0 at depth 1, so the first one wins
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = setup_board(&[
            (3, 3, Stone::Attacker),
            (3, 4, Stone::Defender),
            (4, 4, Stone::Attacker),
            (5, 5, Stone::Defender),
        ]);
        let before = board.clone();
        let mut searcher = Searcher::new();
        let _ = searcher.best_move(&mut board, Stone::Attacker);
        assert_eq!(board, before);
    }

    fn arb_board() -> impl Strategy<Value = Board> {
        prop::collection::vec((0usize..100, 1u8..3), 1..16).prop_map(|stones| {
            let mut board = Board::new();
            for (idx, code) in stones {
                let pos = Pos::from_index(idx);
                if board.is_empty(pos) {
                    if let Some(stone) = Stone::from_code(code) {
                        board.place_stone(pos, stone);
                    }
                }
            }
            board
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_search_restores_board(mut board in arb_board(), depth in 1u8..3) {
            let before = board.clone();
            let mut searcher = Searcher::new();
            let result = searcher.search(&mut board, Stone::Attacker, depth);
            prop_assert_eq!(&board, &before);
            if let Some(mv) = result.best_move {
                prop_assert!(board.is_empty(mv));
            }
        }
    }
}

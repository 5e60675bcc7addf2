//! Threat-space search for forced wins
//!
//! Proves attacker-forcing lines using only the attacker's own open-four
//! threats. The model is one-sided on purpose: the defender never makes
//! threats of its own, it only answers with the forced blocks from
//! [`critical_blocks`].
//!
//! The threat list is generated once, from the root position. Every node
//! walks that fixed list in row-major order:
//!
//! 1. Play the threat. Five in a row wins on the spot (first found, not best).
//! 2. Otherwise try each empty block cell for the defender and recurse with
//!    one ply less. The attacker keeps the move across the recursion, which
//!    models a continuous forcing chain rather than strict turn order.
//! 3. A win found under any block is propagated upward at once.
//! 4. When every block was tried and none propagated a win, the threat is
//!    declared forced and returned.
//!
//! All placements are made in place and undone on every exit path, including
//! timeouts. A timeout aborts the whole search with no result.

use log::debug;

use crate::board::{Board, Pos, Stone};
use crate::rules::is_win;

use super::deadline::Deadline;
use super::threat::{critical_blocks, find_threats};

/// Outcome of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Proof {
    Win(Pos),
    NoWin,
    Timeout,
}

/// Result of a threat-space search
#[derive(Debug, Clone, Default)]
pub struct ThreatResult {
    /// Winning move, if a forced line was found
    pub best_move: Option<Pos>,
    /// Root threats the search worked from
    pub threats: Vec<Pos>,
    /// The deadline passed before the search finished
    pub timed_out: bool,
    /// Nodes visited
    pub nodes: u64,
}

/// Threat-space searcher
#[derive(Debug, Default)]
pub struct ThreatSpaceSearcher {
    nodes: u64,
}

impl ThreatSpaceSearcher {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Search for a forced win for `attacker` within `max_ply` threats.
    ///
    /// The board is mutated during the search and restored bit-for-bit
    /// before this returns, whatever the outcome.
    pub fn search(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        max_ply: u8,
        deadline: Deadline,
    ) -> Option<Pos> {
        self.search_with_stats(board, attacker, max_ply, deadline)
            .best_move
    }

    /// Same as [`search`](Self::search) with diagnostics.
    pub fn search_with_stats(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        max_ply: u8,
        deadline: Deadline,
    ) -> ThreatResult {
        self.nodes = 0;

        if attacker == Stone::Empty {
            return ThreatResult::default();
        }

        let threats = find_threats(board, attacker);
        let proof = self.prove(board, attacker, &threats, max_ply, deadline);

        let (best_move, timed_out) = match proof {
            Proof::Win(pos) => (Some(pos), false),
            Proof::NoWin => (None, false),
            Proof::Timeout => {
                debug!(
                    "threat search timed out after {} nodes ({} root threats)",
                    self.nodes,
                    threats.len()
                );
                (None, true)
            }
        };

        ThreatResult {
            best_move,
            threats,
            timed_out,
            nodes: self.nodes,
        }
    }

    fn prove(
        &mut self,
        board: &mut Board,
        attacker: Stone,
        threats: &[Pos],
        ply: u8,
        deadline: Deadline,
    ) -> Proof {
        self.nodes += 1;

        if deadline.is_expired() {
            return Proof::Timeout;
        }
        if ply == 0 {
            return Proof::NoWin;
        }

        let defender = attacker.opponent();

        for &threat in threats {
            if deadline.is_expired() {
                return Proof::Timeout;
            }
            if !board.is_empty(threat) {
                continue;
            }

            board.place_stone(threat, attacker);

            if is_win(board, threat) {
                board.remove_stone(threat);
                return Proof::Win(threat);
            }

            let blocks = critical_blocks(board, threat, attacker);
            let mut skipped = false;

            for block in blocks {
                if deadline.is_expired() {
                    board.remove_stone(threat);
                    return Proof::Timeout;
                }
                if !board.is_empty(block) {
                    skipped = true;
                    continue;
                }

                board.place_stone(block, defender);
                let proof = self.prove(board, attacker, threats, ply - 1, deadline);
                board.remove_stone(block);

                match proof {
                    Proof::NoWin => {}
                    found_or_timeout => {
                        board.remove_stone(threat);
                        return found_or_timeout;
                    }
                }
            }

            board.remove_stone(threat);

            if !skipped {
                return Proof::Win(threat);
            }
        }

        Proof::NoWin
    }

    /// Nodes visited by the last search
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

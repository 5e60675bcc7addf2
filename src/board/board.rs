//! Board structure

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::{Move, Pos, Stone, BOARD_SIZE};
use crate::error::EngineError;

/// Game board. Fixed 10x10; only ever changed one stone at a time.
///
/// Serializes as a 10x10 array of cell codes (0 empty, 1 attacker,
/// 2 defender). Deserializing a wrongly shaped grid or an unknown code fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    /// Attacker stones bitboard
    pub attacker: Bitboard,
    /// Defender stones bitboard
    pub defender: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            attacker: Bitboard::new(),
            defender: Bitboard::new(),
        }
    }

    /// Build a board from rows of cell codes, validating the shape.
    pub fn from_cells<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, EngineError> {
        let cols = rows.iter().map(|r| r.as_ref().len()).find(|&n| n != BOARD_SIZE);
        if rows.len() != BOARD_SIZE || cols.is_some() {
            return Err(EngineError::BoardShape {
                rows: rows.len(),
                cols: cols.unwrap_or(BOARD_SIZE),
            });
        }

        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &code) in row.as_ref().iter().enumerate() {
                let stone = Stone::from_code(code).ok_or(EngineError::InvalidCell {
                    row: r,
                    col: c,
                    value: code,
                })?;
                board.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        Ok(board)
    }

    /// Rows of cell codes, the inverse of `from_cells`.
    pub fn to_cells(&self) -> Vec<Vec<u8>> {
        (0..BOARD_SIZE as u8)
            .map(|r| {
                (0..BOARD_SIZE as u8)
                    .map(|c| self.get(Pos::new(r, c)).code())
                    .collect()
            })
            .collect()
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.attacker.get(pos) {
            Stone::Attacker
        } else if self.defender.get(pos) {
            Stone::Defender
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.attacker.get(pos) && !self.defender.get(pos)
    }

    /// Place a stone without legality checks. Search code only calls this
    /// on cells it has already seen empty; use `play` for caller moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Attacker => self.attacker.set(pos),
            Stone::Defender => self.defender.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.attacker.clear(pos);
        self.defender.clear(pos);
    }

    /// Put a cell back to a previously observed state.
    #[inline]
    pub fn set(&mut self, pos: Pos, stone: Stone) {
        self.remove_stone(pos);
        self.place_stone(pos, stone);
    }

    /// Checked placement: the cell must be empty and the stone a side.
    pub fn play(&mut self, mv: Move) -> Result<(), EngineError> {
        if mv.stone == Stone::Empty {
            return Err(EngineError::InvalidSide);
        }
        if !self.is_empty(mv.pos) {
            return Err(EngineError::Occupied {
                row: mv.pos.row as i32,
                col: mv.pos.col as i32,
            });
        }
        self.place_stone(mv.pos, mv.stone);
        Ok(())
    }

    /// Get bitboard for a side (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Attacker => Some(&self.attacker),
            Stone::Defender => Some(&self.defender),
            Stone::Empty => None,
        }
    }

    /// Number of stones a side has on the board
    #[inline]
    pub fn count(&self, stone: Stone) -> u32 {
        self.stones(stone).map_or(0, Bitboard::count)
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.attacker.count() + self.defender.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.attacker.is_empty() && self.defender.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == BOARD_SIZE * BOARD_SIZE
    }

    /// True when any of the eight surrounding cells holds a stone.
    pub fn has_neighbor(&self, pos: Pos) -> bool {
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = pos.row as i32 + dr;
                let c = pos.col as i32 + dc;
                if Pos::is_valid(r, c) && !self.is_empty(Pos::new(r as u8, c as u8)) {
                    return true;
                }
            }
        }
        false
    }

    /// Empty cells within one ring of any stone, row-major.
    pub fn neighbor_moves(&self) -> Vec<Pos> {
        Pos::all()
            .filter(|&p| self.is_empty(p) && self.has_neighbor(p))
            .collect()
    }

    /// Empty cells, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&p| self.is_empty(p))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = EngineError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Board::from_cells(&rows)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.to_cells()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{:2}", c)?;
        }
        writeln!(f)?;

        for r in 0..BOARD_SIZE {
            write!(f, "{:2}", r)?;
            for c in 0..BOARD_SIZE {
                let ch = match self.get(Pos::new(r as u8, c as u8)) {
                    Stone::Attacker => " X",
                    Stone::Defender => " O",
                    Stone::Empty => " .",
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Game rules for 10x10 five-in-a-row
//!
//! Only one rule decides the game: five or more of one side in a row,
//! horizontally, vertically or diagonally.

pub mod win;

// Re-exports for convenient access
pub use win::{
    creates_five, find_winning_line, has_five_along, is_win, is_winning_move, run_length,
    winning_axes,
};

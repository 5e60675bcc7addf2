//! Evaluation module for board positions
//!
//! Static, line-based scoring with a defence-weighted pattern table.

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{Pattern, PatternScore, PATTERNS};

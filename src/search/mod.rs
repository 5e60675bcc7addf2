//! Search module for the move engine
//!
//! Contains:
//! - Open-four threat generation and forced-block calculation
//! - Threat-space search for forced wins under a deadline
//! - Fixed-depth alpha-beta fallback

pub mod alphabeta;
pub mod deadline;
pub mod threat;
pub mod tss;

pub use alphabeta::{
    fallback_depth, find_forced_block, find_immediate_win, Decision, SearchResult, Searcher,
    FALLBACK_DEPTH, OPENING_FALLBACK_DEPTH,
};
pub use deadline::Deadline;
pub use threat::{critical_blocks, find_threats, is_threat};
pub use tss::{ThreatResult, ThreatSpaceSearcher};

//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Longest threat chain the search accepts
pub const MAX_PLY_LIMIT: u8 = 32;

/// Tunable engine parameters.
///
/// The fallback depth is fixed and not part of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Threat-space search ply limit
    pub max_ply: u8,
    /// Threat-space search budget in milliseconds
    pub time_limit_ms: u64,
    /// Answer the defender's first central move from the book
    pub use_opening_book: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_ply: 6,
            time_limit_ms: 500,
            use_opening_book: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_ply == 0 || self.max_ply > MAX_PLY_LIMIT {
            return Err(EngineError::InvalidConfig(format!(
                "max_ply must be in 1..={}, got {}",
                MAX_PLY_LIMIT, self.max_ply
            )));
        }
        if self.time_limit_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "time_limit_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

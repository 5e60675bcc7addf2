//! Pattern table for static evaluation
//!
//! Scores are asymmetric: the opponent's shapes cost more than the same
//! shapes earn for the evaluating side, so the fallback search prefers not
//! losing over winning. Both the thresholds and the asymmetry are fixed.

/// Line cell encoding used by the evaluator: own stone
pub const OWN: u8 = b'X';
/// Opponent stone
pub const OPP: u8 = b'O';
/// Empty cell
pub const EMPTY: u8 = b'_';

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row, either side
    pub const FIVE: i32 = 100_000;

    /// `_XXXX_`
    pub const OPEN_FOUR: i32 = 8_000;
    pub const OPEN_FOUR_OPP: i32 = 9_000;

    /// `XX_X` or `X_XX`
    pub const BROKEN_FOUR: i32 = 5_000;
    pub const BROKEN_FOUR_OPP: i32 = 7_000;

    /// `XXX`
    pub const THREE: i32 = 200;
    pub const THREE_OPP: i32 = 250;

    /// `XX`
    pub const TWO: i32 = 30;
    pub const TWO_OPP: i32 = 35;
}

/// Line shapes the evaluator looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Five,
    OpenFour,
    BrokenFour,
    Three,
    Two,
}

/// Every pattern, strongest first
pub const PATTERNS: [Pattern; 5] = [
    Pattern::Five,
    Pattern::OpenFour,
    Pattern::BrokenFour,
    Pattern::Three,
    Pattern::Two,
];

impl Pattern {
    /// Byte shapes, any of which counts as this pattern
    pub fn shapes(self) -> &'static [&'static [u8]] {
        match self {
            Pattern::Five => &[b"XXXXX"],
            Pattern::OpenFour => &[b"_XXXX_"],
            Pattern::BrokenFour => &[b"XX_X", b"X_XX"],
            Pattern::Three => &[b"XXX"],
            Pattern::Two => &[b"XX"],
        }
    }

    /// Score when the evaluating side owns the shape
    pub fn own_score(self) -> i32 {
        match self {
            Pattern::Five => PatternScore::FIVE,
            Pattern::OpenFour => PatternScore::OPEN_FOUR,
            Pattern::BrokenFour => PatternScore::BROKEN_FOUR,
            Pattern::Three => PatternScore::THREE,
            Pattern::Two => PatternScore::TWO,
        }
    }

    /// Penalty when the opponent owns the shape (positive magnitude)
    pub fn opponent_score(self) -> i32 {
        match self {
            Pattern::Five => PatternScore::FIVE,
            Pattern::OpenFour => PatternScore::OPEN_FOUR_OPP,
            Pattern::BrokenFour => PatternScore::BROKEN_FOUR_OPP,
            Pattern::Three => PatternScore::THREE_OPP,
            Pattern::Two => PatternScore::TWO_OPP,
        }
    }

    /// Does the encoded line contain this pattern anywhere?
    pub fn matches(self, line: &[u8]) -> bool {
        self.shapes().iter().any(|shape| contains(line, shape))
    }
}

#[inline]
fn contains(line: &[u8], shape: &[u8]) -> bool {
    line.len() >= shape.len() && line.windows(shape.len()).any(|w| w == shape)
}

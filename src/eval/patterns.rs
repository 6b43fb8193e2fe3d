//! Line scores for position evaluation
//!
//! These constants define the scoring weights for line occupancy tiers.
//! The 5/50/500 ladder keeps each tier an order of magnitude above the
//! previous one, so a single live triple outweighs any pile of pairs.

/// Scoring weights for line patterns
pub struct LineScore;

impl LineScore {
    /// Completed line - terminal, normally caught by the search before
    /// the evaluator runs. Kept here so evaluation of aborted positions
    /// still saturates correctly.
    pub const WIN: i32 = 100_000;

    /// Three own pieces, single empty cell currently playable
    /// (the empty cell is that column's drop position)
    pub const TRIPLE: i32 = 500;

    /// Three own pieces whose empty cell is buried under the column's
    /// drop position. Not winnable this turn, so worth little more than
    /// a pair until the column fills up.
    pub const TRIPLE_DORMANT: i32 = 60;

    /// Two own pieces, two empties
    pub const DOUBLE: i32 = 50;

    /// Lone piece on an otherwise empty line
    pub const SINGLE: i32 = 5;
}

/// Per-piece weight for occupying one of the four central columns
pub const CENTER_WEIGHT: i32 = 3;

/// Per-column weight for holding the top piece of a column
pub const HEIGHT_WEIGHT: i32 = 2;

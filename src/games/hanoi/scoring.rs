//! Minimum-move and score arithmetic.

use tracing::instrument;

/// Largest supported disk count; `2^31 - 1` still fits the `u32` move counter.
pub const MAX_DISKS: u32 = 31;

/// Score awarded for an optimal solution.
pub const PERFECT_SCORE: f64 = 100.0;

/// Optimal solution length for the three-peg puzzle: `2^disk_count - 1`.
#[instrument]
pub fn min_moves(disk_count: u32) -> u32 {
    1u32.checked_shl(disk_count).map_or(u32::MAX, |power| power - 1)
}

/// Ratio of optimal to actual moves, scaled to 100. Zero moves scores zero.
#[instrument]
pub fn score(min_moves: u32, moves_taken: u32) -> f64 {
    if moves_taken == 0 {
        0.0
    } else {
        (f64::from(min_moves) / f64::from(moves_taken)) * PERFECT_SCORE
    }
}

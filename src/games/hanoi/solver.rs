//! Optimal solution for the three-peg puzzle.
//!
//! The k-th move (1-based) of the optimal transfer moves disk
//! `trailing_zeros(k) + 1` from peg `(k & (k - 1)) % 3` to peg
//! `((k | (k - 1)) + 1) % 3`. That sequence ends on peg 2 for an odd disk
//! count and on peg 1 for an even one, so even counts swap the two.

use tracing::instrument;

use super::scoring::min_moves;
use super::types::{Move, PegId};

/// The move at zero-based `step` of the optimal solution, or `None` past the end.
#[instrument]
pub fn optimal_move(disk_count: u8, step: u32) -> Option<Move> {
    if disk_count == 0 || step >= min_moves(u32::from(disk_count)) {
        return None;
    }

    let k = u64::from(step) + 1;
    let from = raw_peg((k & (k - 1)) % 3);
    let to = raw_peg(((k | (k - 1)) + 1) % 3);

    if disk_count % 2 == 0 {
        Some(Move::new(swap_spare(from), swap_spare(to)))
    } else {
        Some(Move::new(from, to))
    }
}

/// The full optimal move sequence from peg 0 to peg 2, generated lazily.
#[instrument]
pub fn solution(disk_count: u8) -> impl Iterator<Item = Move> {
    let total = if disk_count == 0 {
        0
    } else {
        min_moves(u32::from(disk_count))
    };
    (0..total).filter_map(move |step| optimal_move(disk_count, step))
}

fn raw_peg(index: u64) -> PegId {
    match index {
        0 => PegId::Left,
        1 => PegId::Middle,
        _ => PegId::Right,
    }
}

fn swap_spare(peg: PegId) -> PegId {
    match peg {
        PegId::Left => PegId::Left,
        PegId::Middle => PegId::Right,
        PegId::Right => PegId::Middle,
    }
}

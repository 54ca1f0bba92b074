//! One-ply lookahead for moves that cannot wait for the full search

use crate::bitboard::{legal_moves, set_nth_bit};
use crate::threat;

/// Finds an immediately winning column, or failing that the lowest column
/// that blocks an immediate opponent win.
///
/// Columns are scanned in ascending order. A winning placement returns at
/// once; a blocking candidate is only remembered, a win found later still
/// takes priority over it. Returns `None` when nothing is forced, in which
/// case the full search decides and this check has not changed the outcome.
pub fn forced_move(mine: u64, opp: u64) -> Option<usize> {
    let mut block = None;
    for (column, bit) in legal_moves(mine | opp) {
        if threat::has_won(set_nth_bit(mine, bit)) {
            return Some(column);
        }
        if block.is_none() && threat::has_won(set_nth_bit(opp, bit)) {
            block = Some(column);
        }
    }
    block
}

//! Bit-parallel win detection and N-in-a-row opportunity masks

use crate::bitboard::masks;
use crate::HEIGHT;

// bit steps along the four line directions of the padded layout:
// vertical, diagonal \, horizontal, diagonal /
const DIRECTIONS: [usize; 4] = [1, HEIGHT, HEIGHT + 1, HEIGHT + 2];

// the n = 1 mask deliberately ignores the diagonals, lone tiles on a
// diagonal are rarely worth anything
const ADJACENT_DIRECTIONS: [usize; 2] = [1, HEIGHT + 1];

/// Checks a single player's bitboard for four tiles in a row.
///
/// For every direction, tiles with a same-owner neighbour one step away
/// are folded onto each other; a second fold by two steps leaves a bit
/// set only where a full four-alignment starts. No cell iteration.
pub fn has_won(board: u64) -> bool {
    DIRECTIONS.iter().any(|&step| {
        let pairs = board & (board >> step);
        pairs & (pairs >> (2 * step)) != 0
    })
}

/// Open cells that would extend `mine` to an `n + 1` alignment if filled,
/// for `n` existing tiles in line. Only shift/and/or over the padded
/// layout; the guard bits keep every shift inside its column.
pub fn evaluate_n(opp: u64, mine: u64, n: u32) -> u64 {
    match n {
        1 => evaluate_one(opp, mine),
        2 => evaluate_two(opp, mine),
        3 => evaluate_three(opp, mine),
        _ => panic!("no {}-in-a-row opportunity mask", n),
    }
}

// cells of the playing area not yet taken by either side
fn open_cells(opp: u64, mine: u64) -> u64 {
    masks::full_board_mask() & !(mine | opp)
}

// placements next to a lone tile: _X and X_
fn evaluate_one(opp: u64, mine: u64) -> u64 {
    let mut found = 0;
    for &step in ADJACENT_DIRECTIONS.iter() {
        found |= (mine >> step) | (mine << step);
    }
    found & open_cells(opp, mine)
}

// placements completing a run of three: _XX, X_X and XX_
fn evaluate_two(opp: u64, mine: u64) -> u64 {
    let mut found = 0;
    for &step in DIRECTIONS.iter() {
        found |= (mine >> step) & (mine >> (2 * step));
        found |= (mine << step) & (mine >> step);
        found |= (mine << step) & (mine << (2 * step));
    }
    found & open_cells(opp, mine)
}

// placements completing a run of four: _XXX, X_XX, XX_X and XXX_
fn evaluate_three(opp: u64, mine: u64) -> u64 {
    let mut found = 0;
    for &step in DIRECTIONS.iter() {
        found |= (mine >> step) & (mine >> (2 * step)) & (mine >> (3 * step));
        found |= (mine << step) & (mine >> step) & (mine >> (2 * step));
        found |= (mine << (2 * step)) & (mine << step) & (mine >> step);
        found |= (mine << step) & (mine << (2 * step)) & (mine << (3 * step));
    }
    found & open_cells(opp, mine)
}

/// Population count over the playing area only. Guard bits are masked
/// away first so a stray padding bit can never inflate the count.
pub fn bitboard_bits(board: u64) -> u32 {
    (board & masks::full_board_mask()).count_ones()
}

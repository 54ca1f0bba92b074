//! Heuristic scoring of non-terminal positions

use crate::threat;

/// Scoring weights for the position evaluator.
///
/// `mine[n - 1]` rewards open cells that would extend the engine's own
/// tiles to an `n + 1` alignment, `opp[n - 1]` penalises the same cells
/// for the opponent. The default table is asymmetric at n = 3.
#[derive(Copy, Clone, Debug)]
pub struct Weights {
    /// Sentinel magnitude for an already-won position
    pub win: i32,
    pub mine: [i32; 3],
    pub opp: [i32; 3],
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            win: 9_999_999,
            mine: [100, 500, 3000],
            opp: [100, 500, 1000],
        }
    }
}

/// Scores a position from the engine's fixed perspective.
///
/// Won positions short-circuit to the win sentinel; anything else is a
/// weighted sum of the opportunity-mask population counts for both sides.
pub fn eval_cost(opp: u64, mine: u64, weights: &Weights) -> i32 {
    if threat::has_won(opp) {
        return -weights.win;
    }
    if threat::has_won(mine) {
        return weights.win;
    }

    (1..=3)
        .map(|n| {
            weights.mine[n as usize - 1] * threat::bitboard_bits(threat::evaluate_n(opp, mine, n)) as i32
                - weights.opp[n as usize - 1]
                    * threat::bitboard_bits(threat::evaluate_n(mine, opp, n)) as i32
        })
        .sum()
}

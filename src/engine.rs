//! Engine entry point tying the forced-move check and the tree search together

use anyhow::{bail, Result};

use crate::bitboard::{legal_moves, masks, Position};
use crate::eval::Weights;
use crate::forced::forced_move;
use crate::search::SearchTree;
use crate::threat;
use crate::{HEIGHT, WIDTH};

/// The search depth used when none is configured
pub const DEFAULT_DEPTH: usize = 5;

/// The deepest supported search
pub const MAX_DEPTH: usize = 8;

/// How the opponent is modelled during tree search.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OpponentModel {
    /// The opponent always picks the reply worst for the engine
    Adversarial,
    /// The opponent picks uniformly at random among its legal replies
    Uniform,
}

/// Per-call search diagnostics.
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchStats {
    /// Nodes scored during tree search, zero when no tree was built
    pub nodes_visited: usize,
    /// Whether the one-ply forced-move check produced the answer
    pub forced_move: bool,
}

/// An agent choosing the next column for the side to move
///
/// # Notes
/// Each call to [`play`](Self::play) receives an immutable position
/// snapshot, builds a throwaway game tree bounded by the configured
/// depth and returns a single column. Nothing is carried over between
/// calls, so one engine value can serve any number of games in turn.
pub struct Engine {
    max_depth: usize,
    weights: Weights,
    opponent_model: OpponentModel,
}

impl Engine {
    /// Creates an engine with the default depth, weights and adversarial
    /// opponent model
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            weights: Weights::default(),
            opponent_model: OpponentModel::Adversarial,
        }
    }

    /// Sets the maximum search depth in plies, valid values are
    /// 1..=[`MAX_DEPTH`]
    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the evaluation weight table
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Replaces the opponent model used by the tree search
    pub fn with_opponent_model(mut self, opponent_model: OpponentModel) -> Self {
        self.opponent_model = opponent_model;
        self
    }

    /// Chooses a column (0-indexed) for the side to move.
    ///
    /// The position must be non-terminal and have at least one open
    /// column; violated preconditions are reported as errors rather
    /// than searched.
    pub fn play(&self, position: Position) -> Result<usize> {
        self.play_with_stats(position).map(|(column, _)| column)
    }

    /// Same as [`play`](Self::play), additionally returning the per-call
    /// search diagnostics
    pub fn play_with_stats(&self, position: Position) -> Result<(usize, SearchStats)> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH {
            bail!(
                "search depth {} out of range 1..={}",
                self.max_depth,
                MAX_DEPTH
            );
        }
        validate(&position)?;

        let (mine, opp) = (position.mine(), position.opponent());

        // a move that wins on the spot, or blocks the opponent from doing
        // so next turn, needs no tree
        if let Some(column) = forced_move(mine, opp) {
            return Ok((
                column,
                SearchStats {
                    nodes_visited: 0,
                    forced_move: true,
                },
            ));
        }

        let mut tree = SearchTree::new(mine, opp, self.max_depth, self.weights);
        let column = match self.opponent_model {
            OpponentModel::Adversarial => {
                tree.alphabeta();
                tree.best_column()
            }
            OpponentModel::Uniform => tree.best_column_expectimax(),
        };
        Ok((
            column,
            SearchStats {
                nodes_visited: tree.nodes_visited,
                forced_move: false,
            },
        ))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

// Precondition checks on the snapshot; anything caught here is a caller
// bug, not a position the engine should try to search.
fn validate(position: &Position) -> Result<()> {
    let (mine, opp) = (position.mine(), position.opponent());

    if mine & opp != 0 {
        bail!("invalid position, players overlap");
    }
    if (mine | opp) & !masks::full_board_mask() != 0 {
        bail!("invalid position, guard bits are set");
    }
    for column in 0..WIDTH {
        let fill = ((mine | opp) >> (column * (HEIGHT + 1))) & ((1 << HEIGHT) - 1);
        // column fills are contiguous from the bottom
        if fill & (fill + 1) != 0 {
            bail!("invalid position, column {} has floating tiles", column + 1);
        }
    }
    if threat::has_won(mine) || threat::has_won(opp) {
        bail!("invalid position, game is over");
    }
    if legal_moves(mine | opp).next().is_none() {
        bail!("invalid position, board is full");
    }
    Ok(())
}

//! Depth-bounded game tree search over an index-addressed node arena

use crate::bitboard::{legal_moves, set_nth_bit};
use crate::eval::{eval_cost, Weights};
use crate::threat;
use crate::WIDTH;

/// Memoised score of a search node.
///
/// A score produced under an alpha-beta cutoff is only a bound on the
/// true value and is stored as `Bound`; it is never served back from the
/// memo. Only `Exact` scores are reusable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeValue {
    Unset,
    Bound(i32),
    Exact(i32),
}

impl NodeValue {
    fn exact(self) -> Option<i32> {
        match self {
            NodeValue::Exact(value) => Some(value),
            _ => None,
        }
    }
}

type NodeId = usize;

struct Node {
    my_board: u64,
    opp_board: u64,
    depth: usize,
    // move that created this node, the root carries None
    column: Option<usize>,
    // the root points at itself
    parent: NodeId,
    value: NodeValue,
    children: Vec<NodeId>,
}

/// A game tree for one move request.
///
/// Nodes live in a flat arena and address each other by index, the tree
/// is built lazily while a search walks it and dropped wholesale when
/// the move request returns. Boards are never mutated in place; a child
/// holds copies of its parent's boards with one extra bit set.
pub struct SearchTree {
    nodes: Vec<Node>,
    root: NodeId,
    max_depth: usize,
    weights: Weights,

    /// The number of nodes scored by this tree so far (for diagnostics only)
    pub nodes_visited: usize,
}

impl SearchTree {
    pub fn new(my_board: u64, opp_board: u64, max_depth: usize, weights: Weights) -> Self {
        let root = Node {
            my_board,
            opp_board,
            depth: 0,
            column: None,
            parent: 0,
            value: NodeValue::Unset,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: 0,
            max_depth,
            weights,
            nodes_visited: 0,
        }
    }

    /// Scores the tree with plain minimax, no pruning.
    ///
    /// Kept as a first-class mode: for any board and depth it must pick
    /// the same column as [`alphabeta`](Self::alphabeta) and it is the
    /// reference the pruned search is tested against.
    pub fn minimax(&mut self) -> i32 {
        self.minimax_node(self.root)
    }

    fn minimax_node(&mut self, node: NodeId) -> i32 {
        if let NodeValue::Exact(value) = self.nodes[node].value {
            return value;
        }
        if self.is_leaf(node) {
            return self.leaf_value(node);
        }
        self.expand(node);
        if self.nodes[node].children.is_empty() {
            // board full before the depth limit, score it as it stands
            return self.leaf_value(node);
        }

        self.nodes_visited += 1;
        let engine_to_move = self.nodes[node].depth % 2 == 0;
        let mut best = if engine_to_move { i32::MIN } else { i32::MAX };
        for i in 0..self.nodes[node].children.len() {
            let child = self.nodes[node].children[i];
            let value = self.minimax_node(child);
            best = if engine_to_move {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        self.nodes[node].value = NodeValue::Exact(best);
        best
    }

    /// Scores the tree with fail-hard alpha-beta pruning.
    ///
    /// Every direct child of the root is searched with a fresh full
    /// window, so all of them resolve to exact scores and the move
    /// selection in [`best_column`](Self::best_column) sees the same
    /// candidates the raw minimax would produce. Pruning operates
    /// strictly below the root and changes the work done, never the
    /// chosen column.
    pub fn alphabeta(&mut self) -> i32 {
        self.expand(self.root);
        assert!(
            !self.nodes[self.root].children.is_empty(),
            "cannot search a full board"
        );

        self.nodes_visited += 1;
        let mut best = i32::MIN;
        for i in 0..self.nodes[self.root].children.len() {
            let child = self.nodes[self.root].children[i];
            best = best.max(self.alphabeta_node(child, i32::MIN, i32::MAX));
        }
        self.nodes[self.root].value = NodeValue::Exact(best);
        best
    }

    fn alphabeta_node(&mut self, node: NodeId, mut alpha: i32, mut beta: i32) -> i32 {
        if let NodeValue::Exact(value) = self.nodes[node].value {
            return value;
        }
        if self.is_leaf(node) {
            return self.leaf_value(node);
        }
        self.expand(node);
        if self.nodes[node].children.is_empty() {
            return self.leaf_value(node);
        }

        self.nodes_visited += 1;
        let engine_to_move = self.nodes[node].depth % 2 == 0;
        if engine_to_move {
            let mut value = i32::MIN;
            for i in 0..self.nodes[node].children.len() {
                let child = self.nodes[node].children[i];
                value = value.max(self.alphabeta_node(child, alpha, beta));
                alpha = alpha.max(value);
                if beta <= alpha {
                    // cut off: the remaining siblings are unexplored, so
                    // this score is a bound and must not be reused
                    self.nodes[node].value = NodeValue::Bound(value);
                    return value;
                }
            }
            self.nodes[node].value = NodeValue::Exact(value);
            value
        } else {
            let mut value = i32::MAX;
            for i in 0..self.nodes[node].children.len() {
                let child = self.nodes[node].children[i];
                value = value.min(self.alphabeta_node(child, alpha, beta));
                beta = beta.min(value);
                if beta <= alpha {
                    self.nodes[node].value = NodeValue::Bound(value);
                    return value;
                }
            }
            self.nodes[node].value = NodeValue::Exact(value);
            value
        }
    }

    /// Picks the root move whose exact score matches the root's resolved
    /// score, preferring the column closest to the centre. Equally distant
    /// candidates fall to the leftmost one, children are enumerated in
    /// ascending column order.
    ///
    /// # Panics
    /// Panics if the root has not been resolved or no child matches its
    /// score, both of which indicate a search bug.
    pub fn best_column(&self) -> usize {
        let root_value = match self.nodes[self.root].value.exact() {
            Some(value) => value,
            None => panic!("move requested before the root was resolved"),
        };
        self.nodes[self.root]
            .children
            .iter()
            .map(|&child| &self.nodes[child])
            .filter(|node| node.value.exact() == Some(root_value))
            .filter_map(|node| node.column)
            .min_by_key(|&column| (WIDTH as i32 / 2 - column as i32).abs())
            .unwrap_or_else(|| panic!("no root child matches the root score {}", root_value))
    }

    /// Picks a root move with the opponent modelled as a uniform random
    /// chance node instead of a minimiser.
    ///
    /// Expected scores are fractional, so this mode works in `f64` and
    /// bypasses the integer memo on internal nodes.
    pub fn best_column_expectimax(&mut self) -> usize {
        self.expand(self.root);
        self.nodes_visited += 1;

        let mut best: Option<(f64, usize)> = None;
        for i in 0..self.nodes[self.root].children.len() {
            let child = self.nodes[self.root].children[i];
            let value = self.expectimax_node(child);
            let column = self.nodes[child].column.expect("root children carry a column");
            let better = match best {
                None => true,
                Some((best_value, best_col)) => {
                    value > best_value
                        || (value == best_value
                            && (WIDTH as i32 / 2 - column as i32).abs()
                                < (WIDTH as i32 / 2 - best_col as i32).abs())
                }
            };
            if better {
                best = Some((value, column));
            }
        }
        best.map(|(_, column)| column)
            .unwrap_or_else(|| panic!("cannot search a full board"))
    }

    fn expectimax_node(&mut self, node: NodeId) -> f64 {
        if self.is_leaf(node) {
            return self.leaf_value(node) as f64;
        }
        self.expand(node);
        let num_children = self.nodes[node].children.len();
        if num_children == 0 {
            return self.leaf_value(node) as f64;
        }

        self.nodes_visited += 1;
        let engine_to_move = self.nodes[node].depth % 2 == 0;
        if engine_to_move {
            let mut best = f64::NEG_INFINITY;
            for i in 0..num_children {
                let child = self.nodes[node].children[i];
                best = best.max(self.expectimax_node(child));
            }
            best
        } else {
            // chance node: the opponent plays any legal reply with equal
            // probability
            let mut total = 0.0;
            for i in 0..num_children {
                let child = self.nodes[node].children[i];
                total += self.expectimax_node(child);
            }
            total / num_children as f64
        }
    }

    // One child per open column. The mover follows the depth parity: the
    // engine owns the even plies, the opponent the odd ones.
    fn expand(&mut self, node: NodeId) {
        if !self.nodes[node].children.is_empty() {
            return;
        }
        let (my_board, opp_board, depth) = {
            let node = &self.nodes[node];
            (node.my_board, node.opp_board, node.depth)
        };
        let engine_to_move = depth % 2 == 0;

        for (column, bit) in legal_moves(my_board | opp_board) {
            let (child_mine, child_opp) = if engine_to_move {
                (set_nth_bit(my_board, bit), opp_board)
            } else {
                (my_board, set_nth_bit(opp_board, bit))
            };
            let child = self.nodes.len();
            self.nodes.push(Node {
                my_board: child_mine,
                opp_board: child_opp,
                depth: depth + 1,
                column: Some(column),
                parent: node,
                value: NodeValue::Unset,
                children: Vec::new(),
            });
            self.nodes[node].children.push(child);
        }
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        let node = &self.nodes[node];
        node.depth == self.max_depth
            || threat::has_won(node.my_board)
            || threat::has_won(node.opp_board)
    }

    // Leaves are always scored from the engine's fixed perspective, the
    // min/max alternation above handles whose turn it is.
    fn leaf_value(&mut self, node: NodeId) -> i32 {
        self.nodes_visited += 1;
        let (opp_board, my_board) = (self.nodes[node].opp_board, self.nodes[node].my_board);
        let value = eval_cost(opp_board, my_board, &self.weights);
        self.nodes[node].value = NodeValue::Exact(value);
        value
    }

    /// Diagnostic: every node points back at the node that spawned it and
    /// the root points at itself.
    pub fn parents_consistent(&self) -> bool {
        self.nodes.iter().enumerate().all(|(id, node)| match node.column {
            None => node.parent == id,
            Some(_) => self.nodes[node.parent].children.contains(&id),
        })
    }
}

//! Monte Carlo Tree Search
//!
//! The alternative search backend: UCB1 selection, single-child
//! expansion, light tactical playouts and root-perspective
//! backpropagation, repeated until the time budget runs out.
//!
//! Nodes live in an arena (`Vec<Node>`) owned by the tree; a node's
//! `parent` field is a plain index used only while walking back up
//! during backpropagation, so there is no ownership cycle to manage.
//! The tree is built fresh for every decision and dropped afterwards.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::board::{Board, Column, GameResult, Player, TOTAL_CELLS};
use crate::search::ordering::ordered_columns;
use crate::search::threat::winning_column;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(u32);

impl NodeId {
    const NONE: NodeId = NodeId(u32::MAX);
}

/// One arena slot: a position reached by `column` from the parent.
struct Node {
    parent: NodeId,
    column: Option<Column>,
    /// Snapshot of the position at this node
    board: Board,
    /// Whose turn it is at this position
    to_move: Player,
    /// Terminal result, fixed at expansion time
    terminal: Option<GameResult>,
    /// Columns not yet expanded into children, center-first
    untried: Vec<Column>,
    children: Vec<NodeId>,
    visits: u32,
    /// Accumulated reward from the root player's perspective
    /// (1.0 win / 0.5 draw / 0.0 loss per playout)
    reward: f64,
}

impl Node {
    fn new(parent: NodeId, column: Option<Column>, board: Board, to_move: Player) -> Self {
        let terminal = board.result();
        let untried = if terminal.is_some() {
            Vec::new()
        } else {
            ordered_columns(&board)
        };
        Self {
            parent,
            column,
            board,
            to_move,
            terminal,
            untried,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / f64::from(self.visits)
        }
    }
}

/// Result of one MCTS run.
#[derive(Debug, Clone)]
pub struct MctsResult {
    /// Highest mean-reward root child; `None` when the budget did not
    /// allow a single iteration (the caller must fall back).
    pub best_move: Option<Column>,
    /// Completed select/expand/simulate/backpropagate iterations
    pub iterations: u64,
}

/// UCT searcher with a seeded RNG for reproducible playouts.
pub struct MctsSearcher {
    exploration: f64,
    rng: ChaCha20Rng,
}

impl MctsSearcher {
    #[must_use]
    pub fn new(exploration: f64, seed: u64) -> Self {
        Self {
            exploration,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Run the four-phase loop from `board` with `player` to move until
    /// `budget` elapses, then pick the root child with the best win rate.
    pub fn search(&mut self, board: &Board, player: Player, budget: Duration) -> MctsResult {
        let deadline = Instant::now() + budget;
        let mut arena: Vec<Node> = Vec::with_capacity(1024);
        arena.push(Node::new(NodeId::NONE, None, board.clone(), player));

        let mut iterations = 0u64;
        while Instant::now() < deadline {
            let leaf = self.select(&arena, NodeId(0));
            let node = self.expand(&mut arena, leaf);
            let outcome = self.simulate(&arena[node.0 as usize]);
            Self::backpropagate(&mut arena, node, reward_for(player, outcome));
            iterations += 1;
        }

        let root = &arena[0];
        let best_move = root
            .children
            .iter()
            .map(|&id| &arena[id.0 as usize])
            .max_by(|a, b| {
                a.mean_reward()
                    .partial_cmp(&b.mean_reward())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .and_then(|n| n.column);

        tracing::debug!(
            iterations,
            children = root.children.len(),
            "mcts search finished"
        );

        MctsResult {
            best_move,
            iterations,
        }
    }

    /// Walk down from `from`, always taking the UCB1-maximal child, until
    /// reaching a node that is terminal or still has untried columns.
    fn select(&self, arena: &[Node], from: NodeId) -> NodeId {
        let mut current = from;
        loop {
            let node = &arena[current.0 as usize];
            if node.terminal.is_some() || !node.is_fully_expanded() {
                return current;
            }
            let parent_visits = f64::from(node.visits.max(1));
            let ln_parent = parent_visits.ln();
            let mut best = None;
            let mut best_ucb = f64::NEG_INFINITY;
            for &child_id in &node.children {
                let child = &arena[child_id.0 as usize];
                // Unvisited children have infinite priority
                let ucb = if child.visits == 0 {
                    f64::INFINITY
                } else {
                    child.mean_reward()
                        + self.exploration * (ln_parent / f64::from(child.visits)).sqrt()
                };
                if ucb > best_ucb {
                    best_ucb = ucb;
                    best = Some(child_id);
                }
            }
            match best {
                Some(id) => current = id,
                // Fully expanded but childless can only mean terminal,
                // which was handled above; stop defensively anyway.
                None => return current,
            }
        }
    }

    /// Materialize one child for one untried column of `leaf`. Terminal
    /// leaves pass through unchanged.
    fn expand(&mut self, arena: &mut Vec<Node>, leaf: NodeId) -> NodeId {
        let (column, child_board, to_move) = {
            let node = &mut arena[leaf.0 as usize];
            if node.terminal.is_some() || node.untried.is_empty() {
                return leaf;
            }
            let pick = self.rng.gen_range(0..node.untried.len());
            let column = node.untried.swap_remove(pick);
            let mut child_board = node.board.clone();
            child_board.drop(column, node.to_move);
            (column, child_board, node.to_move.opponent())
        };

        let child_id = NodeId(arena.len() as u32);
        arena.push(Node::new(leaf, Some(column), child_board, to_move));
        arena[leaf.0 as usize].children.push(child_id);
        child_id
    }

    /// Play the position out with the light policy: take an immediate
    /// win, else block the opponent's, else prefer a central column, else
    /// move uniformly at random. Capped at the cell count of the board as
    /// a safety bound.
    fn simulate(&mut self, node: &Node) -> GameResult {
        if let Some(result) = node.terminal {
            return result;
        }

        let mut board = node.board.clone();
        let mut to_move = node.to_move;
        for _ in 0..TOTAL_CELLS {
            if let Some(result) = board.result() {
                return result;
            }
            let column = self.playout_move(&board, to_move);
            board.drop(column, to_move);
            to_move = to_move.opponent();
        }
        board.result().unwrap_or(GameResult::Draw)
    }

    fn playout_move(&mut self, board: &Board, to_move: Player) -> Column {
        if let Some(win) = winning_column(board, to_move) {
            return win;
        }
        if let Some(block) = winning_column(board, to_move.opponent()) {
            return block;
        }
        let central: Vec<Column> = board
            .legal_columns()
            .filter(|c| c.is_central())
            .collect();
        if !central.is_empty() && self.rng.gen_bool(0.6) {
            return central[self.rng.gen_range(0..central.len())];
        }
        let legal: Vec<Column> = board.legal_columns().collect();
        legal[self.rng.gen_range(0..legal.len())]
    }

    /// Credit the playout to every node on the path back to the root.
    fn backpropagate(arena: &mut [Node], from: NodeId, reward: f64) {
        let mut current = from;
        while current != NodeId::NONE {
            let node = &mut arena[current.0 as usize];
            node.visits += 1;
            node.reward += reward;
            current = node.parent;
        }
    }
}

/// Playout reward from the root player's perspective.
fn reward_for(root_player: Player, outcome: GameResult) -> f64 {
    match outcome {
        GameResult::Won(winner) if winner == root_player => 1.0,
        GameResult::Won(_) => 0.0,
        GameResult::Draw => 0.5,
    }
}

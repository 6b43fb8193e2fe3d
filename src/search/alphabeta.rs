//! Negamax search with alpha-beta pruning, iterative deepening and a
//! transposition table
//!
//! The searcher explores the column tree with an explicit drop/undo pair
//! around every recursive call; the board is mutated in place and
//! restored on the way out, so the hot path allocates nothing. Scores
//! are always from the side-to-move's perspective (negamax), negated as
//! they cross a ply boundary.
//!
//! Iterative deepening runs full passes at depth 1, 2, 3, ... until the
//! time budget runs out. The move of the last completed pass is kept; a
//! partially completed deeper pass may replace it only when it found a
//! strictly better score, since the first root moves explored at a new
//! depth are the ones ranked most promising.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use qubic::board::{Board, Column, Player};
//! use qubic::search::Searcher;
//!
//! let mut searcher = Searcher::new(10_000);
//! let mut board = Board::new();
//! board.drop(Column::new(1, 1), Player::One);
//!
//! let result = searcher.search(&board, Player::Two, 4, Duration::from_millis(100));
//! assert!(result.best_move.is_some());
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Column, Coord, GameResult, Player};
use crate::eval::{evaluate, LineScore};
use crate::search::ordering::ordered_columns_scored;

use super::{Bound, TranspositionTable, ZobristTable};

/// Base score of a decided position; the remaining depth is added on top
/// so the search prefers faster wins and slower losses.
const WIN_BASE: i32 = LineScore::WIN;

/// Alpha-beta window bound, above any reachable score
const INF: i32 = WIN_BASE * 4;

/// Search result with diagnostics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best column found, `None` only when the position has no legal move
    pub best_move: Option<Column>,
    /// Score of the best column, from the searched player's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: i8,
    /// Nodes visited across all iterations
    pub nodes: u64,
}

/// Negamax searcher with a process-lifetime transposition table.
///
/// The table and Zobrist keys live as long as the searcher, so results
/// carry over between turns of the same game; the table flushes itself
/// when it outgrows its capacity bound.
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes: u64,
    deadline: Instant,
    stopped: bool,
}

impl Searcher {
    #[must_use]
    pub fn new(tt_capacity: usize) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(tt_capacity),
            nodes: 0,
            deadline: Instant::now(),
            stopped: false,
        }
    }

    /// Drop all cached search state. Call between games.
    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }

    #[must_use]
    pub fn tt_len(&self) -> usize {
        self.tt.len()
    }

    /// Find the best column for `player` within the depth cap and time
    /// budget. The board is cloned once; all deeper exploration mutates
    /// the working copy through drop/undo pairs.
    pub fn search(
        &mut self,
        board: &Board,
        player: Player,
        max_depth: i8,
        budget: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        self.deadline = start + budget;
        self.stopped = false;
        self.nodes = 0;

        let mut work = board.clone();
        let root_hash = self.zobrist.hash(&work, player);

        let mut best = SearchResult {
            best_move: None,
            score: -INF,
            depth: 0,
            nodes: 0,
        };
        let mut prev_pass = Duration::ZERO;

        for depth in 1..=max_depth.max(1) {
            let pass_start = Instant::now();
            let pass = self.search_root(&mut work, player, depth, root_hash);

            if self.stopped {
                // A partially searched depth only dethrones the completed
                // result with a strictly better score.
                if pass.best_move.is_some() && pass.score > best.score {
                    tracing::debug!(depth, score = pass.score, "partial pass improved best move");
                    best.best_move = pass.best_move;
                    best.score = pass.score;
                }
                break;
            }

            best = pass;
            best.depth = depth;
            let pass_time = pass_start.elapsed();
            tracing::debug!(
                depth,
                score = best.score,
                nodes = self.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "depth completed"
            );

            // A decided game needs no deeper confirmation
            if best.score.abs() >= WIN_BASE {
                break;
            }

            // Estimate the next pass from the branching growth of the
            // previous two and stop early rather than start a pass that
            // cannot finish.
            let remaining = budget.saturating_sub(start.elapsed());
            let growth = if prev_pass.as_micros() > 0 {
                (pass_time.as_micros() as f64 / prev_pass.as_micros() as f64).clamp(1.5, 6.0)
            } else {
                3.0
            };
            let estimated_next = pass_time.mul_f64(growth);
            prev_pass = pass_time;
            if estimated_next > remaining {
                break;
            }
        }

        best.nodes = self.nodes;
        best
    }

    /// Root pass: like an interior node, but tracks the best column and
    /// never prunes the window down to nothing.
    fn search_root(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: i8,
        hash: u64,
    ) -> SearchResult {
        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for column in self.root_order(board, player, hash) {
            let z = board.drop(column, player);
            let child_hash = self
                .zobrist
                .update_drop(hash, Coord::new(column.x, column.y, z), player);
            let score = -self.negamax(board, player.opponent(), depth - 1, -beta, -alpha, child_hash);
            board.undo(column, z);

            // Record before the stop check: on an aborted pass the columns
            // already explored are the highest ranked, and their scores
            // stay inside the evaluation range, so the best of them is the
            // right emergency answer.
            if score > best_score {
                best_score = score;
                best_move = Some(column);
            }
            if self.stopped {
                break;
            }
            alpha = alpha.max(score);
        }

        if !self.stopped {
            self.tt.store(hash, depth, best_score, Bound::Exact, best_move);
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
        }
    }

    /// Ranked root columns: the transposition move first, then the
    /// one-ply ordering.
    fn root_order(&self, board: &Board, player: Player, hash: u64) -> Vec<Column> {
        let mut columns = ordered_columns_scored(board, player);
        if let Some(tt_move) = self.tt.best_move(hash) {
            if let Some(pos) = columns.iter().position(|&c| c == tt_move) {
                columns.remove(pos);
                columns.insert(0, tt_move);
            }
        }
        columns
    }

    /// Recursive negamax with an alpha-beta window, from the perspective
    /// of `player`, who is to move.
    fn negamax(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: i8,
        mut alpha: i32,
        beta: i32,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;

        // Budget check on every node: overrunning degrades search
        // quality, never move legality.
        if self.stopped || Instant::now() >= self.deadline {
            self.stopped = true;
            return evaluate(board, player);
        }

        if let Some(score) = self.tt.probe(hash, depth, alpha, beta) {
            return score;
        }

        if let Some(result) = board.result() {
            return match result {
                GameResult::Won(winner) if winner == player => WIN_BASE + i32::from(depth),
                GameResult::Won(_) => -(WIN_BASE + i32::from(depth)),
                GameResult::Draw => 0,
            };
        }

        if depth <= 0 {
            return evaluate(board, player);
        }

        let alpha_orig = alpha;
        let mut best_score = -INF;
        let mut best_move = None;

        for column in ordered_columns_scored(board, player) {
            let z = board.drop(column, player);
            let child_hash = self
                .zobrist
                .update_drop(hash, Coord::new(column.x, column.y, z), player);
            let score = -self.negamax(board, player.opponent(), depth - 1, -beta, -alpha, child_hash);
            board.undo(column, z);

            if self.stopped {
                return best_score.max(score);
            }
            if score > best_score {
                best_score = score;
                best_move = Some(column);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score >= beta {
            Bound::Lower
        } else if best_score > alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(hash, depth, best_score, bound, best_move);

        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_millis(500);

    #[test]
    fn test_search_returns_a_legal_move() {
        let mut searcher = Searcher::new(10_000);
        let board = Board::new();
        let result = searcher.search(&board, Player::One, 3, BUDGET);
        let best = result.best_move.expect("empty board must yield a move");
        assert!(board.has_room(best));
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_search_takes_immediate_win() {
        let mut board = Board::new();
        let column = Column::new(1, 1);
        for _ in 0..3 {
            board.drop(column, Player::One);
        }
        board.drop(Column::new(0, 0), Player::Two);
        board.drop(Column::new(3, 0), Player::Two);
        board.drop(Column::new(0, 3), Player::Two);

        let mut searcher = Searcher::new(10_000);
        let result = searcher.search(&board, Player::One, 4, BUDGET);
        assert_eq!(result.best_move, Some(column));
        assert!(result.score >= WIN_BASE);
    }

    #[test]
    fn test_search_blocks_forced_loss() {
        let mut board = Board::new();
        // Two threatens the vertical at (2,2); One has no win of their own.
        for _ in 0..3 {
            board.drop(Column::new(2, 2), Player::Two);
        }
        board.drop(Column::new(0, 0), Player::One);
        board.drop(Column::new(3, 0), Player::One);
        board.drop(Column::new(0, 3), Player::One);

        let mut searcher = Searcher::new(10_000);
        let result = searcher.search(&board, Player::One, 4, BUDGET);
        assert_eq!(result.best_move, Some(Column::new(2, 2)));
    }

    #[test]
    fn test_search_prefers_faster_win() {
        let mut board = Board::new();
        // One can win immediately on the vertical at (1,1)
        for _ in 0..3 {
            board.drop(Column::new(1, 1), Player::One);
        }
        // ...and also has a slower two-move threat elsewhere
        board.drop(Column::new(0, 0), Player::One);
        board.drop(Column::new(1, 0), Player::One);
        for column in [Column::new(3, 3), Column::new(2, 3), Column::new(3, 2), Column::new(2, 2), Column::new(0, 2)] {
            board.drop(column, Player::Two);
        }

        let mut searcher = Searcher::new(10_000);
        let result = searcher.search(&board, Player::One, 5, BUDGET);
        assert_eq!(result.best_move, Some(Column::new(1, 1)));
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new();
        board.drop(Column::new(1, 2), Player::One);
        board.drop(Column::new(2, 1), Player::Two);
        let snapshot = board.clone();

        let mut searcher = Searcher::new(10_000);
        let _ = searcher.search(&board, Player::One, 4, BUDGET);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_zero_budget_still_returns_a_move() {
        let mut searcher = Searcher::new(10_000);
        let board = Board::new();
        let result = searcher.search(&board, Player::One, 6, Duration::ZERO);
        // The first pass is aborted almost immediately, but the root loop
        // records whatever it managed to evaluate.
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_deeper_search_visits_more_nodes() {
        let mut board = Board::new();
        board.drop(Column::new(1, 1), Player::One);
        board.drop(Column::new(2, 2), Player::Two);

        let mut shallow = Searcher::new(10_000);
        let shallow_nodes = shallow.search(&board, Player::One, 2, BUDGET).nodes;
        let mut deep = Searcher::new(10_000);
        let deep_nodes = deep.search(&board, Player::One, 4, BUDGET).nodes;
        assert!(deep_nodes > shallow_nodes);
    }

    #[test]
    fn test_cache_carries_between_searches() {
        let mut board = Board::new();
        board.drop(Column::new(1, 1), Player::One);

        let mut searcher = Searcher::new(10_000);
        let first = searcher.search(&board, Player::Two, 3, BUDGET);
        assert!(searcher.tt_len() > 0);
        let second = searcher.search(&board, Player::Two, 3, BUDGET);
        assert_eq!(first.best_move, second.best_move);
    }
}

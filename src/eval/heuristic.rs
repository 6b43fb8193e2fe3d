//! Heuristic evaluation function for non-terminal positions
//!
//! Sums a contribution from each of the 76 winning lines, then adds two
//! positional terms (center control and column-top control). A line that
//! contains pieces of both players is dead and contributes nothing.
//!
//! Triples are the interesting tier: a three-in-line threat only counts
//! at full weight when its single empty cell is that column's current
//! drop position, i.e. the threat is actually playable next turn. A
//! threat buried under the drop position is dormant and heavily
//! discounted.
//!
//! The center term weights the mover's pieces by height but folds the
//! opponent's in at a flat rate, so the total is only approximately
//! antisymmetric between perspectives. Tests must not assert
//! `evaluate(b, p) == -evaluate(b, o)` exactly.

use crate::board::{lines, Board, Column, Coord, Line, Player};

use super::patterns::{LineScore, CENTER_WEIGHT, HEIGHT_WEIGHT};

/// Evaluate the board from the perspective of the given player.
///
/// Positive scores favor `player`, negative favor the opponent. Terminal
/// detection is the search's job; this function still saturates at
/// [`LineScore::WIN`] per completed line so that positions reached after
/// a time-budget abort evaluate sanely.
#[must_use]
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();
    let own_bits = board.bits(player);
    let opp_bits = board.bits(opponent);

    let mut score = 0;
    for line in lines() {
        let own = (own_bits & line.mask).count_ones();
        let theirs = (opp_bits & line.mask).count_ones();
        if own > 0 && theirs > 0 {
            continue; // blocked line
        }
        if own > 0 {
            score += line_value(board, line, own);
        } else if theirs > 0 {
            score -= line_value(board, line, theirs);
        }
    }

    score + center_control(board, player) + height_control(board, player)
}

/// Contribution of a line held by exactly one player with `count` pieces.
fn line_value(board: &Board, line: &Line, count: u32) -> i32 {
    match count {
        1 => LineScore::SINGLE,
        2 => LineScore::DOUBLE,
        3 => {
            if triple_is_playable(board, line) {
                LineScore::TRIPLE
            } else {
                LineScore::TRIPLE_DORMANT
            }
        }
        _ => LineScore::WIN,
    }
}

/// A triple is live only if its single empty cell is the current drop
/// position of its column.
fn triple_is_playable(board: &Board, line: &Line) -> bool {
    let empty_mask = line.mask & !board.occupied();
    debug_assert_eq!(empty_mask.count_ones(), 1);
    let gap = Coord::from_bit_index(empty_mask.trailing_zeros() as usize);
    board.column_height(gap.column()) == gap.z
}

/// Center control: pieces in the four central columns. Own pieces are
/// weighted by height (higher placements dominate more lines), the
/// opponent's are folded in at a flat rate.
fn center_control(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();
    let mut score = 0;
    for column in Column::CENTRAL {
        for z in 0..board.column_height(column) {
            let coord = Coord::new(column.x, column.y, z);
            match board.get(coord) {
                Some(p) if p == player => score += (i32::from(z) + 1) * CENTER_WEIGHT,
                Some(_) => score -= 2 * CENTER_WEIGHT,
                None => {}
            }
        }
    }
    score
}

/// Height control: whoever holds the top piece of a column controls
/// every line passing through the cells above it. Scored as the column's
/// fill level, signed by the owner of the top piece.
fn height_control(board: &Board, player: Player) -> i32 {
    let mut score = 0;
    for column in Column::all() {
        let h = board.column_height(column);
        if h == 0 {
            continue;
        }
        let top = Coord::new(column.x, column.y, h - 1);
        let bonus = i32::from(h) * HEIGHT_WEIGHT;
        match board.get(top) {
            Some(p) if p == player => score += bonus,
            Some(_) => score -= bonus,
            // h > 0 guarantees the top cell is occupied
            None => {}
        }
    }
    score
}

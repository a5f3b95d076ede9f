//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The search mutates a scratch `GameState` through `make_move` and
//! `undo_move`, so every branch restores the position before returning and
//! the caller's state is never touched.

use chess_core::{Color, GameState, Move, PieceKind};

use crate::evaluation::{evaluate, piece_value};

/// Scores below/above this magnitude are ordinary evaluations; mate scores
/// sit above it, offset by remaining depth so shallower mates win out.
pub const MATE_SCORE: i32 = 100_000;
pub const INF: i32 = 1_000_000;

/// Recursive game-tree search. `root` is the color the score is relative to;
/// `maximizing` tracks whose turn the current node simulates.
///
/// Depth 0 returns the static evaluation. A node with no legal moves is
/// terminal: a mate score favoring the side not in check, or 0 for
/// stalemate.
pub fn minimax(
    state: &mut GameState,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    root: Color,
) -> i32 {
    if depth == 0 {
        return evaluate(state, root);
    }

    let side = state.turn();
    let moves = state.all_valid_moves(side);
    if moves.is_empty() {
        if state.in_check() {
            let score = MATE_SCORE + depth as i32;
            return if side == root { -score } else { score };
        }
        return 0; // Stalemate.
    }

    let mut best = if maximizing { -INF } else { INF };
    for mv in ordered(state, moves) {
        if state
            .make_move(mv.from, mv.to, promotion_choice(&mv))
            .is_err()
        {
            continue;
        }
        let score = minimax(state, depth - 1, alpha, beta, !maximizing, root);
        let _ = state.undo_move();

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// The search always promotes to a queen.
pub(crate) fn promotion_choice(mv: &Move) -> Option<PieceKind> {
    mv.promotion.then_some(PieceKind::Queen)
}

/// Best-first ordering to tighten pruning: captures first, weighted by the
/// victim's value, with proximity to the board center breaking ties.
pub(crate) fn ordered(state: &GameState, mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|mv| std::cmp::Reverse(order_score(state, mv)));
    moves
}

fn order_score(state: &GameState, mv: &Move) -> i32 {
    let mut score = 0;
    if mv.capture {
        let victim = if mv.en_passant {
            PieceKind::Pawn
        } else {
            state
                .piece_at(mv.to.row as i32, mv.to.col as i32)
                .map(|p| p.kind)
                .unwrap_or(PieceKind::Pawn)
        };
        score += 10 * piece_value(victim);
    }
    // Manhattan distance to the center, doubled so it stays integral.
    let dr = (2 * mv.to.row as i32 - 7).abs();
    let dc = (2 * mv.to.col as i32 - 7).abs();
    score + 14 - (dr + dc)
}

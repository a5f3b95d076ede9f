//! The computer opponent: difficulty settings and move selection.

use chess_core::{GameState, Move};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::search::{minimax, ordered, promotion_choice, INF};

/// Difficulty tunes the search depth and how often the agent deliberately
/// plays a random legal move instead of searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn search_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    pub fn random_move_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.10,
            Difficulty::Hard => 0.0,
        }
    }
}

/// A plain value wrapping the search; holds no game state of its own and
/// works on a disposable clone of whatever `GameState` it is handed.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    difficulty: Difficulty,
}

impl SearchAgent {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Picks a move for the side to move, or `None` when no legal move
    /// exists — the caller must treat that as the game being over.
    pub fn best_move(&self, state: &GameState) -> Option<Move> {
        let moves = state.all_valid_moves(state.turn());
        if moves.is_empty() {
            return None;
        }

        let mut rng = rand::thread_rng();
        let p = self.difficulty.random_move_probability();
        if p > 0.0 && rng.gen_bool(p) {
            debug!("playing a random move at {:?}", self.difficulty);
            return moves.choose(&mut rng).copied();
        }

        self.search_root(state, moves)
    }

    fn search_root(&self, state: &GameState, moves: Vec<Move>) -> Option<Move> {
        let root = state.turn();
        let depth = self.difficulty.search_depth();
        let mut scratch = state.clone();

        let mut best = None;
        let mut best_score = -INF;
        let mut alpha = -INF;

        for mv in ordered(state, moves) {
            if scratch
                .make_move(mv.from, mv.to, promotion_choice(&mv))
                .is_err()
            {
                continue;
            }
            let score = minimax(&mut scratch, depth - 1, alpha, INF, false, root);
            let _ = scratch.undo_move();
            debug!("{}{} scored {}", mv.from, mv.to, score);

            // Strictly greater: the first maximal move wins ties.
            if score > best_score || best.is_none() {
                best_score = score;
                best = Some(mv);
            }
            alpha = alpha.max(best_score);
        }

        best
    }
}

impl Default for SearchAgent {
    fn default() -> Self {
        Self::new(Difficulty::Medium)
    }
}

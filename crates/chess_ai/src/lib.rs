// Adversarial search over the chess_core rules engine
pub mod agent;
pub mod evaluation;
pub mod search;

// Re-export main types for convenience
pub use agent::{Difficulty, SearchAgent};
pub use evaluation::{evaluate, piece_value};
pub use search::minimax;

// Core chess game logic modules
pub mod board;
pub mod game;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod square;

// Re-export main types for convenience
pub use board::Board;
pub use game::{GameState, GameStatus, MoveError, MoveRecord};
pub use moves::{CastlingSide, Move};
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;

use crate::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

/// A move produced by the rules engine. Carries every flag execution needs so
/// that special-move side effects never have to be re-derived. Callers never
/// build these by hand; a move is legal only if it appears in the engine's
/// current legal-move set for its source square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// True when the move removes an enemy piece, including en passant.
    pub capture: bool,
    /// True when the move lands a pawn on the far rank; the caller supplies
    /// the replacement kind when submitting the move.
    pub promotion: bool,
    pub en_passant: bool,
    pub castling: Option<CastlingSide>,
    /// True for a pawn's initial two-square advance.
    pub double_step: bool,
}

impl Move {
    /// A plain relocation with no special flags. The rules engine sets flags
    /// on top of this as it classifies each destination.
    pub(crate) fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
            promotion: false,
            en_passant: false,
            castling: None,
            double_step: false,
        }
    }
}

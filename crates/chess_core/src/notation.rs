//! Algebraic notation for already-played moves.
//!
//! A pure formatting view over `MoveRecord`; no legality is re-checked.

use crate::game::MoveRecord;
use crate::moves::CastlingSide;
use crate::piece::PieceKind;

/// Renders a history entry in algebraic notation: `O-O`/`O-O-O` for
/// castling, otherwise piece letter (omitted for pawns), the source file for
/// pawn captures, `x` on capture, the destination square, and `=<LETTER>`
/// on promotion.
pub fn algebraic(record: &MoveRecord) -> String {
    if let Some(side) = record.castling {
        return match side {
            CastlingSide::Kingside => "O-O".to_string(),
            CastlingSide::Queenside => "O-O-O".to_string(),
        };
    }

    let mut out = String::new();
    out.push_str(record.moved.kind.letter());

    let is_capture = record.captured.is_some();
    if is_capture && record.moved.kind == PieceKind::Pawn {
        out.push(record.from.file_char());
    }
    if is_capture {
        out.push('x');
    }

    out.push(record.to.file_char());
    out.push(record.to.rank_char());

    if let Some(kind) = record.promotion {
        out.push('=');
        out.push_str(kind.letter());
    }

    out
}

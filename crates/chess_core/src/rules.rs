//! Move generation and legality.
//!
//! Generation happens in two stages: pseudo-legal moves obey each piece's
//! movement shape, then the legality filter speculatively applies each one
//! and discards any that leave the mover's own king attacked. The filter
//! uses a small per-move undo record rather than copying the whole board
//! for every candidate.

use crate::board::Board;
use crate::moves::{CastlingSide, Move};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRS;

/// The row a pawn of `color` advances toward.
fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

fn promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// All legal moves for the piece at `from`, or empty if the square is vacant.
///
/// `en_passant` is the target square left behind by an enemy pawn's double
/// step on the previous ply, if any.
pub fn valid_moves(board: &Board, from: Square, en_passant: Option<Square>) -> Vec<Move> {
    let Some(piece) = board.piece(from) else {
        return Vec::new();
    };
    let mut scratch = board.clone();
    pseudo_legal_moves(board, from, en_passant)
        .into_iter()
        .filter(|mv| leaves_king_safe(&mut scratch, mv, piece.color))
        .collect()
}

/// Legal moves for every piece of `color`.
pub fn all_valid_moves(board: &Board, color: Color, en_passant: Option<Square>) -> Vec<Move> {
    let mut moves = Vec::new();
    for sq in board.squares() {
        if board.piece(sq).is_some_and(|p| p.color == color) {
            moves.extend(valid_moves(board, sq, en_passant));
        }
    }
    moves
}

/// Whether `color` has at least one legal move. Equivalent to asking if
/// `all_valid_moves` is non-empty, but stops at the first hit; terminal
/// detection runs this after every move.
pub fn has_any_valid_move(board: &Board, color: Color, en_passant: Option<Square>) -> bool {
    let mut scratch = board.clone();
    for sq in board.squares() {
        if !board.piece(sq).is_some_and(|p| p.color == color) {
            continue;
        }
        if pseudo_legal_moves(board, sq, en_passant)
            .iter()
            .any(|mv| leaves_king_safe(&mut scratch, mv, color))
        {
            return true;
        }
    }
    false
}

/// Whether `color`'s king is currently attacked.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opponent()),
        None => false,
    }
}

/// Whether any piece of `by` attacks `target`.
///
/// Attack semantics differ from move semantics for pawns on purpose: a pawn
/// threatens both forward diagonals whether or not anything stands there.
/// That governs check detection; capture legality additionally requires an
/// enemy piece (or the en-passant target) on the diagonal.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    for sq in board.squares() {
        let Some(piece) = board.piece(sq) else {
            continue;
        };
        if piece.color != by {
            continue;
        }
        let attacks = match piece.kind {
            PieceKind::Pawn => {
                let dir = pawn_direction(by);
                sq.offset(dir, -1) == Some(target) || sq.offset(dir, 1) == Some(target)
            }
            PieceKind::Knight => KNIGHT_OFFSETS
                .iter()
                .any(|&(dr, dc)| sq.offset(dr, dc) == Some(target)),
            PieceKind::King => KING_OFFSETS
                .iter()
                .any(|&(dr, dc)| sq.offset(dr, dc) == Some(target)),
            PieceKind::Rook => ray_hits(board, sq, target, &ROOK_DIRS),
            PieceKind::Bishop => ray_hits(board, sq, target, &BISHOP_DIRS),
            PieceKind::Queen => ray_hits(board, sq, target, &QUEEN_DIRS),
        };
        if attacks {
            return true;
        }
    }
    false
}

/// Whether a slider at `from` reaches `target` along one of `dirs` with no
/// piece in between.
fn ray_hits(board: &Board, from: Square, target: Square, dirs: &[(i8, i8)]) -> bool {
    for &(dr, dc) in dirs {
        let mut sq = from;
        while let Some(next) = sq.offset(dr, dc) {
            if next == target {
                return true;
            }
            if board.piece(next).is_some() {
                break;
            }
            sq = next;
        }
    }
    false
}

/// Moves obeying the piece's movement shape, before the own-king safety
/// filter.
pub fn pseudo_legal_moves(board: &Board, from: Square, en_passant: Option<Square>) -> Vec<Move> {
    let Some(piece) = board.piece(from) else {
        return Vec::new();
    };
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, en_passant, &mut moves),
        PieceKind::Knight => offset_moves(board, from, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slider_moves(board, from, piece.color, &BISHOP_DIRS, &mut moves),
        PieceKind::Rook => slider_moves(board, from, piece.color, &ROOK_DIRS, &mut moves),
        PieceKind::Queen => slider_moves(board, from, piece.color, &QUEEN_DIRS, &mut moves),
        PieceKind::King => {
            offset_moves(board, from, piece.color, &KING_OFFSETS, &mut moves);
            castling_moves(board, from, piece, &mut moves);
        }
    }
    moves
}

fn pawn_moves(
    board: &Board,
    from: Square,
    color: Color,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let dir = pawn_direction(color);
    let promote_on = promotion_row(color);

    // Forward steps need an empty destination.
    if let Some(one) = from.offset(dir, 0) {
        if board.piece(one).is_none() {
            let mut mv = Move::quiet(from, one);
            mv.promotion = one.row == promote_on;
            moves.push(mv);

            if from.row == pawn_start_row(color) {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece(two).is_none() {
                        let mut mv = Move::quiet(from, two);
                        mv.double_step = true;
                        moves.push(mv);
                    }
                }
            }
        }
    }

    // Diagonal captures, including en passant.
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        if board.piece(to).is_some_and(|p| p.color != color) {
            let mut mv = Move::quiet(from, to);
            mv.capture = true;
            mv.promotion = to.row == promote_on;
            moves.push(mv);
        } else if en_passant == Some(to) {
            let mut mv = Move::quiet(from, to);
            mv.capture = true;
            mv.en_passant = true;
            moves.push(mv);
        }
    }
}

fn offset_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board.piece(to) {
            Some(p) if p.color == color => {}
            occupant => {
                let mut mv = Move::quiet(from, to);
                mv.capture = occupant.is_some();
                moves.push(mv);
            }
        }
    }
}

fn slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in dirs {
        let mut sq = from;
        while let Some(to) = sq.offset(dr, dc) {
            match board.piece(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(p) => {
                    if p.color != color {
                        let mut mv = Move::quiet(from, to);
                        mv.capture = true;
                        moves.push(mv);
                    }
                    break;
                }
            }
            sq = to;
        }
    }
}

fn castling_moves(board: &Board, from: Square, king: Piece, moves: &mut Vec<Move>) {
    if king.has_moved {
        return;
    }
    let enemy = king.color.opponent();
    // A king in check may not castle out of it.
    if is_square_attacked(board, from, enemy) {
        return;
    }

    for side in [CastlingSide::Kingside, CastlingSide::Queenside] {
        let (rook_col, between, crossed) = match side {
            CastlingSide::Kingside => (7u8, &[5u8, 6][..], &[5u8, 6][..]),
            CastlingSide::Queenside => (0u8, &[1u8, 2, 3][..], &[2u8, 3][..]),
        };

        let rook_sq = Square {
            row: from.row,
            col: rook_col,
        };
        let rook_ok = board
            .piece(rook_sq)
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == king.color && !p.has_moved);
        if !rook_ok {
            continue;
        }

        let clear = between.iter().all(|&col| {
            board
                .piece(Square {
                    row: from.row,
                    col,
                })
                .is_none()
        });
        if !clear {
            continue;
        }

        // Every square the king crosses, destination inclusive, must be safe.
        let safe = crossed.iter().all(|&col| {
            !is_square_attacked(
                board,
                Square {
                    row: from.row,
                    col,
                },
                enemy,
            )
        });
        if !safe {
            continue;
        }

        let to_col = match side {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        };
        let mut mv = Move::quiet(
            from,
            Square {
                row: from.row,
                col: to_col,
            },
        );
        mv.castling = Some(side);
        moves.push(mv);
    }
}

/// Undo record for a speculatively applied move. Captures exactly the cells
/// a move touches so the scratch board can be restored without a full copy.
pub(crate) struct BoardUndo {
    moved: Piece,
    displaced: Option<Piece>,
    en_passant_captured: Option<(Square, Piece)>,
    rook: Option<(Square, Square, Piece)>,
}

/// Applies `mv`'s board side effects, including en-passant removal and the
/// castling rook relocation. Promotion is ignored here: the replacement kind
/// never changes whether the mover's own king ends up attacked.
pub(crate) fn apply_to_board(board: &mut Board, mv: &Move) -> Option<BoardUndo> {
    let moved = board.take(mv.from)?;
    let displaced = board.take(mv.to);
    let mut piece = moved;
    piece.has_moved = true;
    board.set(mv.to, Some(piece));

    let en_passant_captured = if mv.en_passant {
        let cap_sq = Square {
            row: mv.from.row,
            col: mv.to.col,
        };
        board.take(cap_sq).map(|p| (cap_sq, p))
    } else {
        None
    };

    let rook = mv.castling.map(|side| {
        let (rook_from_col, rook_to_col) = match side {
            CastlingSide::Kingside => (7, 5),
            CastlingSide::Queenside => (0, 3),
        };
        let rook_from = Square {
            row: mv.from.row,
            col: rook_from_col,
        };
        let rook_to = Square {
            row: mv.from.row,
            col: rook_to_col,
        };
        let rook_piece = board.take(rook_from);
        if let Some(mut r) = rook_piece {
            let snapshot = r;
            r.has_moved = true;
            board.set(rook_to, Some(r));
            (rook_from, rook_to, snapshot)
        } else {
            // Unreachable for engine-produced moves; keep the record benign.
            (rook_from, rook_to, Piece::new(PieceKind::Rook, piece.color))
        }
    });

    Some(BoardUndo {
        moved,
        displaced,
        en_passant_captured,
        rook,
    })
}

pub(crate) fn revert_board(board: &mut Board, mv: &Move, undo: BoardUndo) {
    board.set(mv.to, undo.displaced);
    board.set(mv.from, Some(undo.moved));
    if let Some((sq, pawn)) = undo.en_passant_captured {
        board.set(sq, Some(pawn));
    }
    if let Some((rook_from, rook_to, rook)) = undo.rook {
        board.take(rook_to);
        board.set(rook_from, Some(rook));
    }
}

/// Speculatively applies `mv` on `scratch`, checks the mover's king, and
/// restores the board regardless of outcome.
fn leaves_king_safe(scratch: &mut Board, mv: &Move, mover: Color) -> bool {
    let Some(undo) = apply_to_board(scratch, mv) else {
        return false;
    };
    let safe = !in_check(scratch, mover);
    revert_board(scratch, mv, undo);
    safe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let board = Board::initial();
        let moves = all_valid_moves(&board, Color::White, None);
        assert_eq!(moves.len(), 20);
        assert_eq!(all_valid_moves(&board, Color::Black, None).len(), 20);
        assert!(has_any_valid_move(&board, Color::White, None));
        assert!(has_any_valid_move(&board, Color::Black, None));
    }

    #[test]
    fn e_pawn_has_two_initial_moves() {
        let board = Board::initial();
        let moves = valid_moves(&board, sq(6, 4), None);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to == sq(5, 4) && !m.double_step));
        assert!(moves.iter().any(|m| m.to == sq(4, 4) && m.double_step));
    }

    #[test]
    fn pawn_attacks_regardless_of_occupancy() {
        // Lone white pawn on e4: both diagonals are attacked even though
        // they are empty, but the pawn has no capture moves there.
        let mut board = Board::empty();
        board.set(sq(4, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert!(is_square_attacked(&board, sq(3, 3), Color::White));
        assert!(is_square_attacked(&board, sq(3, 5), Color::White));
        assert!(!is_square_attacked(&board, sq(3, 4), Color::White));

        let moves = pseudo_legal_moves(&board, sq(4, 4), None);
        assert!(moves.iter().all(|m| !m.capture));
    }

    #[test]
    fn slider_blocked_by_own_piece() {
        let board = Board::initial();
        // Rooks, bishops and the queen are all boxed in at the start.
        assert!(valid_moves(&board, sq(7, 0), None).is_empty());
        assert!(valid_moves(&board, sq(7, 2), None).is_empty());
        assert!(valid_moves(&board, sq(7, 3), None).is_empty());
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // White king e1, white rook e2, black rook e8: the white rook is
        // pinned to the file and may only slide along it.
        let mut board = Board::empty();
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(6, 4), Some(Piece::new(PieceKind::Rook, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.set(sq(0, 0), Some(Piece::new(PieceKind::King, Color::Black)));

        let moves = valid_moves(&board, sq(6, 4), None);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.to.col == 4));
    }

    #[test]
    fn castling_requires_clear_and_safe_path() {
        // White king e1 and rook h1 with nothing between them.
        let mut board = Board::empty();
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(7, 7), Some(Piece::new(PieceKind::Rook, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::King, Color::Black)));

        let has_castle = |board: &Board| {
            valid_moves(board, sq(7, 4), None)
                .iter()
                .any(|m| m.castling == Some(CastlingSide::Kingside))
        };
        assert!(has_castle(&board));

        // A black rook eyeing f1 covers a square the king crosses.
        board.set(sq(0, 5), Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert!(!has_castle(&board));
        board.set(sq(0, 5), None);

        // A moved rook forfeits the right.
        let mut moved_rook = Piece::new(PieceKind::Rook, Color::White);
        moved_rook.has_moved = true;
        board.set(sq(7, 7), Some(moved_rook));
        assert!(!has_castle(&board));
    }

    #[test]
    fn castling_blocked_while_in_check() {
        let mut board = Board::empty();
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(7, 7), Some(Piece::new(PieceKind::Rook, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::Rook, Color::Black)));
        board.set(sq(0, 0), Some(Piece::new(PieceKind::King, Color::Black)));

        assert!(in_check(&board, Color::White));
        assert!(valid_moves(&board, sq(7, 4), None)
            .iter()
            .all(|m| m.castling.is_none()));
    }

    #[test]
    fn legality_filter_never_leaves_king_attacked() {
        let board = Board::initial();
        let mut scratch = board.clone();
        for mv in all_valid_moves(&board, Color::White, None) {
            let undo = apply_to_board(&mut scratch, &mv).unwrap();
            assert!(!in_check(&scratch, Color::White), "move {mv:?} leaves king in check");
            revert_board(&mut scratch, &mv, undo);
        }
        // The scratch board is fully restored afterward.
        assert_eq!(scratch, board);
    }

    #[test]
    fn en_passant_only_on_target_square() {
        // White pawn e5, black pawn just double-stepped d7-d5.
        let mut board = Board::empty();
        board.set(sq(3, 4), Some(Piece::new(PieceKind::Pawn, Color::White)));
        board.set(sq(3, 3), Some(Piece::new(PieceKind::Pawn, Color::Black)));
        board.set(sq(7, 4), Some(Piece::new(PieceKind::King, Color::White)));
        board.set(sq(0, 4), Some(Piece::new(PieceKind::King, Color::Black)));

        let ep = Some(sq(2, 3));
        let moves = valid_moves(&board, sq(3, 4), ep);
        let ep_move = moves.iter().find(|m| m.en_passant);
        assert!(ep_move.is_some());
        assert_eq!(ep_move.unwrap().to, sq(2, 3));

        // Without the one-ply window the capture is gone.
        let moves = valid_moves(&board, sq(3, 4), None);
        assert!(moves.iter().all(|m| !m.en_passant));
    }
}

use chess_core::{rules, Color, GameState, PieceKind, Square};

// Material values in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 10000;

/// Bonus per piece standing on one of the four center squares.
const CENTER_BONUS: i32 = 20;
/// Bonus for having the opposing king in check (and penalty for our own).
const CHECK_BONUS: i32 = 50;

// Piece-square tables define bonuses/penalties for piece positions.
// Positive values are good positions, negative values are bad.
// Tables are laid out from Black's edge down (row 0 = eighth rank), which
// matches the board orientation for White; Black reads them flipped.

// Pawn table: push toward promotion, hold the center, avoid backwardness.
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

// Knights belong in the center; the rim is penalized.
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

// Bishops want long diagonals and central posts.
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

// Rooks: seventh rank and central files.
const ROOK_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

// Queen: mild center preference, stay home early.
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

// King: stay tucked behind the pawn shield; the middle of the board is a
// liability until the endgame.
const KING_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

/// Base material value of a piece.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Positional bonus for a piece on `sq`; the table is mirrored vertically
/// for Black so both colors read it from their own side.
fn position_bonus(kind: PieceKind, sq: Square, color: Color) -> i32 {
    let row = match color {
        Color::White => sq.row as usize,
        Color::Black => 7 - sq.row as usize,
    };
    let col = sq.col as usize;
    match kind {
        PieceKind::Pawn => PAWN_TABLE[row][col],
        PieceKind::Knight => KNIGHT_TABLE[row][col],
        PieceKind::Bishop => BISHOP_TABLE[row][col],
        PieceKind::Rook => ROOK_TABLE[row][col],
        PieceKind::Queen => QUEEN_TABLE[row][col],
        PieceKind::King => KING_TABLE[row][col],
    }
}

fn is_center(sq: Square) -> bool {
    (3..=4).contains(&sq.row) && (3..=4).contains(&sq.col)
}

/// Static evaluation relative to `perspective`: positive scores favor it.
///
/// Sums material plus piece-square bonus over all pieces, rewards center
/// occupation, and folds in the current check state of both kings.
pub fn evaluate(state: &GameState, perspective: Color) -> i32 {
    let board = state.board();
    let mut score = 0;

    for sq in board.squares() {
        let Some(piece) = board.piece(sq) else {
            continue;
        };
        let mut value = piece_value(piece.kind) + position_bonus(piece.kind, sq, piece.color);
        if is_center(sq) {
            value += CENTER_BONUS;
        }
        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }

    if rules::in_check(board, perspective.opponent()) {
        score += CHECK_BONUS;
    }
    if rules::in_check(board, perspective) {
        score -= CHECK_BONUS;
    }

    score
}

use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Fixed 8x8 grid of optional pieces. Cloning a `Board` yields a structurally
/// independent deep copy (pieces are `Copy`), which the legality filter and
/// the search agent rely on when working with scratch positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    /// The standard 32-piece starting layout.
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (col, &kind) in back_rank.iter().enumerate() {
            board.grid[0][col] = Some(Piece::new(kind, Color::Black));
            board.grid[7][col] = Some(Piece::new(kind, Color::White));
        }
        for col in 0..8 {
            board.grid[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.grid[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
        }

        board
    }

    pub fn piece(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize]
    }

    /// Bounds-checked access; out-of-range coordinates yield `None`.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            self.grid[row as usize][col as usize]
        } else {
            None
        }
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.row as usize][sq.col as usize] = piece;
    }

    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize].take()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares()
            .find(|&sq| {
                self.piece(sq)
                    .is_some_and(|p| p.kind == PieceKind::King && p.color == color)
            })
    }

    /// Iterator over all 64 squares, row-major from a8.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

//! The authoritative game state: board, turn, history, and terminal status.
//!
//! `GameState` is a plain value. It is created at the standard starting
//! position and mutated only through `make_move` / `undo_move`; the search
//! agent drives a clone of it and never touches the caller's instance.

use log::{debug, trace};
use thiserror::Error;

use crate::board::Board;
use crate::moves::{CastlingSide, Move};
use crate::piece::{Color, Piece, PieceKind};
use crate::rules;
use crate::square::Square;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on the source square")]
    NoPiece,
    #[error("piece belongs to the side not on move")]
    NotYourTurn,
    #[error("move is not in the legal-move set")]
    IllegalMove,
    #[error("promotion move submitted without a promotion choice")]
    MissingPromotion,
    #[error("no moves to undo")]
    EmptyHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// One history entry, carrying everything `undo_move` needs to reverse the
/// move exactly: pre-move piece snapshots, special-move markers, and the
/// en-passant target that was live before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The moving piece as it stood before the move (original kind for
    /// promotions, original `has_moved`).
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub castling: Option<CastlingSide>,
    pub en_passant: bool,
    pub promotion: Option<PieceKind>,
    pub prior_en_passant: Option<Square>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
    history: Vec<MoveRecord>,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
    status: GameStatus,
    winner: Option<Color>,
    in_check: bool,
}

impl GameState {
    /// The standard starting position, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            turn: Color::White,
            en_passant: None,
            history: Vec::new(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            status: GameStatus::Ongoing,
            winner: None,
            in_check: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    /// The winning color, or `None` for a draw or an unfinished game.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Pieces of `color` that have been captured, in capture order.
    pub fn captured(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_white,
            Color::Black => &self.captured_black,
        }
    }

    /// Bounds-checked board access; out-of-range coordinates yield `None`.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        self.board.piece_at(row, col)
    }

    /// Legal moves for the piece at `sq`. Empty when the square is vacant or
    /// holds a piece of the side not on move.
    pub fn valid_moves(&self, sq: Square) -> Vec<Move> {
        match self.board.piece(sq) {
            Some(piece) if piece.color == self.turn => {
                rules::valid_moves(&self.board, sq, self.en_passant)
            }
            _ => Vec::new(),
        }
    }

    /// Legal moves for every piece of `color`, regardless of whose turn it
    /// is. Terminal detection and the search agent both run on this.
    pub fn all_valid_moves(&self, color: Color) -> Vec<Move> {
        rules::all_valid_moves(&self.board, color, self.en_passant)
    }

    /// Executes a move. Fails without mutating anything unless the
    /// `from`/`to` pair matches a move in the current legal-move set for
    /// `from`; externally sourced or stale moves fall out here.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), MoveError> {
        let piece = self.board.piece(from).ok_or(MoveError::NoPiece)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        let mv = rules::valid_moves(&self.board, from, self.en_passant)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or(MoveError::IllegalMove)?;
        if mv.promotion && promotion.is_none() {
            return Err(MoveError::MissingPromotion);
        }

        // Capture resolution; en passant removes a pawn from a square other
        // than the destination.
        let captured = if mv.en_passant {
            self.board.take(Square {
                row: from.row,
                col: to.col,
            })
        } else {
            self.board.take(to)
        };
        if let Some(victim) = captured {
            match victim.color {
                Color::White => self.captured_white.push(victim),
                Color::Black => self.captured_black.push(victim),
            }
        }

        self.board.take(from);
        let placed = if mv.promotion {
            Piece {
                kind: promotion.unwrap_or(PieceKind::Queen),
                color: piece.color,
                has_moved: true,
            }
        } else {
            Piece {
                has_moved: true,
                ..piece
            }
        };
        self.board.set(to, Some(placed));

        if let Some(side) = mv.castling {
            self.relocate_castling_rook(from.row, side, true);
        }

        let prior_en_passant = self.en_passant;
        self.en_passant = if mv.double_step {
            Square::new((from.row + to.row) / 2, from.col)
        } else {
            None
        };

        self.history.push(MoveRecord {
            from,
            to,
            moved: piece,
            captured,
            castling: mv.castling,
            en_passant: mv.en_passant,
            promotion: if mv.promotion { promotion } else { None },
            prior_en_passant,
        });

        self.turn = self.turn.opponent();
        self.refresh_status();
        trace!(
            "{} played {}{}, {} to move",
            piece.color,
            from,
            to,
            self.turn
        );
        Ok(())
    }

    /// Reverses the last move exactly: board, turn, en-passant target,
    /// captured lists, and `has_moved` flags all return to their pre-move
    /// values.
    pub fn undo_move(&mut self) -> Result<(), MoveError> {
        let record = self.history.pop().ok_or(MoveError::EmptyHistory)?;

        self.board.take(record.to);
        self.board.set(record.from, Some(record.moved));

        if let Some(victim) = record.captured {
            let victim_sq = if record.en_passant {
                Square {
                    row: record.from.row,
                    col: record.to.col,
                }
            } else {
                record.to
            };
            self.board.set(victim_sq, Some(victim));
            let _ = match victim.color {
                Color::White => self.captured_white.pop(),
                Color::Black => self.captured_black.pop(),
            };
        }

        if let Some(side) = record.castling {
            self.relocate_castling_rook(record.from.row, side, false);
        }

        self.en_passant = record.prior_en_passant;
        self.turn = record.moved.color;
        self.status = GameStatus::Ongoing;
        self.winner = None;
        self.in_check = rules::in_check(&self.board, self.turn);
        Ok(())
    }

    /// Moves the castling rook between its corner and its castled square.
    /// Castling requires an unmoved rook, so undoing clears `has_moved`.
    fn relocate_castling_rook(&mut self, row: u8, side: CastlingSide, forward: bool) {
        let (corner_col, castled_col) = match side {
            CastlingSide::Kingside => (7, 5),
            CastlingSide::Queenside => (0, 3),
        };
        let (from_col, to_col) = if forward {
            (corner_col, castled_col)
        } else {
            (castled_col, corner_col)
        };
        if let Some(mut rook) = self.board.take(Square { row, col: from_col }) {
            rook.has_moved = forward;
            self.board.set(Square { row, col: to_col }, Some(rook));
        }
    }

    /// Recomputes check and terminal state for the side now on move: no
    /// legal moves ends the game, checkmate if in check, stalemate otherwise.
    fn refresh_status(&mut self) {
        self.in_check = rules::in_check(&self.board, self.turn);
        if !rules::has_any_valid_move(&self.board, self.turn, self.en_passant) {
            if self.in_check {
                self.status = GameStatus::Checkmate;
                self.winner = Some(self.turn.opponent());
                debug!("checkmate, {} wins", self.turn.opponent());
            } else {
                self.status = GameStatus::Stalemate;
                self.winner = None;
                debug!("stalemate");
            }
        } else {
            self.status = GameStatus::Ongoing;
            self.winner = None;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

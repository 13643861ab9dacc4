use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Single undo record pushed by `make_move` and popped by `undo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoEntry {
    pub mv: Move,
    /// Piece that left the source square (a pawn for promotions).
    pub moved: Piece,
    /// Piece removed by the move and the square it stood on.
    pub captured: Option<(Piece, Square)>,
    /// Rook relocation `(from, to)` performed by castling.
    pub castling_rook: Option<(Square, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_in_check: bool,
    pub prev_position_key: u64,

    /// Pawn move, capture, castling, or loss of a castling right.
    pub irreversible: bool,
}

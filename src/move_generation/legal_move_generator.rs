//! Pseudo-legal and legal move generation.
//!
//! Per-piece generators are selected through a table indexed by piece kind.
//! `PseudoLegalMoves` walks the board lazily, a friendly piece at a time, so a
//! caller that stops early never pays for the remaining pieces. Legality is
//! decided afterwards by applying the move and asking `Board::is_legal`.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

pub type PieceMoveFn = fn(&Board, Square, &mut Vec<Move>);

pub const fn generator_for(kind: PieceKind) -> PieceMoveFn {
    match kind {
        PieceKind::Pawn => generate_pawn_moves,
        PieceKind::Knight => generate_knight_moves,
        PieceKind::Bishop => generate_bishop_moves,
        PieceKind::Rook => generate_rook_moves,
        PieceKind::Queen => generate_queen_moves,
        PieceKind::King => generate_king_moves,
    }
}

/// Indexed by `PieceKind::index()`.
pub const PIECE_MOVE_TABLE: [PieceMoveFn; 6] = [
    generator_for(ALL_PIECE_KINDS[0]),
    generator_for(ALL_PIECE_KINDS[1]),
    generator_for(ALL_PIECE_KINDS[2]),
    generator_for(ALL_PIECE_KINDS[3]),
    generator_for(ALL_PIECE_KINDS[4]),
    generator_for(ALL_PIECE_KINDS[5]),
];

/// Pseudo-legal moves of one piece, appended to `out`.
#[inline]
pub fn generate_piece_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    if let Some(piece) = board.piece_at(from) {
        PIECE_MOVE_TABLE[piece.kind.index()](board, from, out);
    }
}

/// Lazy iterator over the side to move's pseudo-legal moves, in square order.
#[derive(Clone)]
pub struct PseudoLegalMoves<'a> {
    board: &'a Board,
    next_square: usize,
    buffer: Vec<Move>,
    cursor: usize,
}

impl<'a> PseudoLegalMoves<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            next_square: 0,
            buffer: Vec::with_capacity(32),
            cursor: 0,
        }
    }

    fn refill(&mut self) -> bool {
        self.buffer.clear();
        self.cursor = 0;
        let side = self.board.side_to_move();
        while self.next_square < 64 {
            let from = self.next_square as Square;
            self.next_square += 1;
            if matches!(self.board.piece_at(from), Some(p) if p.color == side) {
                generate_piece_moves(self.board, from, &mut self.buffer);
                if !self.buffer.is_empty() {
                    return true;
                }
            }
        }
        false
    }
}

impl Iterator for PseudoLegalMoves<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.cursor >= self.buffer.len() && !self.refill() {
            return None;
        }
        let mv = self.buffer[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}

impl Board {
    #[inline]
    pub fn pseudo_legal_moves(&self) -> PseudoLegalMoves<'_> {
        PseudoLegalMoves::new(self)
    }
}

/// Legal moves of the side to move, in generation order.
pub fn legal_moves(board: &mut Board) -> ChessResult<Vec<Move>> {
    let pseudo: Vec<Move> = board.pseudo_legal_moves().collect();
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        board.make_move(mv)?;
        let keep = board.is_legal();
        board.undo()?;
        if keep {
            legal.push(mv);
        }
    }
    Ok(legal)
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_move(board: &mut Board) -> ChessResult<bool> {
    let pseudo: Vec<Move> = board.pseudo_legal_moves().collect();
    for mv in pseudo {
        board.make_move(mv)?;
        let legal = board.is_legal();
        board.undo()?;
        if legal {
            return Ok(true);
        }
    }
    Ok(false)
}

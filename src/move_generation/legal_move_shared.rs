use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::tables::attack_tables::{bitboard_squares, Ray};

/// Quiet move or capture from `from` to `to`, or nothing if `to` holds a friendly piece.
#[inline]
pub fn target_move(board: &Board, side: Color, from: Square, to: Square) -> Option<Move> {
    match board.piece_at(to) {
        None => Some(Move::quiet(from, to)),
        Some(victim) if victim.color != side => Some(Move::capture(from, to, victim.kind)),
        Some(_) => None,
    }
}

/// Moves to every square in a leaper target set.
pub fn push_target_moves(board: &Board, side: Color, from: Square, targets: u64, out: &mut Vec<Move>) {
    out.extend(bitboard_squares(targets).filter_map(|to| target_move(board, side, from, to)));
}

/// Walk each ray until the first occupied square, capturing it if it is an enemy piece.
pub fn push_ray_moves(board: &Board, side: Color, from: Square, rays: &[Ray; 4], out: &mut Vec<Move>) {
    for ray in rays {
        for &to in ray.squares() {
            match board.piece_at(to) {
                None => out.push(Move::quiet(from, to)),
                Some(victim) => {
                    if victim.color != side {
                        out.push(Move::capture(from, to, victim.kind));
                    }
                    break;
                }
            }
        }
    }
}

#[inline]
pub fn side_on(board: &Board, square: Square) -> Option<Color> {
    board.piece_at(square).map(|p| p.color)
}

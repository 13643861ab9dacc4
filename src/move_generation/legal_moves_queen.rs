use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_ray_moves, side_on};
use crate::moves::chess_move::Move;

/// Queen moves are the union of the bishop and rook rays.
pub fn generate_queen_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(side) = side_on(board, from) else {
        return;
    };
    let attacks = &board.tables().attacks;
    push_ray_moves(board, side, from, attacks.bishop_rays(from), out);
    push_ray_moves(board, side, from, attacks.rook_rays(from), out);
}

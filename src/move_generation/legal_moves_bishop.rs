use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_ray_moves, side_on};
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(side) = side_on(board, from) else {
        return;
    };
    push_ray_moves(board, side, from, board.tables().attacks.bishop_rays(from), out);
}

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_target_moves, side_on};
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(side) = side_on(board, from) else {
        return;
    };
    let targets = board.tables().attacks.knight_targets(from);
    push_target_moves(board, side, from, targets, out);
}

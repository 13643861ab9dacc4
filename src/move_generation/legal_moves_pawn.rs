//! Pawn pushes, captures, en passant and promotions.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{pawn_home_rank, promotion_rank};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::side_on;
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(side) = side_on(board, from) else {
        return;
    };
    let forward = side.forward();
    let Some(one_step) = offset_square(from, 0, forward) else {
        return;
    };
    let promotes = rank_of(one_step) == promotion_rank(side);

    if board.piece_at(one_step).is_none() {
        push_pawn_move(Move::quiet(from, one_step), promotes, out);

        if rank_of(from) == pawn_home_rank(side) {
            if let Some(two_step) = offset_square(from, 0, 2 * forward) {
                if board.piece_at(two_step).is_none() {
                    out.push(Move::double_push(from, two_step, one_step));
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let Some(to) = offset_square(from, file_delta, forward) else {
            continue;
        };
        match board.piece_at(to) {
            Some(victim) if victim.color != side => {
                push_pawn_move(Move::capture(from, to, victim.kind), promotes, out);
            }
            None if board.en_passant() == Some(to) => {
                out.push(Move::capture(from, to, PieceKind::Pawn));
            }
            _ => {}
        }
    }
}

#[inline]
fn push_pawn_move(mv: Move, promotes: bool, out: &mut Vec<Move>) {
    if promotes {
        out.extend(PROMOTION_KINDS.iter().map(|kind| mv.with_promotion(*kind)));
    } else {
        out.push(mv);
    }
}

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castling_rights_of, CASTLING_SIDES};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_target_moves, side_on};
use crate::moves::chess_move::Move;

pub fn generate_king_moves(board: &Board, from: Square, out: &mut Vec<Move>) {
    let Some(side) = side_on(board, from) else {
        return;
    };
    push_target_moves(board, side, from, board.tables().attacks.king_targets(from), out);
    generate_castling_moves(board, side, from, out);
}

/// Castling requires the right, the home rook, empty squares between, and a
/// king that is neither in check nor passing an attacked square. Whether the
/// destination is attacked is left to the legality filter.
fn generate_castling_moves(board: &Board, side: Color, king_from: Square, out: &mut Vec<Move>) {
    if board.castling_rights() & castling_rights_of(side) == 0 {
        return;
    }

    let enemy = side.opposite();
    // Cannot castle out of check.
    if board.is_attacked(enemy, king_from) {
        return;
    }

    let rook = Piece::new(side, PieceKind::Rook);
    for castling in CASTLING_SIDES
        .iter()
        .filter(|c| c.color == side && c.king_from == king_from)
    {
        if board.castling_rights() & castling.right == 0
            || board.piece_at(castling.rook_from) != Some(rook)
            || castling.empty.iter().any(|sq| board.piece_at(*sq).is_some())
            || board.is_attacked(enemy, castling.transit)
        {
            continue;
        }
        out.push(Move::quiet(king_from, castling.king_to));
    }
}

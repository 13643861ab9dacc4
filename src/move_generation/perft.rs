//! Move-path enumeration for validating the generator.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::moves::chess_move::Move;

/// Number of legal move sequences of length `depth` from `board`.
pub fn perft(board: &mut Board, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let pseudo: Vec<Move> = board.pseudo_legal_moves().collect();
    let mut nodes = 0u64;
    for mv in pseudo {
        board.make_move(mv)?;
        if board.is_legal() {
            let child = if depth == 1 { Ok(1) } else { perft(board, depth - 1) };
            board.undo()?;
            nodes += child?;
        } else {
            board.undo()?;
        }
    }
    Ok(nodes)
}

/// Per-root-move breakdown of `perft(depth)`, in generation order.
pub fn divide(board: &mut Board, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let pseudo: Vec<Move> = board.pseudo_legal_moves().collect();
    let mut out = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        board.make_move(mv)?;
        if board.is_legal() {
            let child = perft(board, depth - 1);
            board.undo()?;
            out.push((mv, child?));
        } else {
            board.undo()?;
        }
    }
    Ok(out)
}

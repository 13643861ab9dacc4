//! Long algebraic (UCI) move notation, e.g. `e2e4` or `e7e8q`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Build the move `notation` describes on `board`, filling in the captured
/// piece, en-passant data and promotion from the position. Legality is not
/// checked beyond the shape of the move.
pub fn parse_long_algebraic(notation: &str, board: &Board) -> ChessResult<Move> {
    if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
        return Err(ChessError::malformed_move(
            notation,
            "expected 4 or 5 ASCII characters",
        ));
    }

    let src = algebraic_to_square(&notation[0..2])
        .ok_or_else(|| ChessError::malformed_move(notation, "invalid source square"))?;
    let dst = algebraic_to_square(&notation[2..4])
        .ok_or_else(|| ChessError::malformed_move(notation, "invalid destination square"))?;
    if src == dst {
        return Err(ChessError::malformed_move(notation, "source equals destination"));
    }

    let side = board.side_to_move();
    let moved = board
        .piece_at(src)
        .ok_or_else(|| ChessError::malformed_move(notation, "source square is empty"))?;
    if moved.color != side {
        return Err(ChessError::malformed_move(
            notation,
            "source piece does not belong to the side to move",
        ));
    }

    let mut mv = match board.piece_at(dst) {
        Some(victim) if victim.color == side => {
            return Err(ChessError::malformed_move(
                notation,
                "destination holds a friendly piece",
            ))
        }
        Some(victim) => Move::capture(src, dst, victim.kind),
        None if moved.kind == PieceKind::Pawn
            && board.en_passant() == Some(dst)
            && file_of(src) != file_of(dst) =>
        {
            Move::capture(src, dst, PieceKind::Pawn)
        }
        None if moved.kind == PieceKind::Pawn && rank_of(src).abs_diff(rank_of(dst)) == 2 => {
            let skipped = make_square(file_of(src), (rank_of(src) + rank_of(dst)) / 2);
            Move::double_push(src, dst, skipped)
        }
        None => Move::quiet(src, dst),
    };

    let reaches_last_rank =
        moved.kind == PieceKind::Pawn && rank_of(dst) == promotion_rank(side);
    match notation[4..].chars().next() {
        Some(ch) => {
            let kind = PieceKind::from_letter(ch.to_ascii_lowercase())
                .filter(|k| PROMOTION_KINDS.contains(k))
                .ok_or_else(|| ChessError::malformed_move(notation, "invalid promotion piece"))?;
            if !reaches_last_rank {
                return Err(ChessError::malformed_move(
                    notation,
                    "promotion is only possible for a pawn reaching the last rank",
                ));
            }
            mv = mv.with_promotion(kind);
        }
        None if reaches_last_rank => {
            return Err(ChessError::malformed_move(
                notation,
                "pawn reaching the last rank needs a promotion piece",
            ));
        }
        None => {}
    }

    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::parse_long_algebraic;
    use crate::errors::ChessError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn parses_quiet_double_push_and_capture() {
        let board = Board::new_game();
        let mv = parse_long_algebraic("e2e4", &board).expect("move should parse");
        assert_eq!((mv.src, mv.dst, mv.en_passant), (12, 28, Some(20)));
        assert_eq!(mv.to_string(), "e2e4");

        let board = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("d2d5", &board).expect("move should parse");
        assert_eq!(mv.captured, Some(PieceKind::Queen));
    }

    #[test]
    fn parses_en_passant_and_promotion() {
        let board = Board::from_fen("k7/8/8/pP6/8/8/8/K7 w - a6 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("b5a6", &board).expect("move should parse");
        assert_eq!(mv.captured, Some(PieceKind::Pawn));

        let board = Board::from_fen("k5n1/7P/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("h7g8n", &board).expect("move should parse");
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
        assert_eq!(mv.captured, Some(PieceKind::Knight));
        assert_eq!(mv.to_string(), "h7g8n");
    }

    #[test]
    fn rejects_malformed_moves() {
        let board = Board::from_fen("k5n1/7P/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        for bad in ["", "h7", "h7h8qq", "h7h9", "z7h8q", "h7h7q", "b2b3", "g8f6", "a1a1", "h7h8", "h7h8k", "a1b1q", "é7h8"] {
            assert!(
                matches!(parse_long_algebraic(bad, &board), Err(ChessError::MalformedMove { .. })),
                "accepted: {bad:?}"
            );
        }
    }
}

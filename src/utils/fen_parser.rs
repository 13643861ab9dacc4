//! FEN parser.
//!
//! Validates and decodes a six-field Forsyth-Edwards Notation string into the
//! raw fields a `Board` is built from. Nothing is constructed unless the whole
//! string is valid.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone)]
pub struct ParsedFen {
    pub squares: [Option<Piece>; 64],
    pub king_squares: [Square; 2],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

pub fn parse_fen(fen: &str) -> ChessResult<ParsedFen> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side to move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::malformed_position("FEN has extra trailing fields"));
    }

    let squares = parse_board(board_part)?;
    let king_squares = locate_kings(&squares)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant = parse_en_passant_square(en_passant_part, side_to_move, &squares)?;
    let halfmove_clock = halfmove_part.parse::<u16>().map_err(|_| {
        ChessError::malformed_position(format!("invalid halfmove clock: {halfmove_part}"))
    })?;
    let fullmove_number = fullmove_part.parse::<u16>().map_err(|_| {
        ChessError::malformed_position(format!("invalid fullmove number: {fullmove_part}"))
    })?;

    Ok(ParsedFen {
        squares,
        king_squares,
        side_to_move,
        castling_rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn missing(field: &str) -> ChessError {
    ChessError::malformed_position(format!("missing {field} in FEN"))
}

fn parse_board(board_part: &str) -> ChessResult<[Option<Piece>; 64]> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::malformed_position(
            "board layout must contain 8 ranks",
        ));
    }

    let mut squares = [None; 64];
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::malformed_position(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    break;
                }
                continue;
            }

            let piece = Piece::from_symbol(ch).ok_or_else(|| {
                ChessError::malformed_position(format!("invalid piece character '{ch}'"))
            })?;
            if file >= 8 {
                return Err(ChessError::malformed_position(format!(
                    "rank {} has too many files",
                    rank + 1
                )));
            }
            if piece.kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                return Err(ChessError::malformed_position(format!(
                    "pawn on back rank {}",
                    rank + 1
                )));
            }

            squares[make_square(file, rank) as usize] = Some(piece);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::malformed_position(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }

    Ok(squares)
}

fn locate_kings(squares: &[Option<Piece>; 64]) -> ChessResult<[Square; 2]> {
    let mut kings = [None::<Square>; 2];
    for (sq, piece) in squares.iter().enumerate() {
        let Some(piece) = piece else {
            continue;
        };
        if piece.kind != PieceKind::King {
            continue;
        }
        let slot = &mut kings[piece.color.index()];
        if slot.is_some() {
            return Err(ChessError::malformed_position(format!(
                "more than one {:?} king",
                piece.color
            )));
        }
        *slot = Some(sq as Square);
    }

    match kings {
        [Some(light), Some(dark)] => Ok([light, dark]),
        [None, _] => Err(ChessError::malformed_position("light king is missing")),
        [_, None] => Err(ChessError::malformed_position("dark king is missing")),
    }
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::malformed_position(format!(
            "invalid side-to-move field: {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => {
                return Err(ChessError::malformed_position(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        };
        if rights & right != 0 {
            return Err(ChessError::malformed_position(format!(
                "repeated castling right: {ch}"
            )));
        }
        rights |= right;
    }

    Ok(rights)
}

/// The target must be the empty square a just-double-pushed enemy pawn
/// skipped over, with that pawn directly behind it.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
    squares: &[Option<Piece>; 64],
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part).ok_or_else(|| {
        ChessError::malformed_position(format!("invalid en-passant square: {en_passant_part}"))
    })?;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(ChessError::malformed_position(format!(
            "en-passant square {en_passant_part} is on the wrong rank"
        )));
    }
    if squares[square as usize].is_some() {
        return Err(ChessError::malformed_position(format!(
            "en-passant square {en_passant_part} is occupied"
        )));
    }
    let pushed_pawn = Piece::new(side_to_move.opposite(), PieceKind::Pawn);
    let behind = offset_square(square, 0, -side_to_move.forward());
    if behind.and_then(|sq| squares[sq as usize]) != Some(pushed_pawn) {
        return Err(ChessError::malformed_position(format!(
            "no double-pushed pawn behind en-passant square {en_passant_part}"
        )));
    }
    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed.side_to_move, Color::Light);
        assert_eq!(parsed.castling_rights, CASTLE_ALL);
        assert_eq!(parsed.en_passant, None);
        assert_eq!(parsed.halfmove_clock, 0);
        assert_eq!(parsed.fullmove_number, 1);
        assert_eq!(parsed.king_squares, [4, 60]);
        assert_eq!(parsed.squares.iter().filter(|p| p.is_some()).count(), 32);
    }

    #[test]
    fn parse_en_passant_and_clocks() {
        let parsed = parse_fen("rnbqkbnr/pppp1ppp/8/8/4pP2/8/PPPPP1PP/RNBQKBNR b KQkq f3 0 3")
            .expect("FEN should parse");
        assert_eq!(parsed.en_passant, Some(21));
        assert_eq!(parsed.fullmove_number, 3);
    }

    #[test]
    fn rejects_malformed_input() {
        let bad = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppxpppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkX - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 x",
            "rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKKNR w kq - 0 1",
            "Pnbqkbnr/1ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ];
        for fen in bad {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::MalformedPosition(_))),
                "accepted: {fen:?}"
            );
        }
    }

    #[test]
    fn en_passant_target_needs_an_empty_square_and_the_pushed_pawn() {
        // d6 holds the pawn instead of being skipped by it.
        assert!(matches!(
            parse_fen("4k3/8/3p4/4P3/8/8/8/4K3 w - d6 0 1"),
            Err(ChessError::MalformedPosition(_))
        ));
        // Nothing on d5.
        assert!(matches!(
            parse_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"),
            Err(ChessError::MalformedPosition(_))
        ));
        // A white pawn on d5 cannot have just been pushed by black.
        assert!(matches!(
            parse_fen("4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1"),
            Err(ChessError::MalformedPosition(_))
        ));
        let parsed = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(parsed.en_passant, Some(43));
    }
}

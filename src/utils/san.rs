//! Standard algebraic notation (SAN) parsing, e.g. `Nf3`, `exd5`, `e8=Q`, `O-O`.
//!
//! SAN is resolved against the legal moves of the current position: exactly
//! one legal move has to match. Check, mate and annotation suffixes are ignored.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{algebraic_to_square, file_from_char, rank_from_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanPattern {
    Castle {
        kingside: bool,
    },
    Piece {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        dst: Square,
        promotion: Option<PieceKind>,
    },
}

impl SanPattern {
    fn parse(san: &str) -> Option<Self> {
        match san {
            "O-O" | "0-0" => return Some(SanPattern::Castle { kingside: true }),
            "O-O-O" | "0-0-0" => return Some(SanPattern::Castle { kingside: false }),
            _ => {}
        }
        if !san.is_ascii() || san.len() < 2 {
            return None;
        }

        let (kind, rest) = match san.chars().next()? {
            ch @ ('K' | 'Q' | 'R' | 'B' | 'N') => (PieceKind::from_letter(ch)?, &san[1..]),
            _ => (PieceKind::Pawn, san),
        };

        let (body, promotion) = match rest.split_once('=') {
            Some((body, promo)) => (body, Some(parse_promotion(promo)?)),
            None => match rest.chars().last() {
                Some(ch) if kind == PieceKind::Pawn && ch.is_ascii_uppercase() => {
                    (&rest[..rest.len() - 1], Some(parse_promotion(&rest[rest.len() - 1..])?))
                }
                _ => (rest, None),
            },
        };
        if promotion.is_some() && kind != PieceKind::Pawn {
            return None;
        }

        let body: String = body.chars().filter(|ch| *ch != 'x').collect();
        if body.len() < 2 || body.len() > 4 {
            return None;
        }
        let (disambiguation, dst) = body.split_at(body.len() - 2);
        let dst = algebraic_to_square(dst)?;

        let mut from_file = None;
        let mut from_rank = None;
        for ch in disambiguation.chars() {
            if let Some(file) = file_from_char(ch).filter(|_| from_file.is_none() && from_rank.is_none()) {
                from_file = Some(file);
            } else if let Some(rank) = rank_from_char(ch).filter(|_| from_rank.is_none()) {
                from_rank = Some(rank);
            } else {
                return None;
            }
        }

        Some(SanPattern::Piece {
            kind,
            from_file,
            from_rank,
            dst,
            promotion,
        })
    }

    fn matches(&self, board: &Board, mv: &Move) -> bool {
        let Some(moved) = board.piece_at(mv.src) else {
            return false;
        };
        match *self {
            SanPattern::Castle { kingside } => {
                moved.kind == PieceKind::King
                    && file_of(mv.src).abs_diff(file_of(mv.dst)) == 2
                    && (file_of(mv.dst) > file_of(mv.src)) == kingside
            }
            SanPattern::Piece {
                kind,
                from_file,
                from_rank,
                dst,
                promotion,
            } => {
                moved.kind == kind
                    && mv.dst == dst
                    && mv.promotion == promotion
                    && from_file.map_or(true, |f| file_of(mv.src) == f)
                    && from_rank.map_or(true, |r| rank_of(mv.src) == r)
                    // Castling is only spelled O-O / O-O-O.
                    && !(kind == PieceKind::King && file_of(mv.src).abs_diff(file_of(mv.dst)) == 2)
            }
        }
    }
}

fn parse_promotion(text: &str) -> Option<PieceKind> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    PieceKind::from_letter(ch).filter(|kind| PROMOTION_KINDS.contains(kind))
}

/// Resolve `san` to the unique legal move it names on `board`.
pub fn parse_san(san: &str, board: &mut Board) -> ChessResult<Move> {
    let trimmed = san
        .trim()
        .trim_end_matches(|ch| matches!(ch, '+' | '#' | '!' | '?'));
    let pattern =
        SanPattern::parse(trimmed).ok_or_else(|| ChessError::NoMatchingMove(san.to_owned()))?;

    let candidates: Vec<Move> = legal_moves(board)?
        .into_iter()
        .filter(|mv| pattern.matches(board, mv))
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessError::NoMatchingMove(san.to_owned())),
        _ => Err(ChessError::AmbiguousNotation {
            notation: san.to_owned(),
            candidates: candidates.len(),
        }),
    }
}

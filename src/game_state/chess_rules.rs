//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, the home squares that gate
//! castling rights, and the rook relocation performed by each castling move.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const LIGHT_KING_HOME: Square = 4;
pub const DARK_KING_HOME: Square = 60;

/// One castling option: the right that gates it and the squares it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSide {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty between king and rook.
    pub empty: &'static [Square],
    /// Square the king crosses; it must not be attacked.
    pub transit: Square,
}

pub static CASTLING_SIDES: [CastlingSide; 4] = [
    CastlingSide {
        right: CASTLE_LIGHT_KINGSIDE,
        color: Color::Light,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        empty: &[5, 6],
        transit: 5,
    },
    CastlingSide {
        right: CASTLE_LIGHT_QUEENSIDE,
        color: Color::Light,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        empty: &[1, 2, 3],
        transit: 3,
    },
    CastlingSide {
        right: CASTLE_DARK_KINGSIDE,
        color: Color::Dark,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        empty: &[61, 62],
        transit: 61,
    },
    CastlingSide {
        right: CASTLE_DARK_QUEENSIDE,
        color: Color::Dark,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        empty: &[57, 58, 59],
        transit: 59,
    },
];

/// Castling entry whose king lands on `king_to` coming from the home square.
pub fn castling_side_for_king_move(king_from: Square, king_to: Square) -> Option<&'static CastlingSide> {
    CASTLING_SIDES
        .iter()
        .find(|side| side.king_from == king_from && side.king_to == king_to)
}

/// Right lost when a rook of `color` leaves, or is captured on, `square`.
pub fn castling_right_for_rook_home(color: Color, square: Square) -> CastlingRights {
    CASTLING_SIDES
        .iter()
        .find(|side| side.color == color && side.rook_from == square)
        .map_or(0, |side| side.right)
}

/// Both rights of one color.
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

/// Rank pawns of `color` start on.
pub const fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

/// Rank pawns of `color` promote on.
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_home_squares_map_to_rights() {
        assert_eq!(castling_right_for_rook_home(Color::Light, 0), CASTLE_LIGHT_QUEENSIDE);
        assert_eq!(castling_right_for_rook_home(Color::Light, 7), CASTLE_LIGHT_KINGSIDE);
        assert_eq!(castling_right_for_rook_home(Color::Dark, 56), CASTLE_DARK_QUEENSIDE);
        assert_eq!(castling_right_for_rook_home(Color::Dark, 63), CASTLE_DARK_KINGSIDE);
        assert_eq!(castling_right_for_rook_home(Color::Dark, 7), 0);
    }

    #[test]
    fn king_two_file_moves_resolve_castling_side() {
        let side = castling_side_for_king_move(60, 58).expect("dark queenside exists");
        assert_eq!((side.rook_from, side.rook_to), (56, 59));
        assert!(castling_side_for_king_move(4, 5).is_none());
    }
}

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::tables::attack_tables::{bitboard_squares, Ray};

#[inline]
fn holds(board: &Board, square: Square, color: Color, kinds: &[PieceKind]) -> bool {
    matches!(board.piece_at(square), Some(p) if p.color == color && kinds.contains(&p.kind))
}

/// First piece met along each ray is the only one that can attack through it.
fn ray_attack(board: &Board, rays: &[Ray; 4], attacker_color: Color, kinds: &[PieceKind]) -> bool {
    for ray in rays {
        for &sq in ray.squares() {
            if board.piece_at(sq).is_some() {
                if holds(board, sq, attacker_color, kinds) {
                    return true;
                }
                break;
            }
        }
    }
    false
}

/// Whether any piece of `attacker_color` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let attacks = &board.tables().attacks;

    // An attacking pawn sits one rank behind the target, from its own side's view.
    let pawn_rank_delta = -attacker_color.forward();
    for file_delta in [-1, 1] {
        if let Some(sq) = offset_square(square, file_delta, pawn_rank_delta) {
            if holds(board, sq, attacker_color, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    if bitboard_squares(attacks.knight_targets(square))
        .any(|sq| holds(board, sq, attacker_color, &[PieceKind::Knight]))
    {
        return true;
    }

    if bitboard_squares(attacks.king_targets(square))
        .any(|sq| holds(board, sq, attacker_color, &[PieceKind::King]))
    {
        return true;
    }

    if ray_attack(
        board,
        attacks.bishop_rays(square),
        attacker_color,
        &[PieceKind::Bishop, PieceKind::Queen],
    ) {
        return true;
    }

    ray_attack(
        board,
        attacks.rook_rays(square),
        attacker_color,
        &[PieceKind::Rook, PieceKind::Queen],
    )
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.opposite())
}

impl Board {
    #[inline]
    pub fn is_attacked(&self, attacker_color: Color, square: Square) -> bool {
        is_square_attacked(self, square, attacker_color)
    }

    /// The position is legal iff the side that just moved is not left in check.
    #[inline]
    pub fn is_legal(&self) -> bool {
        !is_king_in_check(self, self.side_to_move.opposite())
    }

    #[inline]
    pub(crate) fn compute_in_check(&self) -> bool {
        is_king_in_check(self, self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::is_square_attacked;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Color;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("test square should be valid")
    }

    #[test]
    fn pawn_attacks_are_directional() {
        let board = Board::from_fen("4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("e4"), Color::Dark));
        assert!(is_square_attacked(&board, sq("c4"), Color::Dark));
        assert!(!is_square_attacked(&board, sq("d4"), Color::Dark));
        assert!(!is_square_attacked(&board, sq("e6"), Color::Dark));
        assert!(is_square_attacked(&board, sq("d3"), Color::Light));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = Board::from_fen("4k3/8/8/8/R2P3q/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("c4"), Color::Light));
        assert!(is_square_attacked(&board, sq("d4"), Color::Light));
        assert!(!is_square_attacked(&board, sq("e4"), Color::Light));
        assert!(is_square_attacked(&board, sq("e1"), Color::Dark));
        assert!(is_square_attacked(&board, sq("e4"), Color::Dark));
        assert!(!is_square_attacked(&board, sq("c4"), Color::Dark));
    }

    #[test]
    fn leapers_and_kings() {
        let board = Board::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("e1"), Color::Dark));
        assert!(is_square_attacked(&board, sq("d7"), Color::Dark));
        assert!(is_square_attacked(&board, sq("d2"), Color::Light));
        assert!(!is_square_attacked(&board, sq("e3"), Color::Light));
        assert!(board.in_check());
    }

    #[test]
    fn legality_looks_at_the_side_that_just_moved() {
        let legal = Board::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("FEN should parse");
        assert!(legal.is_legal());
        let illegal = Board::from_fen("4k3/8/8/8/8/8/8/4K2r b - - 0 1").expect("FEN should parse");
        assert!(!illegal.is_legal());
    }
}

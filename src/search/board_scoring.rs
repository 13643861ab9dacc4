//! Pluggable board evaluation interfaces and the baseline material scorer.
//!
//! Search delegates static position scoring to `BoardScorer`, so alternate
//! heuristics can be swapped in without touching the search code.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Larger than any reachable evaluation.
pub const INF: i32 = 100_000;

/// Score of the side to move when it is checkmated `ply` plies from the root.
#[inline]
pub const fn mate_score(ply: u32) -> i32 {
    -(INF - ply as i32)
}

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 30,
            PieceKind::Bishop => 30,
            PieceKind::Rook => 50,
            PieceKind::Queen => 80,
            PieceKind::King => 0,
        }
    }

    /// Material totals as `(light, dark)`.
    pub fn material(board: &Board) -> (i32, i32) {
        let mut totals = [0i32; 2];
        for sq in 0..64 {
            if let Some(piece) = board.piece_at(sq) {
                totals[piece.color.index()] += Self::piece_value(piece.kind);
            }
        }
        (totals[Color::Light.index()], totals[Color::Dark.index()])
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board) -> i32 {
        let (light, dark) = Self::material(board);
        match board.side_to_move() {
            Color::Light => light - dark,
            Color::Dark => dark - light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{mate_score, BoardScorer, MaterialScorer, INF};
    use crate::game_state::board::Board;

    #[test]
    fn material_totals() {
        let fixtures = [
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", (380, 380)),
            ("rnbqkbnr/pppp1ppp/8/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1", (370, 370)),
            ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", (100, 100)),
            ("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", (50, 80)),
        ];
        for (fen, expected) in fixtures {
            let board = Board::from_fen(fen).expect("FEN should parse");
            assert_eq!(MaterialScorer::material(&board), expected, "{fen}");
        }
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        let light = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let dark = Board::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(MaterialScorer.score(&light), -30);
        assert_eq!(MaterialScorer.score(&dark), 30);
    }

    #[test]
    fn mate_scores_prefer_shorter_mates() {
        assert_eq!(mate_score(0), -INF);
        assert_eq!(mate_score(3), -(INF - 3));
        assert!(-mate_score(1) > -mate_score(3));
    }
}

//! Zobrist keys for position identity.
//!
//! The keys are drawn from a seeded `StdRng`, so hashes are deterministic
//! across runs, which is useful for testing and debugging. Position keys are
//! used for equality and repetition queries only, never for a lookup table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;

pub const DEFAULT_ZOBRIST_SEED: u64 = 0x5343_4841_4D53_0001;

#[derive(Debug, Clone)]
pub struct ZobristKeys {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for piece in color {
                for key in piece {
                    *key = rng.random();
                }
            }
        }

        let side_to_move = rng.random();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.random();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.random();
        }

        Self {
            piece_square,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline]
    pub fn piece_square(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.color.index()][piece.kind.index()][square as usize]
    }

    /// Full key over placement, side to move, castling rights and en-passant file.
    pub fn position_key(
        &self,
        squares: &[Option<Piece>; 64],
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> u64 {
        let mut key = 0u64;

        for (sq, piece) in squares.iter().enumerate() {
            if let Some(piece) = piece {
                key ^= self.piece_square(*piece, sq as Square);
            }
        }

        if side_to_move == Color::Dark {
            key ^= self.side_to_move;
        }

        key ^= self.castling[(castling_rights & CASTLE_ALL) as usize];

        if let Some(square) = en_passant {
            key ^= self.en_passant_file[file_of(square) as usize];
        }

        key
    }
}

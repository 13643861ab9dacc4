//! Precomputed per-square reachability tables.
//!
//! Knight and king destinations are stored as bitboards; bishop and rook
//! movement is stored as ordered rays so generators and attack tests can walk
//! outwards from the source and stop at the first blocker. Queens use both ray
//! sets. Everything is built by `const fn` and never mutated afterwards.

use crate::game_state::chess_types::Square;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// `(file_step, rank_step)` per bishop ray.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
/// `(file_step, rank_step)` per rook ray.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Squares along one direction, nearest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ray {
    squares: [Square; 7],
    len: u8,
}

impl Ray {
    const EMPTY: Ray = Ray {
        squares: [0; 7],
        len: 0,
    };

    #[inline]
    pub fn squares(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }
}

#[derive(Debug, Clone)]
pub struct AttackTables {
    knight: [u64; 64],
    king: [u64; 64],
    bishop_rays: [[Ray; 4]; 64],
    rook_rays: [[Ray; 4]; 64],
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackTables {
    pub const fn new() -> Self {
        Self {
            knight: leaper_table(&KNIGHT_OFFSETS),
            king: leaper_table(&KING_OFFSETS),
            bishop_rays: ray_table(&BISHOP_DIRECTIONS),
            rook_rays: ray_table(&ROOK_DIRECTIONS),
        }
    }

    #[inline]
    pub fn knight_targets(&self, square: Square) -> u64 {
        self.knight[square as usize]
    }

    #[inline]
    pub fn king_targets(&self, square: Square) -> u64 {
        self.king[square as usize]
    }

    #[inline]
    pub fn bishop_rays(&self, square: Square) -> &[Ray; 4] {
        &self.bishop_rays[square as usize]
    }

    #[inline]
    pub fn rook_rays(&self, square: Square) -> &[Ray; 4] {
        &self.rook_rays[square as usize]
    }
}

/// Iterate the set squares of a bitboard, lowest first.
#[inline]
pub fn bitboard_squares(bitboard: u64) -> BitboardSquares {
    BitboardSquares(bitboard)
}

#[derive(Debug, Clone, Copy)]
pub struct BitboardSquares(u64);

impl Iterator for BitboardSquares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }
}

const fn on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

const fn leaper_table(offsets: &[(i8, i8); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut targets = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            if on_board(file + df, rank + dr) {
                targets |= 1u64 << ((rank + dr) * 8 + file + df) as u32;
            }
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}

const fn ray_table(directions: &[(i8, i8); 4]) -> [[Ray; 4]; 64] {
    let mut table = [[Ray::EMPTY; 4]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut d = 0usize;
        while d < 4 {
            let (df, dr) = directions[d];
            let mut ray = Ray::EMPTY;
            let mut file = (sq % 8) as i8 + df;
            let mut rank = (sq / 8) as i8 + dr;

            while on_board(file, rank) {
                ray.squares[ray.len as usize] = (rank * 8 + file) as Square;
                ray.len += 1;
                file += df;
                rank += dr;
            }

            table[sq][d] = ray;
            d += 1;
        }
        sq += 1;
    }

    table
}

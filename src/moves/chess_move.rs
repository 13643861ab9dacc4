//! Immutable description of a single ply.
//!
//! A move carries enough context to be applied and displayed without looking
//! at the board again: the captured kind, the en-passant square skipped by a
//! double push, and the promotion kind.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: Square,
    pub dst: Square,
    /// Kind removed by this move. En-passant captures record a pawn.
    pub captured: Option<PieceKind>,
    /// Square skipped by a double pawn push.
    pub en_passant: Option<Square>,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn quiet(src: Square, dst: Square) -> Self {
        Self {
            src,
            dst,
            captured: None,
            en_passant: None,
            promotion: None,
        }
    }

    #[inline]
    pub const fn capture(src: Square, dst: Square, captured: PieceKind) -> Self {
        Self {
            src,
            dst,
            captured: Some(captured),
            en_passant: None,
            promotion: None,
        }
    }

    #[inline]
    pub const fn double_push(src: Square, dst: Square, skipped: Square) -> Self {
        Self {
            src,
            dst,
            captured: None,
            en_passant: Some(skipped),
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }
}

/// Long algebraic form (`e2e4`, `e7e8q`) as spoken by UCI.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.src), square_name(self.dst))?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter())?;
        }
        Ok(())
    }
}

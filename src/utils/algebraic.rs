//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by FEN, long algebraic, SAN and EPD components.

use crate::game_state::chess_types::{file_of, make_square, rank_of, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = file_from_char(bytes[0] as char)?;
    let rank = rank_from_char(bytes[1] as char)?;
    Some(make_square(file, rank))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_name(square: Square) -> String {
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    if ('a'..='h').contains(&ch) {
        Some(ch as u8 - b'a')
    } else {
        None
    }
}

#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    if ('1'..='8').contains(&ch) {
        Some(ch as u8 - b'1')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_name};

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1"), Some(0));
        assert_eq!(algebraic_to_square("h8"), Some(63));
        assert_eq!(algebraic_to_square("e3"), Some(20));
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(63), "h8");
        for sq in 0..64u8 {
            assert_eq!(algebraic_to_square(&square_name(sq)), Some(sq));
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("a"), None);
        assert_eq!(algebraic_to_square("a10"), None);
    }
}

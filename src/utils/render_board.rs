//! Terminal-oriented ASCII board renderer.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Render the board with rank 8 at the top, using FEN letters and `.` for
/// empty squares.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(200);

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            out.push(board.piece_at(make_square(file, rank)).map_or('.', Piece::symbol));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn renders_start_position() {
        let rendered = render_board(&Board::new_game());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[4], "5 . . . . . . . . 5");
        assert_eq!(lines[8], "1 R N B Q K B N R 1");
        assert_eq!(format!("{}", Board::new_game()), rendered);
    }
}

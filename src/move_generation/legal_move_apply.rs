//! In-place move application and reversal.
//!
//! `make_move` applies a move without any legality check and records enough
//! state in an `UndoEntry` for `undo` to restore the board exactly. Derived
//! state (check flag, position key) is recomputed from scratch after each move.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    castling_right_for_rook_home, castling_rights_of, castling_side_for_king_move,
};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoEntry;
use crate::moves::chess_move::Move;

impl Board {
    /// Apply `mv` for the side to move. Fails, leaving the board untouched, when
    /// the source square is empty or the destination holds a king.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        let moved = self
            .piece_at(mv.src)
            .ok_or_else(|| ChessError::malformed_move(&mv.to_string(), "source square is empty"))?;
        let mover = self.side_to_move;

        let prev_castling_rights = self.castling_rights;
        let prev_en_passant = self.en_passant;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_in_check = self.in_check;
        let prev_position_key = self.position_key;

        let is_pawn = moved.kind == PieceKind::Pawn;
        let is_en_passant = is_pawn
            && Some(mv.dst) == self.en_passant
            && file_of(mv.src) != file_of(mv.dst)
            && self.piece_at(mv.dst).is_none();

        if matches!(self.piece_at(mv.dst), Some(target) if target.kind == PieceKind::King) {
            return Err(ChessError::malformed_move(&mv.to_string(), "cannot capture a king"));
        }

        let captured = if is_en_passant {
            offset_square(mv.dst, 0, -mover.forward()).and_then(|victim_sq| {
                self.squares[victim_sq as usize]
                    .take()
                    .map(|victim| (victim, victim_sq))
            })
        } else {
            self.piece_at(mv.dst).map(|victim| (victim, mv.dst))
        };

        self.squares[mv.src as usize] = None;
        let placed = match mv.promotion {
            Some(kind) => Piece::new(moved.color, kind),
            None => moved,
        };
        self.squares[mv.dst as usize] = Some(placed);

        let mut castling_rook = None;
        if moved.kind == PieceKind::King {
            self.king_squares[moved.color.index()] = mv.dst;

            if file_of(mv.src).abs_diff(file_of(mv.dst)) == 2 {
                if let Some(side) = castling_side_for_king_move(mv.src, mv.dst) {
                    let rook = Piece::new(moved.color, PieceKind::Rook);
                    if self.piece_at(side.rook_from) == Some(rook)
                        && self.piece_at(side.rook_to).is_none()
                    {
                        self.squares[side.rook_from as usize] = None;
                        self.squares[side.rook_to as usize] = Some(rook);
                        castling_rook = Some((side.rook_from, side.rook_to));
                    }
                }
            }
        }

        let mut rights = self.castling_rights;
        match moved.kind {
            PieceKind::King => rights &= !castling_rights_of(moved.color),
            PieceKind::Rook => rights &= !castling_right_for_rook_home(moved.color, mv.src),
            _ => {}
        }
        if let Some((victim, victim_sq)) = captured {
            if victim.kind == PieceKind::Rook {
                rights &= !castling_right_for_rook_home(victim.color, victim_sq);
            }
        }
        self.castling_rights = rights;

        self.en_passant = if is_pawn && rank_of(mv.src).abs_diff(rank_of(mv.dst)) == 2 {
            Some(make_square(
                file_of(mv.src),
                (rank_of(mv.src) + rank_of(mv.dst)) / 2,
            ))
        } else {
            None
        };

        let resets_clock = is_pawn || captured.is_some();
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };

        if mover == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.opposite();

        self.history.push(UndoEntry {
            mv,
            moved,
            captured,
            castling_rook,
            prev_castling_rights,
            prev_en_passant,
            prev_halfmove_clock,
            prev_in_check,
            prev_position_key,
            irreversible: resets_clock
                || castling_rook.is_some()
                || rights != prev_castling_rights,
        });

        self.refresh_derived_state();
        Ok(())
    }

    /// Revert the most recent `make_move`, returning the move that was undone.
    pub fn undo(&mut self) -> ChessResult<Move> {
        let entry = self.history.pop().ok_or(ChessError::EmptyHistory)?;
        let mv = entry.mv;

        if let Some((rook_from, rook_to)) = entry.castling_rook {
            let rook = self.squares[rook_to as usize].take();
            self.squares[rook_from as usize] = rook;
        }

        self.squares[mv.dst as usize] = None;
        self.squares[mv.src as usize] = Some(entry.moved);
        if let Some((victim, victim_sq)) = entry.captured {
            self.squares[victim_sq as usize] = Some(victim);
        }
        if entry.moved.kind == PieceKind::King {
            self.king_squares[entry.moved.color.index()] = mv.src;
        }

        self.side_to_move = self.side_to_move.opposite();
        if self.side_to_move == Color::Dark {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        self.castling_rights = entry.prev_castling_rights;
        self.en_passant = entry.prev_en_passant;
        self.halfmove_clock = entry.prev_halfmove_clock;
        self.in_check = entry.prev_in_check;
        self.position_key = entry.prev_position_key;

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ChessError;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn play(board: &mut Board, lan: &str) {
        let mv = parse_long_algebraic(lan, board).expect("move should parse");
        board.make_move(mv).expect("move should apply");
    }

    #[test]
    fn undo_on_fresh_board_fails() {
        let mut board = Board::new_game();
        assert_eq!(board.undo(), Err(ChessError::EmptyHistory));
    }

    #[test]
    fn double_push_sets_en_passant_and_clocks() {
        let mut board = Board::new_game();
        play(&mut board, "e2e4");
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        play(&mut board, "g8f6");
        assert_eq!(
            board.to_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }

    #[test]
    fn en_passant_capture_removes_the_pawn_behind() {
        let start = "k7/8/8/pP6/8/8/8/K7 w - a6 0 1";
        let mut board = Board::from_fen(start).expect("FEN should parse");
        play(&mut board, "b5a6");
        assert_eq!(board.piece_at(32), None);
        assert_eq!(board.piece_at(40), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert_eq!(board.halfmove_clock(), 0);

        board.undo().expect("undo should succeed");
        assert_eq!(board.to_fen(), start);
    }

    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let start = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10";
        let mut board = Board::from_fen(start).expect("FEN should parse");
        play(&mut board, "e1g1");
        assert_eq!(board.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");
        play(&mut board, "e8c8");
        assert_eq!(board.to_fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 11");

        board.undo().expect("undo should succeed");
        board.undo().expect("undo should succeed");
        assert_eq!(board.to_fen(), start);
    }

    #[test]
    fn capturing_a_home_rook_revokes_its_right() {
        let mut board =
            Board::from_fen("r3k2r/8/8/8/8/8/6p1/R3K2R b KQkq - 0 1").expect("FEN should parse");
        let mv = parse_long_algebraic("g2h1q", &board).expect("move should parse");
        board.make_move(mv).expect("move should apply");
        assert_eq!(
            board.castling_rights(),
            CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(board.piece_at(7), Some(Piece::new(Color::Dark, PieceKind::Queen)));
        assert!(board.in_check());
    }

    #[test]
    fn rook_leaving_home_revokes_one_right() {
        let mut board =
            Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut board, "a1a5");
        assert_eq!(
            board.castling_rights(),
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
    }

    #[test]
    fn undo_restores_every_field() {
        let start = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(start).expect("FEN should parse");
        let key = board.position_key();
        for lan in ["e5f7", "e7f7", "e1c1", "b4c3"] {
            play(&mut board, lan);
        }
        for _ in 0..4 {
            board.undo().expect("undo should succeed");
        }
        assert_eq!(board.to_fen(), start);
        assert_eq!(board.position_key(), key);
        assert!(board.history().is_empty());
    }

    #[test]
    fn en_passant_square_occupied_is_an_ordinary_capture() {
        let start = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        let mut board = Board::from_fen(start).expect("FEN should parse");
        // Planted directly: the parser refuses an occupied target.
        board.squares[43] = Some(Piece::new(Color::Dark, PieceKind::Knight));
        board.refresh_derived_state();
        let before = board.to_fen();

        let mv = parse_long_algebraic("e5d6", &board).expect("move should parse");
        board.make_move(mv).expect("move should apply");
        assert_eq!(board.piece_at(35), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
        assert_eq!(board.piece_at(43), Some(Piece::new(Color::Light, PieceKind::Pawn)));

        board.undo().expect("undo should succeed");
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn capturing_a_king_is_refused_without_mutation() {
        let mut board = Board::new_game();
        for lan in ["e2e4", "f7f6", "d1h5", "e8f7"] {
            play(&mut board, lan);
        }
        let before = board.to_fen();
        let key = board.position_key();

        let mv = parse_long_algebraic("h5f7", &board).expect("move should parse");
        assert!(matches!(
            board.make_move(mv),
            Err(ChessError::MalformedMove { .. })
        ));
        assert_eq!(board.to_fen(), before);
        assert_eq!(board.position_key(), key);
        assert_eq!(board.history_len(), 4);
        assert_eq!(board.king_square(Color::Dark), 53);
    }

    #[test]
    fn check_flag_follows_the_side_to_move() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        play(&mut board, "a1a8");
        assert!(board.in_check());
        board.undo().expect("undo should succeed");
        assert!(!board.in_check());
    }
}

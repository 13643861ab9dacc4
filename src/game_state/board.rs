//! Mailbox board state with an owned undo log.
//!
//! `Board` stores one optional piece per square plus the scalar game state
//! (side to move, castling rights, en-passant target, clocks), a cached check
//! flag and a Zobrist position key. Mutation goes through `make_move`/`undo`
//! (see `move_generation::legal_move_apply`), which keep every derived field
//! consistent and must nest in LIFO order.

use std::fmt;

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::UndoEntry;
use crate::tables::static_tables::StaticTables;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::render_board::render_board;

#[derive(Clone)]
pub struct Board {
    pub(crate) squares: [Option<Piece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // Derived state, refreshed after every mutation.
    pub(crate) in_check: bool,
    pub(crate) position_key: u64,
    pub(crate) king_squares: [Square; 2],

    pub(crate) history: Vec<UndoEntry>,
    pub(crate) tables: &'static StaticTables,
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Parse a six-field FEN string using the shared static tables.
    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::from_fen_with_tables(fen, StaticTables::shared())
    }

    pub fn from_fen_with_tables(fen: &str, tables: &'static StaticTables) -> ChessResult<Self> {
        let parsed = parse_fen(fen)?;

        let mut board = Self {
            squares: parsed.squares,
            side_to_move: parsed.side_to_move,
            castling_rights: parsed.castling_rights,
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            in_check: false,
            position_key: 0,
            king_squares: parsed.king_squares,
            history: Vec::with_capacity(64),
            tables,
        };
        board.refresh_derived_state();
        Ok(board)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// True iff the side to move's king is attacked.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn position_key(&self) -> u64 {
        self.position_key
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn tables(&self) -> &'static StaticTables {
        self.tables
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn history(&self) -> &[UndoEntry] {
        &self.history
    }

    /// Number of earlier positions, back to the last irreversible move, that
    /// share the current position key.
    pub fn repetition_count(&self) -> usize {
        let mut count = 0;
        for entry in self.history.iter().rev() {
            if entry.irreversible {
                break;
            }
            if entry.prev_position_key == self.position_key {
                count += 1;
            }
        }
        count
    }

    pub(crate) fn refresh_derived_state(&mut self) {
        self.in_check = self.compute_in_check();
        self.position_key = self.tables.zobrist.position_key(
            &self.squares,
            self.side_to_move,
            self.castling_rights,
            self.en_passant,
        );
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("in_check", &self.in_check)
            .field("position_key", &format_args!("{:#018x}", self.position_key))
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

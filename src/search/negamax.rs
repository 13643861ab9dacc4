//! Fixed-depth negamax search.
//!
//! Plain negamax over pseudo-legal moves filtered by `Board::is_legal`, with
//! no pruning or move ordering. Scores are from the side to move's
//! perspective; checkmates score `mate_score(ply)` so shorter mates win ties.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{mate_score, BoardScorer, MaterialScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: i32,
}

impl SearchOutcome {
    #[inline]
    const fn leaf(score: i32) -> Self {
        Self {
            best_move: None,
            score,
        }
    }
}

pub struct SearchEngine<S: BoardScorer = MaterialScorer> {
    config: EngineConfig,
    scorer: S,
    nodes: u64,
    stop: Arc<AtomicBool>,
}

impl SearchEngine<MaterialScorer> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scorer(config, MaterialScorer)
    }
}

impl Default for SearchEngine<MaterialScorer> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(config: EngineConfig, scorer: S) -> Self {
        Self {
            config,
            scorer,
            nodes: 0,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth;
    }

    /// Nodes visited by the most recent search.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Shared flag that, once set, ends the search after the current root move.
    #[inline]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Search to the configured depth, at least one ply so that a move is
    /// returned whenever one exists. Resets the node counter and stop flag.
    pub fn bestmove(&mut self, board: &mut Board) -> ChessResult<SearchOutcome> {
        self.nodes = 0;
        self.stop.store(false, Ordering::Relaxed);

        let depth = self.config.depth.max(1);
        let outcome = self.search(board, depth, 1)?;
        log::info!(
            "depth {} score {} nodes {} best {}",
            depth,
            outcome.score,
            self.nodes,
            outcome
                .best_move
                .map_or_else(|| "none".to_owned(), |mv| mv.to_string())
        );
        Ok(outcome)
    }

    /// Negamax from `board`. `ply` is the distance from the game root and only
    /// affects mate scores. The board is restored before returning.
    pub fn search(&mut self, board: &mut Board, depth: u8, ply: u32) -> ChessResult<SearchOutcome> {
        if !board.is_legal() {
            return Err(ChessError::PrecallInvariantViolated(format!(
                "side not to move is in check in {}",
                board.to_fen()
            )));
        }
        self.negamax(board, depth, ply, true)
    }

    fn negamax(&mut self, board: &mut Board, depth: u8, ply: u32, root: bool) -> ChessResult<SearchOutcome> {
        self.nodes += 1;

        if depth == 0 {
            if has_legal_move(board)? {
                return Ok(SearchOutcome::leaf(self.scorer.score(board)));
            }
            return Ok(SearchOutcome::leaf(terminal_score(board, ply)));
        }

        let moves: Vec<Move> = board.pseudo_legal_moves().collect();
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            if root && best.is_some() && self.stop.load(Ordering::Relaxed) {
                log::debug!("stop requested, returning best root move so far");
                break;
            }

            board.make_move(mv)?;
            if !board.is_legal() {
                board.undo()?;
                continue;
            }
            let child = self.negamax(board, depth - 1, ply + 1, false);
            board.undo()?;

            let score = -child?.score;
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        Ok(match best {
            Some((mv, score)) => SearchOutcome {
                best_move: Some(mv),
                score,
            },
            None => SearchOutcome::leaf(terminal_score(board, ply)),
        })
    }
}

/// Checkmate or stalemate score for a side to move with no legal moves.
#[inline]
fn terminal_score(board: &Board, ply: u32) -> i32 {
    if board.in_check() {
        mate_score(ply)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use super::SearchEngine;
    use crate::config::EngineConfig;
    use crate::errors::ChessError;
    use crate::game_state::board::Board;
    use crate::move_generation::legal_move_generator::legal_moves;
    use crate::search::board_scoring::INF;

    fn engine(depth: u8) -> SearchEngine {
        SearchEngine::new(EngineConfig { depth })
    }

    #[test]
    fn checkmated_side_scores_mate_at_any_depth() {
        let fen = "k7/1Q6/1K6/8/8/8/8/8 b - - 0 1";
        for depth in [0, 1, 2] {
            let mut board = Board::from_fen(fen).expect("FEN should parse");
            let outcome = engine(depth)
                .search(&mut board, depth, 1)
                .expect("search should run");
            assert_eq!(outcome.best_move, None);
            assert_eq!(outcome.score, -(INF - 1), "depth {depth}");
        }
    }

    #[test]
    fn stalemate_scores_zero() {
        let mut board = Board::from_fen("k7/8/1Q6/8/8/8/8/K7 b - - 0 1").expect("FEN should parse");
        for depth in [0, 2] {
            let outcome = engine(depth)
                .search(&mut board, depth, 1)
                .expect("search should run");
            assert_eq!(outcome.best_move, None);
            assert_eq!(outcome.score, 0);
        }
    }

    #[test]
    fn finds_mate_in_one() {
        let mut board = Board::from_fen("k7/8/1K6/8/8/8/7Q/8 w - - 0 1").expect("FEN should parse");
        let outcome = engine(1).bestmove(&mut board).expect("search should run");
        assert_eq!(outcome.score, INF - 2);

        let mv = outcome.best_move.expect("a mating move should be found");
        board.make_move(mv).expect("move should apply");
        assert!(board.in_check());
        assert!(legal_moves(&mut board).expect("generation should succeed").is_empty());
    }

    #[test]
    fn wins_hanging_queen() {
        let fen = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";
        for depth in [1, 2] {
            let mut board = Board::from_fen(fen).expect("FEN should parse");
            let outcome = engine(depth).bestmove(&mut board).expect("search should run");
            assert_eq!(
                outcome.best_move.map(|m| m.to_string()),
                Some("d2d5".to_owned()),
                "depth {depth}"
            );
            assert_eq!(outcome.score, 50);
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn stop_flag_returns_first_legal_root_move() {
        let mut board = Board::new_game();
        let mut search = engine(3);
        search.request_stop();
        let outcome = search.search(&mut board, 3, 1).expect("search should run");
        assert_eq!(outcome.best_move.map(|m| m.to_string()), Some("b1a3".to_owned()));
        assert!(board.history().is_empty());
    }

    #[test]
    fn bestmove_searches_at_least_one_ply() {
        let mut board = Board::new_game();
        let mut search = engine(0);
        let outcome = search.bestmove(&mut board).expect("search should run");
        assert!(outcome.best_move.is_some());
        assert_eq!(search.nodes(), 21);
    }

    #[test]
    fn stop_raised_from_another_thread_ends_the_search_early() {
        let mut board = Board::new_game();
        let mut search = engine(4);
        let stop = search.stop_handle();
        let finished = AtomicBool::new(false);

        let outcome = thread::scope(|scope| {
            scope.spawn(|| {
                while !finished.load(Ordering::Relaxed) {
                    stop.store(true, Ordering::Relaxed);
                    thread::yield_now();
                }
            });
            let outcome = search.bestmove(&mut board);
            finished.store(true, Ordering::Relaxed);
            outcome
        })
        .expect("search should run");

        assert_eq!(outcome.best_move.map(|m| m.to_string()), Some("b1a3".to_owned()));
        assert!(board.history().is_empty());
    }

    #[test]
    fn illegal_position_is_rejected() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2r b - - 0 1").expect("FEN should parse");
        let err = engine(2).bestmove(&mut board).expect_err("search should refuse");
        assert!(matches!(err, ChessError::PrecallInvariantViolated(_)));
    }

    #[test]
    fn node_counter_resets_between_searches() {
        let mut board = Board::new_game();
        let mut search = engine(1);
        search.bestmove(&mut board).expect("search should run");
        assert_eq!(search.nodes(), 21);
        search.bestmove(&mut board).expect("search should run");
        assert_eq!(search.nodes(), 21);
    }
}

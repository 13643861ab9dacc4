//! EPD test-suite parsing and running.
//!
//! Each line holds the four position fields of a FEN followed by `;`-separated
//! operations. Only `bm` (best moves, in SAN) and `id` are interpreted; the
//! clocks are taken as `0 1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::BoardScorer;
use crate::search::negamax::SearchEngine;
use crate::utils::san::parse_san;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpdEntry {
    pub fen: String,
    pub best_moves: Vec<Move>,
    pub id: Option<String>,
}

pub fn parse_epd_line(line: &str) -> ChessResult<EpdEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(ChessError::malformed_position(format!(
            "EPD line needs four position fields: {line}"
        )));
    }

    let fen = format!("{} 0 1", tokens[..4].join(" "));
    let mut board = Board::from_fen(&fen)?;

    let operations = tokens[4..].join(" ");
    let mut best_moves = Vec::new();
    let mut id = None;
    for operation in operations.split(';') {
        let mut operands = operation.split_whitespace();
        match operands.next() {
            Some("bm") => {
                for san in operands {
                    best_moves.push(parse_san(san.trim_end_matches(','), &mut board)?);
                }
            }
            Some("id") => {
                let text = operands.collect::<Vec<_>>().join(" ");
                id = Some(text.trim_matches('"').to_owned());
            }
            _ => {}
        }
    }

    if best_moves.is_empty() {
        return Err(ChessError::malformed_position(format!(
            "EPD line has no bm operation: {line}"
        )));
    }

    Ok(EpdEntry {
        fen,
        best_moves,
        id,
    })
}

/// Parse every non-blank line, skipping (and logging) the ones that fail.
pub fn parse_epd_suite(text: &str) -> Vec<EpdEntry> {
    let mut entries = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_epd_line(line) {
            Ok(entry) => entries.push(entry),
            Err(err) => log::error!("cannot parse EPD line {}: {}", line_number + 1, err),
        }
    }
    entries
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpdOutcome {
    pub index: usize,
    pub id: Option<String>,
    pub chosen: Option<Move>,
    pub expected: Vec<Move>,
    pub score: i32,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteReport {
    pub outcomes: Vec<EpdOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Search every entry at the engine's configured depth and compare its best
/// move against the entry's `bm` list. Entries the search refuses are logged
/// and left out of the report.
pub fn run_epd_suite<S: BoardScorer>(
    engine: &mut SearchEngine<S>,
    entries: &[EpdEntry],
) -> ChessResult<SuiteReport> {
    let mut report = SuiteReport::default();
    for (index, entry) in entries.iter().enumerate() {
        let searched = Board::from_fen(&entry.fen).and_then(|mut board| engine.bestmove(&mut board));
        let outcome = match searched {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("skipping test {}: {}", index + 1, err);
                continue;
            }
        };
        let passed = outcome
            .best_move
            .is_some_and(|mv| entry.best_moves.contains(&mv));

        if passed {
            log::info!("test {}: OK with score {}", index + 1, outcome.score);
        } else {
            log::info!(
                "test {}: FAIL with score {} ({} instead of {})",
                index + 1,
                outcome.score,
                outcome
                    .best_move
                    .map_or_else(|| "none".to_owned(), |mv| mv.to_string()),
                entry
                    .best_moves
                    .iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>()
                    .join(" or ")
            );
        }

        report.outcomes.push(EpdOutcome {
            index: index + 1,
            id: entry.id.clone(),
            chosen: outcome.best_move,
            expected: entry.best_moves.clone(),
            score: outcome.score,
            passed,
        });
    }
    Ok(report)
}

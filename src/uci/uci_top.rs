//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, maintains the current position, runs the fixed-depth
//! search on `go`, and emits protocol-compliant output. Incoming and outgoing
//! lines are logged at debug level as `>>>` and `<<<`.

use std::io::{self, BufRead, Write};

use crate::config::{EngineConfig, MAX_SEARCH_DEPTH};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::search::negamax::SearchEngine;
use crate::utils::long_algebraic::parse_long_algebraic;

const UCI_ENGINE_NAME: &str = "Smash";
const UCI_ENGINE_AUTHOR: &str = "the smash developers";

pub fn run_stdio_loop(config: EngineConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new(config);

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciState {
    board: Board,
    engine: SearchEngine,
    debug_mode: bool,
}

fn respond(out: &mut impl Write, line: &str) -> io::Result<()> {
    log::debug!("<<< {line}");
    writeln!(out, "{line}")
}

impl UciState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            board: Board::new_game(),
            engine: SearchEngine::new(config),
            debug_mode: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Handle one command line. Returns `true` when the loop should exit.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        log::debug!(">>> {trimmed}");

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                respond(out, &format!("id name {UCI_ENGINE_NAME}"))?;
                respond(out, &format!("id author {UCI_ENGINE_AUTHOR}"))?;
                respond(
                    out,
                    &format!(
                        "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                        self.engine.config().depth
                    ),
                )?;
                respond(out, "uciok")?;
            }
            "isready" => {
                respond(out, "readyok")?;
            }
            "debug" => {
                let mode = parts.next().unwrap_or_default();
                self.debug_mode = mode.eq_ignore_ascii_case("on");
            }
            "setoption" => {
                if let Err(err) = self.handle_setoption(trimmed) {
                    log::warn!("rejected setoption: {err}");
                    respond(out, &format!("info string setoption error: {err}"))?;
                }
            }
            "ucinewgame" => {
                self.board = Board::new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    log::warn!("rejected position: {err}");
                    respond(out, &format!("info string position error: {err}"))?;
                }
            }
            "go" => {
                self.handle_go(trimmed, out)?;
            }
            "stop" => {
                // Search runs synchronously, so this only affects a search started elsewhere.
                self.engine.request_stop();
            }
            "d" => {
                for row in self.board.to_string().lines() {
                    respond(out, row)?;
                }
                respond(out, &format!("Fen: {}", self.board.to_fen()))?;
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                log::warn!("ignoring unknown command: {trimmed}");
            }
        }

        Ok(false)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), String> {
        let mut name_tokens = Vec::<&str>::new();
        let mut value_tokens = Vec::<&str>::new();
        let mut mode = "";

        for tok in line.split_whitespace().skip(1) {
            match tok {
                "name" => mode = "name",
                "value" => mode = "value",
                _ if mode == "name" => name_tokens.push(tok),
                _ if mode == "value" => value_tokens.push(tok),
                _ => {}
            }
        }

        let name = name_tokens.join(" ");
        let value = value_tokens.join(" ");

        if name.eq_ignore_ascii_case("Depth") {
            let depth = parse_depth(&value)?;
            self.engine.set_depth(depth);
            Ok(())
        } else {
            Err(format!("unknown option '{name}'"))
        }
    }

    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        let mut tokens = line.split_whitespace().skip(1).peekable();

        let mut board = match tokens.next() {
            Some("startpos") => Board::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::<&str>::new();
                while let Some(next) = tokens.peek() {
                    if *next == "moves" {
                        break;
                    }
                    fen_parts.push(*next);
                    tokens.next();
                }
                Board::from_fen(&fen_parts.join(" "))?
            }
            Some(other) => {
                return Err(ChessError::malformed_position(format!(
                    "unsupported position token '{other}'"
                )))
            }
            None => {
                return Err(ChessError::malformed_position(
                    "incomplete position command",
                ))
            }
        };

        if tokens.next() == Some("moves") {
            for lan in tokens {
                let mv = parse_long_algebraic(lan, &board)?;
                board.make_move(mv)?;
            }
        }

        self.board = board;
        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let configured = self.engine.config().depth;
        let depth = match parse_go_depth(line) {
            Ok(depth) => depth.unwrap_or(configured),
            Err(err) => {
                respond(out, &format!("info string go error: {err}"))?;
                return respond(out, "bestmove 0000");
            }
        };

        if self.debug_mode {
            respond(out, &format!("info string searching {}", self.board.to_fen()))?;
        }
        self.engine.set_depth(depth);
        let result = self.engine.bestmove(&mut self.board);
        self.engine.set_depth(configured);

        match result {
            Ok(outcome) => {
                respond(
                    out,
                    &format!(
                        "info depth {depth} score cp {} nodes {}",
                        outcome.score,
                        self.engine.nodes()
                    ),
                )?;
                match outcome.best_move {
                    Some(mv) => respond(out, &format!("bestmove {mv}")),
                    None => respond(out, "bestmove 0000"),
                }
            }
            Err(err) => {
                log::warn!("search failed: {err}");
                respond(out, &format!("info string go error: {err}"))?;
                respond(out, "bestmove 0000")
            }
        }
    }
}

fn parse_depth(value: &str) -> Result<u8, String> {
    value
        .parse::<u8>()
        .ok()
        .filter(|d| (1..=MAX_SEARCH_DEPTH).contains(d))
        .ok_or_else(|| format!("invalid depth '{value}'"))
}

/// `go depth N`; other `go` parameters are accepted and ignored.
fn parse_go_depth(line: &str) -> Result<Option<u8>, String> {
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == "depth" {
            let value = tokens.next().unwrap_or_default();
            return parse_depth(value).map(Some);
        }
    }
    Ok(None)
}

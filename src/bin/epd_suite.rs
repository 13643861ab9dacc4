//! EPD test-suite runner.
//!
//! Usage:
//! `cargo run --release --bin epd_suite -- suite.epd [--depth N] [--config engine.json]`

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use smash_chess::config::{EngineConfig, MAX_SEARCH_DEPTH};
use smash_chess::search::negamax::SearchEngine;
use smash_chess::utils::epd::{parse_epd_suite, run_epd_suite};

#[derive(Debug, Parser)]
#[command(name = "epd_suite", about = "Score the engine against an EPD best-move suite")]
struct Args {
    /// EPD file, one position per line.
    suite: PathBuf,

    /// JSON engine configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies; overrides the config file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_SEARCH_DEPTH as i64))]
    depth: Option<u8>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match args.config.as_deref().map(EngineConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    let text = match fs::read_to_string(&args.suite) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {}: {err}", args.suite.display());
            return ExitCode::FAILURE;
        }
    };

    let entries = parse_epd_suite(&text);
    let mut engine = SearchEngine::new(config);
    let report = match run_epd_suite(&mut engine, &entries) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for outcome in &report.outcomes {
        let label = outcome.id.as_deref().unwrap_or("-");
        let chosen = outcome
            .chosen
            .map_or_else(|| "none".to_owned(), |mv| mv.to_string());
        if outcome.passed {
            println!("Test n.{} ({label}): OK with score {}", outcome.index, outcome.score);
        } else {
            let expected: Vec<String> = outcome.expected.iter().map(|mv| mv.to_string()).collect();
            println!(
                "Test n.{} ({label}): FAIL with score {} ({chosen} instead of {})",
                outcome.index,
                outcome.score,
                expected.join(" or ")
            );
        }
    }
    println!("Results: {}/{}", report.passed(), report.total());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn depth_flag_is_range_checked() {
        let args = Args::try_parse_from(["epd_suite", "wac.epd", "--depth", "3"])
            .expect("depth 3 should parse");
        assert_eq!(args.depth, Some(3));
        assert!(Args::try_parse_from(["epd_suite", "wac.epd", "--depth", "0"]).is_err());
        assert!(Args::try_parse_from(["epd_suite", "--depth", "3"]).is_err());
    }
}

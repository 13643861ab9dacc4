//! UCI engine binary.
//!
//! Usage:
//! `smash [--config engine.json] [--depth N]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use smash_chess::config::{EngineConfig, MAX_SEARCH_DEPTH};
use smash_chess::uci::uci_top::run_stdio_loop;

#[derive(Debug, Parser)]
#[command(name = "smash", version, about = "Fixed-depth negamax chess engine speaking UCI")]
struct Args {
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
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    log::info!("starting UCI loop with {config:?}");

    match run_stdio_loop(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("UCI loop failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn depth_flag_is_range_checked() {
        let args = Args::try_parse_from(["smash", "--depth", "6"]).expect("depth 6 should parse");
        assert_eq!(args.depth, Some(6));
        assert!(Args::try_parse_from(["smash", "--depth", "0"]).is_err());
        assert!(Args::try_parse_from(["smash", "--depth", "33"]).is_err());
        assert_eq!(
            Args::try_parse_from(["smash"]).expect("no flags should parse").depth,
            None
        );
    }
}

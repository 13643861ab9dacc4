//! Process-wide immutable lookup data.
//!
//! `StaticTables` bundles the attack tables and Zobrist keys. It is built once
//! and handed to every `Board` by shared reference; nothing mutates it after
//! construction, so any number of boards may read it concurrently.

use std::sync::OnceLock;

use crate::tables::attack_tables::AttackTables;
use crate::tables::zobrist::{ZobristKeys, DEFAULT_ZOBRIST_SEED};

#[derive(Debug, Clone)]
pub struct StaticTables {
    pub attacks: AttackTables,
    pub zobrist: ZobristKeys,
}

static SHARED: OnceLock<StaticTables> = OnceLock::new();

impl StaticTables {
    pub fn build(zobrist_seed: u64) -> Self {
        Self {
            attacks: AttackTables::new(),
            zobrist: ZobristKeys::with_seed(zobrist_seed),
        }
    }

    /// The default tables, built on first use.
    #[inline]
    pub fn shared() -> &'static StaticTables {
        SHARED.get_or_init(|| {
            log::debug!("building static attack tables and zobrist keys");
            Self::build(DEFAULT_ZOBRIST_SEED)
        })
    }
}

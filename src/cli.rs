use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CacheBackend;

#[derive(Parser, Debug)]
#[command(author, version, about = "IPSC match status for shooters")]
pub struct Cli {
    /// Where finalized matches are cached
    #[arg(long, value_enum, global = true, default_value_t = CacheBackend::Sqlite)]
    pub cache: CacheBackend,

    /// Cache database file or directory (overrides CACHE_PATH)
    #[arg(long, global = true)]
    pub cache_path: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Load all ranked matches, filling the cache with finalized ones
    Sync,
    /// List shooters across all matches
    Shooters {
        /// Only shooters whose id or name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show a shooter's completion and DQ status per match
    Status {
        /// Public shooter id
        public_id: String,
    },
    /// Print a match bundle, its reconciled stages and submission history as JSON
    Export {
        /// Match id
        match_id: String,
    },
}

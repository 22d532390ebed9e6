use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Temporal rarity classifier and narrative generator.
#[derive(Parser, Debug)]
#[command(name = "rarity", version, about)]
pub struct CliArgs {
    /// Rules directory (overrides RULES_DIR; built-in defaults when unset)
    #[arg(long, global = true)]
    pub rules_dir: Option<PathBuf>,

    /// Fail when any rule file does not load
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify a single match count against a total
    Classify {
        /// Negative counts are accepted and treated as 0
        #[arg(long, allow_negative_numbers = true)]
        matches: i64,
        #[arg(long, allow_negative_numbers = true)]
        total: i64,
    },

    /// Generate narratives for a JSON window set
    Narrate {
        /// JSON file with `week`, `month`, `year` and `allTime` counts (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Include rarity scores alongside each record
        #[arg(long)]
        with_rarity: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Manage rule documents
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// Load and validate every rule document in a directory
    Validate {
        /// Directory to check (defaults to the configured rules directory)
        dir: Option<PathBuf>,
    },

    /// Write the built-in rule documents into a directory
    Init {
        dir: PathBuf,
    },
}

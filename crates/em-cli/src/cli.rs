//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use em_core::{DisplayMode, Interval, OrderMode};

/// Episode miner.
///
/// Builds the dictionary of event types seen in a token stream and generates
/// the candidate episodes a frequency counter would test against it.
#[derive(Debug, Parser)]
#[command(name = "em", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print one `[index]name(alias):votes` line per event type.
    Dump {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print event type labels in ordinal order.
    Labels {
        #[command(flatten)]
        input: InputArgs,

        /// Ordering: nameLexical, nameNumeric, onsetTime or voteCount.
        #[arg(long)]
        order: Option<OrderMode>,

        /// Label text: name, alias or ordinal.
        #[arg(long)]
        display: Option<DisplayMode>,
    },

    /// Print candidate episodes as JSON lines.
    Episodes {
        #[command(flatten)]
        input: InputArgs,

        /// Duration window to bind episodes to (repeatable).
        #[arg(long = "interval", value_name = "LOW-HIGH")]
        intervals: Vec<Interval>,

        /// Number of interval slots per generalized episode.
        #[arg(long)]
        dimension: Option<usize>,
    },

    /// Print the registry as JSON.
    Snapshot {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Where event type tokens come from, and edits applied after loading.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// File of whitespace-separated event type names. Reads stdin when omitted.
    pub input: Option<PathBuf>,

    /// Set an alias (repeatable).
    #[arg(long = "alias", value_name = "NAME=ALIAS")]
    pub aliases: Vec<String>,

    /// Pin a layout position (repeatable).
    #[arg(long = "position", value_name = "NAME X Y")]
    pub positions: Vec<String>,
}

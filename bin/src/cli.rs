use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_lines::LineRange;

/// Track visited line ranges and query what is left to process.
#[derive(Debug, Parser)]
#[command(name = "tally", version)]
pub struct Cli {
    /// Lines already visited, as `start-last` or a single line. Repeatable.
    #[arg(
        long = "visit",
        value_name = "RANGE",
        env = "TALLY_VISIT",
        value_delimiter = ','
    )]
    pub visits: Vec<LineRange>,

    /// Log file path, or a directory to place the log file in.
    #[arg(long, value_name = "PATH", env = "TALLY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the coalesced visited ranges.
    Show,
    /// Check whether every line of RANGE has been visited.
    Contains {
        #[arg(value_name = "RANGE")]
        range: LineRange,
    },
    /// Print the part of RANGE that still needs visiting.
    Unvisited {
        #[arg(value_name = "RANGE")]
        range: LineRange,
    },
}

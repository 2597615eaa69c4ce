use crate::cli::{Cli, Command};
use std::io::Write;
use tally_lines::CoverageSet;

pub mod contains;
pub mod show;
pub mod unvisited;

/// How command results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Build the visited set from `cli` and run its command, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let visited = CoverageSet::from_ranges(cli.visits.iter().copied());
    tracing::debug!(
        visits = cli.visits.len(),
        entries = visited.len(),
        "built visited set"
    );

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Command::Show => show::handle(&visited, format, out),
        Command::Contains { range } => contains::handle(&visited, range, format, out),
        Command::Unvisited { range } => unvisited::handle(&visited, range, format, out),
    }
}

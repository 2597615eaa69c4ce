use super::OutputFormat;
use serde::Serialize;
use std::io::Write;
use tally_lines::{CoverageSet, LineRange};

#[derive(Serialize)]
struct ShowReport<'a> {
    entries: &'a CoverageSet,
    overarching_range: Option<LineRange>,
    line_count: u64,
}

/// Print every entry, then the overarching range and number of visited lines.
pub fn handle(
    visited: &CoverageSet,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            let report = ShowReport {
                entries: visited,
                overarching_range: visited.overarching_range(),
                line_count: visited.line_count(),
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        },
        OutputFormat::Text => {
            for entry in visited {
                writeln!(out, "{entry}")?;
            }
            match visited.overarching_range() {
                Some(bounds) => writeln!(out, "overarching: {bounds}")?,
                None => writeln!(out, "overarching: none")?,
            }
            writeln!(out, "lines: {}", visited.line_count())?;
        },
    }
    Ok(())
}

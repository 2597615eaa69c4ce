use super::OutputFormat;
use std::io::Write;
use tally_lines::{CoverageSet, LineRange};

pub fn handle(
    visited: &CoverageSet,
    range: LineRange,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let contained = visited.contains(range);
    tracing::debug!(%range, contained, "contains query");

    match format {
        OutputFormat::Json => {
            serde_json::to_writer(
                &mut *out,
                &serde_json::json!({ "range": range, "contains": contained }),
            )?;
            writeln!(out)?;
        },
        OutputFormat::Text => writeln!(out, "{contained}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, last: u32) -> LineRange {
        LineRange::from_bounds(start, last).unwrap()
    }

    fn render(visited: &CoverageSet, query: LineRange, format: OutputFormat) -> String {
        let mut out = Vec::new();
        handle(visited, query, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn partial_coverage_is_not_contained() {
        let visited = CoverageSet::from([range(1, 3), range(5, 8)]);
        assert_eq!(render(&visited, range(2, 4), OutputFormat::Text), "false\n");
        assert_eq!(render(&visited, range(5, 7), OutputFormat::Text), "true\n");
    }

    #[test]
    fn json_output() {
        let visited = CoverageSet::from([range(1, 5)]);
        let output: serde_json::Value =
            serde_json::from_str(&render(&visited, range(2, 4), OutputFormat::Json)).unwrap();
        assert_eq!(
            output,
            serde_json::json!({
                "range": { "start_line": 2, "last_line": 4 },
                "contains": true,
            })
        );
    }
}

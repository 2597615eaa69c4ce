use super::OutputFormat;
use std::io::Write;
use tally_lines::{CoverageSet, LineRange};

/// Print the unvisited part of `range`, or `visited` when nothing is left.
pub fn handle(
    visited: &CoverageSet,
    range: LineRange,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let unvisited = visited.get_unvisited(range);
    tracing::debug!(%range, ?unvisited, "unvisited query");

    match format {
        OutputFormat::Json => {
            serde_json::to_writer(
                &mut *out,
                &serde_json::json!({ "range": range, "unvisited": unvisited }),
            )?;
            writeln!(out)?;
        },
        OutputFormat::Text => match unvisited {
            Some(gap) => writeln!(out, "{gap}")?,
            None => writeln!(out, "visited")?,
        },
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
    fn covered_query_prints_visited() {
        let visited = CoverageSet::from([range(1, 5)]);
        assert_eq!(render(&visited, range(2, 4), OutputFormat::Text), "visited\n");
    }

    #[test]
    fn empty_set_returns_whole_query() {
        assert_eq!(
            render(&CoverageSet::new(), range(3, 7), OutputFormat::Text),
            "3-7\n"
        );
    }

    #[test]
    fn json_uses_null_when_visited() {
        let visited = CoverageSet::from([range(1, 5)]);
        let json = |query| -> serde_json::Value {
            serde_json::from_str(&render(&visited, query, OutputFormat::Json)).unwrap()
        };

        assert_eq!(
            json(range(1, 5)),
            serde_json::json!({
                "range": { "start_line": 1, "last_line": 5 },
                "unvisited": null,
            })
        );
        assert_eq!(
            json(range(4, 9)),
            serde_json::json!({
                "range": { "start_line": 4, "last_line": 9 },
                "unvisited": { "start_line": 6, "last_line": 9 },
            })
        );
    }
}

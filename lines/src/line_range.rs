//! Inclusive ranges of line numbers.

use crate::error::{InvalidRangeSnafu, ParseRangeSnafu, Result};
use snafu::{ensure, OptionExt};
use std::{cmp, fmt, ops::RangeInclusive, str::FromStr};

/// A contiguous, inclusive span of lines `[start_line, last_line]`.
///
/// A range always covers at least one line. Raw bounds go through
/// [`LineRange::from_bounds`], so every value in circulation is valid.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawLineRange")
)]
pub struct LineRange {
    start_line: u32,
    last_line: u32,
}

impl LineRange {
    /// Create a range from its first and last line, both inclusive.
    pub fn from_bounds(start_line: u32, last_line: u32) -> Result<Self> {
        ensure!(
            start_line <= last_line,
            InvalidRangeSnafu {
                start: start_line,
                last: last_line,
            }
        );
        Ok(Self {
            start_line,
            last_line,
        })
    }

    /// Callers must already know `start_line <= last_line`.
    pub(crate) fn from_bounds_unchecked(start_line: u32, last_line: u32) -> Self {
        debug_assert!(start_line <= last_line, "{start_line} > {last_line}");
        Self {
            start_line,
            last_line,
        }
    }

    /// A range covering exactly one line.
    pub fn from_line(line: u32) -> Self {
        Self {
            start_line: line,
            last_line: line,
        }
    }

    /// The smallest range covering both `a` and `b`, whether or not they touch.
    pub fn union(a: LineRange, b: LineRange) -> Self {
        Self::from_bounds_unchecked(
            cmp::min(a.start_line, b.start_line),
            cmp::max(a.last_line, b.last_line),
        )
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn last_line(&self) -> u32 {
        self.last_line
    }

    /// Number of lines covered. Never zero.
    pub fn count(&self) -> u64 {
        u64::from(self.last_line - self.start_line) + 1
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.last_line
    }

    pub fn contains(&self, other: LineRange) -> bool {
        self.start_line <= other.start_line && other.last_line <= self.last_line
    }

    /// Whether the two ranges overlap or sit directly next to each other.
    ///
    /// `1-3` and `4-6` intersect under this definition, since together they form the
    /// gapless range `1-6`.
    pub fn intersects(&self, other: LineRange) -> bool {
        other.start_line <= self.last_line.saturating_add(1)
            && self.start_line <= other.last_line.saturating_add(1)
    }

    /// Whether the two ranges share at least one line. Touching is not enough.
    pub fn overlaps(&self, other: LineRange) -> bool {
        other.start_line <= self.last_line && self.start_line <= other.last_line
    }
}

impl fmt::Debug for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_line, self.last_line)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_line, self.last_line)
    }
}

/// Parses `"start-last"` or a lone `"line"`.
impl FromStr for LineRange {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let parse_line = |text: &str| {
            text.trim()
                .parse::<u32>()
                .ok()
                .context(ParseRangeSnafu { input: s })
        };

        match input.split_once('-') {
            Some((start, last)) => Self::from_bounds(parse_line(start)?, parse_line(last)?),
            None => Ok(Self::from_line(parse_line(input)?)),
        }
    }
}

impl TryFrom<RangeInclusive<u32>> for LineRange {
    type Error = crate::Error;

    fn try_from(range: RangeInclusive<u32>) -> Result<Self> {
        Self::from_bounds(*range.start(), *range.end())
    }
}

impl From<LineRange> for RangeInclusive<u32> {
    fn from(range: LineRange) -> Self {
        range.start_line..=range.last_line
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLineRange {
    start_line: u32,
    last_line: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLineRange> for LineRange {
    type Error = crate::Error;

    fn try_from(raw: RawLineRange) -> Result<Self> {
        Self::from_bounds(raw.start_line, raw.last_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn range(start: u32, last: u32) -> LineRange {
        LineRange::from_bounds(start, last).unwrap()
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        assert_eq!(
            LineRange::from_bounds(5, 4),
            Err(Error::InvalidRange { start: 5, last: 4 })
        );
    }

    #[test]
    fn single_line_range() {
        let line = range(7, 7);
        assert_eq!(line, LineRange::from_line(7));
        assert_eq!(line.count(), 1);
        assert!(line.contains_line(7));
        assert!(!line.contains_line(6));
        assert!(!line.contains_line(8));
    }

    #[test]
    fn count_spans_full_u32() {
        assert_eq!(range(0, u32::MAX).count(), u64::from(u32::MAX) + 1);
        assert_eq!(range(3, 9).count(), 7);
    }

    #[test]
    fn union_covers_gap_between_ranges() {
        assert_eq!(LineRange::union(range(1, 3), range(7, 9)), range(1, 9));
        assert_eq!(LineRange::union(range(7, 9), range(1, 3)), range(1, 9));
        assert_eq!(LineRange::union(range(1, 9), range(4, 5)), range(1, 9));
    }

    #[test]
    fn contains_range() {
        let outer = range(2, 8);
        assert!(outer.contains(range(2, 8)));
        assert!(outer.contains(range(3, 4)));
        assert!(!outer.contains(range(1, 4)));
        assert!(!outer.contains(range(7, 9)));
    }

    #[test]
    fn adjacent_ranges_intersect() {
        assert!(range(1, 3).intersects(range(4, 6)));
        assert!(range(4, 6).intersects(range(1, 3)));
        assert!(range(1, 3).intersects(range(3, 6)));
        assert!(!range(1, 3).intersects(range(5, 6)));
        assert!(!range(5, 6).intersects(range(1, 3)));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!range(1, 3).overlaps(range(4, 6)));
        assert!(!range(4, 6).overlaps(range(1, 3)));
        assert!(range(1, 3).overlaps(range(3, 6)));
        assert!(range(2, 8).overlaps(range(4, 5)));
        assert!(range(4, 5).overlaps(range(2, 8)));
        assert!(!range(1, 3).overlaps(range(5, 6)));
    }

    #[test]
    fn intersects_at_numeric_limits() {
        let top = range(u32::MAX - 1, u32::MAX);
        assert!(top.intersects(LineRange::from_line(u32::MAX)));
        assert!(top.intersects(range(0, u32::MAX - 2)));
        assert!(!top.intersects(range(0, u32::MAX - 3)));
    }

    #[test]
    fn parse_ranges() {
        assert_eq!("1-3".parse::<LineRange>(), Ok(range(1, 3)));
        assert_eq!(" 4 - 9 ".parse::<LineRange>(), Ok(range(4, 9)));
        assert_eq!("12".parse::<LineRange>(), Ok(LineRange::from_line(12)));
        assert_eq!(
            "9-4".parse::<LineRange>(),
            Err(Error::InvalidRange { start: 9, last: 4 })
        );
        assert!(matches!(
            "x-4".parse::<LineRange>(),
            Err(Error::ParseRange { .. })
        ));
        assert!(matches!(
            "-4".parse::<LineRange>(),
            Err(Error::ParseRange { .. })
        ));
        assert!(matches!("".parse::<LineRange>(), Err(Error::ParseRange { .. })));
    }

    #[test]
    fn display_matches_parse_format() {
        let r = range(10, 20);
        assert_eq!(r.to_string(), "10-20");
        assert_eq!(format!("{r:?}"), "10-20");
    }

    #[test]
    fn inclusive_range_conversions() {
        assert_eq!(LineRange::try_from(2..=5), Ok(range(2, 5)));
        assert!(LineRange::try_from(5..=2).is_err());
        assert_eq!(RangeInclusive::from(range(2, 5)), 2..=5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_revalidates_bounds() {
        let json = serde_json::to_string(&range(1, 3)).unwrap();
        assert_eq!(json, r#"{"start_line":1,"last_line":3}"#);
        assert_eq!(serde_json::from_str::<LineRange>(&json).unwrap(), range(1, 3));
        assert!(serde_json::from_str::<LineRange>(r#"{"start_line":3,"last_line":1}"#).is_err());
    }
}

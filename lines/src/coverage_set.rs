//! Sorted, coalesced sets of visited line ranges.
//!
//! A [`CoverageSet`] is what incremental line-oriented passes (folding scans,
//! highlighting, change tracking) consult before doing work: it answers whether a span
//! of lines was already handled and, if not, which part of it still needs handling.
//!
//! Entries are kept sorted by start line, and no two entries overlap or touch. Every
//! [`CoverageSet::add`] restores that shape before returning, so the set is always the
//! minimal description of the lines it covers.

use crate::{
    error::{IndexOutOfRangeSnafu, Result},
    line_range::LineRange,
};
use smallvec::SmallVec;
use snafu::OptionExt;
use std::{fmt, ops::Index, slice};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CoverageSet {
    entries: SmallVec<[LineRange; 4]>,
}

impl CoverageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set by adding each range in turn.
    ///
    /// The result is the same canonical set whatever order or overlap the input has.
    pub fn from_ranges(ranges: impl IntoIterator<Item = LineRange>) -> Self {
        let mut set = Self::new();
        set.extend(ranges);
        set
    }

    /// Record `range` as visited, merging it with every entry it overlaps or touches.
    ///
    /// A range can bridge any number of existing entries: adding `5-5` to `{1-4, 6-9}`
    /// leaves the single entry `1-9`.
    pub fn add(&mut self, range: LineRange) {
        let index = match self.find_insertion_point(range.start_line()) {
            None => {
                self.entries.push(range);
                self.entries.len() - 1
            },
            Some(index) => {
                let existing = self.entries[index];
                // `existing` never starts before `range`, so this also covers equal starts.
                if range.contains_line(existing.start_line()) {
                    self.entries[index] = LineRange::union(existing, range);
                } else {
                    self.entries.insert(index, range);
                }
                index
            },
        };

        self.collapse_intersecting(index);

        tracing::trace!(
            %range,
            index,
            entries = self.entries.len(),
            "added visited range"
        );
    }

    /// Whether a single entry covers all of `range`.
    ///
    /// Since entries never touch, this is the same as every line of `range` having been
    /// visited.
    pub fn contains(&self, range: LineRange) -> bool {
        self.entries.iter().any(|entry| entry.contains(range))
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.find_entry_for_line(line).is_some()
    }

    /// The part of `range` not known to be visited, or `None` if it is fully covered.
    ///
    /// Only the first entry sharing a line with `range` is considered. An entry that merely
    /// touches `range` leaves all of it unvisited, so it never decides the answer. If
    /// `range` straddles several entries, the returned sub-range may itself contain visited
    /// lines; its first line is always unvisited, and every line of `range` before it is
    /// visited. Callers handle the returned span, [`add`](Self::add) it, and ask again.
    pub fn get_unvisited(&self, range: LineRange) -> Option<LineRange> {
        let Some(entry) = self.entries.iter().find(|entry| entry.overlaps(range)) else {
            return Some(range);
        };

        if entry.contains(range) {
            return None;
        }

        let (start, last) = if entry.start_line() <= range.start_line() {
            (entry.last_line() + 1, range.last_line())
        } else {
            (range.start_line(), entry.start_line() - 1)
        };

        // Both branches stay inside `range`: an entry reaching the start of `range`
        // without containing it ends before `range.last_line()`, and an entry starting
        // after `range.start_line()` has a line before it.
        Some(LineRange::from_bounds_unchecked(start, last))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// A deep copy for speculative mutation without disturbing `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<LineRange> {
        self.entries.get(index).copied().context(IndexOutOfRangeSnafu {
            index,
            len: self.entries.len(),
        })
    }

    /// The smallest range bounding every entry. It may contain unvisited gaps.
    pub fn overarching_range(&self) -> Option<LineRange> {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => Some(LineRange::union(*first, *last)),
            _ => None,
        }
    }

    /// Total number of visited lines.
    pub fn line_count(&self) -> u64 {
        self.entries.iter().map(LineRange::count).sum()
    }

    pub fn iter(&self) -> slice::Iter<'_, LineRange> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LineRange] {
        &self.entries
    }

    /// Index of the first entry starting at or after `start_line`.
    fn find_insertion_point(&self, start_line: u32) -> Option<usize> {
        let index = self
            .entries
            .partition_point(|entry| entry.start_line() < start_line);
        (index < self.entries.len()).then_some(index)
    }

    fn find_entry_for_line(&self, line: u32) -> Option<&LineRange> {
        let index = self
            .entries
            .partition_point(|entry| entry.last_line() < line);
        self.entries
            .get(index)
            .filter(|entry| entry.contains_line(line))
    }

    /// Merge the entry at `index` with every neighbour it intersects.
    ///
    /// Entries other than the one at `index` are already pairwise disjoint, so only a
    /// contiguous run around `index` can need merging.
    fn collapse_intersecting(&mut self, mut index: usize) {
        while index > 0 && self.entries[index - 1].intersects(self.entries[index]) {
            index -= 1;
        }

        let mut merged = self.entries[index];
        let mut end = index + 1;
        while end < self.entries.len() && merged.intersects(self.entries[end]) {
            merged = LineRange::union(merged, self.entries[end]);
            end += 1;
        }

        self.entries[index] = merged;
        if end > index + 1 {
            self.entries.drain(index + 1..end);
        }
    }
}

impl fmt::Debug for CoverageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

/// Panics if `index` is out of range, like slice indexing. See [`CoverageSet::get`].
impl Index<usize> for CoverageSet {
    type Output = LineRange;

    fn index(&self, index: usize) -> &LineRange {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a CoverageSet {
    type Item = &'a LineRange;
    type IntoIter = slice::Iter<'a, LineRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<LineRange> for CoverageSet {
    fn extend<I: IntoIterator<Item = LineRange>>(&mut self, iter: I) {
        for range in iter {
            self.add(range);
        }
    }
}

impl FromIterator<LineRange> for CoverageSet {
    fn from_iter<I: IntoIterator<Item = LineRange>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}

impl From<Vec<LineRange>> for CoverageSet {
    fn from(ranges: Vec<LineRange>) -> Self {
        Self::from_ranges(ranges)
    }
}

impl From<&[LineRange]> for CoverageSet {
    fn from(ranges: &[LineRange]) -> Self {
        Self::from_ranges(ranges.iter().copied())
    }
}

impl<const N: usize> From<[LineRange; N]> for CoverageSet {
    fn from(ranges: [LineRange; N]) -> Self {
        Self::from_ranges(ranges)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CoverageSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

/// Input need not be canonical; it is coalesced on the way in.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CoverageSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ranges = <Vec<LineRange> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_ranges(ranges))
    }
}

//! Line-range coverage tracking.
//!
//! A [`CoverageSet`] remembers which spans of lines in a document have already been
//! visited, keeping its entries sorted and maximally coalesced so that callers can
//! cheaply ask whether a span still needs work before doing it.
//!
//! ```
//! use tally_lines::{CoverageSet, LineRange};
//!
//! let mut visited = CoverageSet::new();
//! visited.add(LineRange::from_bounds(1, 3)?);
//! visited.add(LineRange::from_bounds(4, 6)?);
//!
//! assert_eq!(visited.len(), 1);
//! assert!(visited.contains(LineRange::from_bounds(2, 5)?));
//! # Ok::<(), tally_lines::Error>(())
//! ```

pub mod coverage_set;
pub mod error;
pub mod line_range;

pub use coverage_set::CoverageSet;
pub use error::{Error, Result};
pub use line_range::LineRange;

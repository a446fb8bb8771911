//! Sparse code point index.
//!
//! Most fonts only cover a handful of disjoint ranges (ASCII, Latin-1, a
//! symbol block), so code points are resolved through a short sorted table
//! of `(first, last, offset)` intervals rather than a dense map.

use super::UnicodeInterval;
use crate::error::ParseError;

/// Zero-copy view over the encoded interval table.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTable<'a> {
    bytes: &'a [u8],
}

impl<'a> IntervalTable<'a> {
    /// `bytes` must hold a whole number of interval records.
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % UnicodeInterval::SIZE, 0);
        Self { bytes }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.bytes.len() / UnicodeInterval::SIZE
    }

    /// True if the font maps no code points at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Interval at position `index`.
    pub fn get(&self, index: usize) -> Option<UnicodeInterval> {
        let start = index.checked_mul(UnicodeInterval::SIZE)?;
        let record = self
            .bytes
            .get(start..start.checked_add(UnicodeInterval::SIZE)?)?;
        Some(UnicodeInterval::read(record))
    }

    /// Iterate intervals in table order.
    pub fn iter(&self) -> impl Iterator<Item = UnicodeInterval> + 'a {
        self.bytes
            .chunks_exact(UnicodeInterval::SIZE)
            .map(UnicodeInterval::read)
    }

    /// Find the interval containing `code_point`.
    ///
    /// Binary search for the first interval whose `last` is not below the
    /// code point. Intervals are sorted and disjoint, so that is the only
    /// candidate.
    pub fn find(&self, code_point: u32) -> Option<UnicodeInterval> {
        let mut lo = 0;
        let mut hi = self.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let interval = self.get(mid)?;
            if interval.last < code_point {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        self.get(lo).filter(|interval| interval.contains(code_point))
    }

    /// Resolve `code_point` to an index into the glyph table.
    pub fn resolve(&self, code_point: u32) -> Option<usize> {
        self.find(code_point)?.glyph_index(code_point)
    }

    /// Number of code points covered by all intervals.
    pub fn code_point_count(&self) -> u64 {
        self.iter()
            .map(|iv| (iv.last as u64).saturating_sub(iv.first as u64) + 1)
            .sum()
    }

    /// Check ordering, overlap and glyph-table bounds.
    pub(crate) fn validate(&self, glyph_count: u32) -> Result<(), ParseError> {
        let mut previous: Option<UnicodeInterval> = None;
        for (i, interval) in self.iter().enumerate() {
            if interval.first > interval.last {
                return Err(ParseError::Malformed(format!(
                    "interval {} has first U+{:04X} after last U+{:04X}",
                    i, interval.first, interval.last
                )));
            }
            if let Some(prev) = previous {
                if interval.first <= prev.last {
                    return Err(ParseError::Malformed(format!(
                        "interval {} starting at U+{:04X} overlaps or precedes U+{:04X}",
                        i, interval.first, prev.last
                    )));
                }
            }
            let end = interval.offset as u64 + (interval.last - interval.first) as u64;
            if end >= glyph_count as u64 {
                return Err(ParseError::Malformed(format!(
                    "interval {} maps to glyph {} but font has {} glyphs",
                    i, end, glyph_count
                )));
            }
            previous = Some(interval);
        }
        Ok(())
    }
}

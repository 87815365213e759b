use std::fmt;

/// Inclusive span of document rows, `[start, end]`.
///
/// Rows are zero-indexed line numbers. A range always covers at least one
/// row; `start <= end` is required by [`RowRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub start: u32,
    pub end: u32,
}

impl RowRange {
    /// Create a range covering rows `start` through `end`, both inclusive.
    ///
    /// # Panics
    ///
    /// Panics when `start > end`. An inverted range has no sensible
    /// containment or disjointness answers, so it is rejected outright.
    pub fn new(start: u32, end: u32) -> Self {
        assert!(start <= end, "inverted row range {start}..{end}");
        Self { start, end }
    }

    /// Whether `row` falls inside this range, endpoints included.
    pub fn contains(&self, row: u32) -> bool {
        self.start <= row && row <= self.end
    }

    /// Whether `other` nests inside this range without being equal to it.
    ///
    /// Sharing an endpoint still counts as strict containment as long as
    /// the ranges differ: `[5, 10]` strictly contains `[5, 6]`.
    pub fn strictly_contains(&self, other: &RowRange) -> bool {
        self.start <= other.start && other.end <= self.end && self != other
    }

    /// Whether the two ranges share no rows at all.
    pub fn is_disjoint(&self, other: &RowRange) -> bool {
        self.end < other.start || other.end < self.start
    }

    /// The forbidden relation: the ranges share rows but neither contains
    /// the other and they are not equal. Inserting such a range would
    /// corrupt the containment forest, so callers test for it up front.
    pub fn partially_overlaps(&self, other: &RowRange) -> bool {
        !self.is_disjoint(other)
            && self != other
            && !self.strictly_contains(other)
            && !other.strictly_contains(self)
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

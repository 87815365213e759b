//! In-memory host collaborators.
//!
//! [`ReportBuffer`] and [`StubGutter`] implement the host seams without a
//! UI. The test suites run the controller against them, and a headless
//! embedder (or a prototype renderer) can do the same; they keep enough
//! bookkeeping to answer "what would a display show" questions.

use crate::host::{Glyph, HostDocument, IndicatorProvider};
use pleat_tree::RowRange;

/// Line storage plus fold units, identified by their full row span.
///
/// A fold unit hides every row of its range except the header. Units may
/// nest, including units sharing a header row; a row is hidden if any
/// unit covers it below the header.
#[derive(Debug, Default)]
pub struct ReportBuffer {
    lines: Vec<String>,
    folds: Vec<RowRange>,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, returning the row it landed on.
    pub fn push_line(&mut self, text: impl Into<String>) -> u32 {
        self.lines.push(text.into());
        (self.lines.len() - 1) as u32
    }

    /// Drop all content and all fold units.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.folds.clear();
    }

    pub fn line(&self, row: u32) -> Option<&str> {
        self.lines.get(row as usize).map(String::as_str)
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// The fold units currently applied, in application order.
    pub fn folded_units(&self) -> &[RowRange] {
        &self.folds
    }

    /// Rows a display would show: every row not hidden inside a fold unit.
    /// Unit headers stay visible.
    pub fn visible_rows(&self) -> Vec<u32> {
        (0..self.line_count())
            .filter(|&row| !self.is_row_hidden(row))
            .collect()
    }

    /// Whether `row` sits inside any applied unit, header row included.
    pub fn is_row_folded(&self, row: u32) -> bool {
        self.folds.iter().any(|unit| unit.contains(row))
    }

    fn is_row_hidden(&self, row: u32) -> bool {
        self.folds
            .iter()
            .any(|unit| unit.start < row && row <= unit.end)
    }
}

impl HostDocument for ReportBuffer {
    fn last_row(&self) -> u32 {
        self.line_count().saturating_sub(1)
    }

    fn is_range_folded(&self, range: RowRange) -> bool {
        self.folds.contains(&range)
    }

    fn fold_range(&mut self, range: RowRange) {
        if !self.folds.contains(&range) {
            self.folds.push(range);
        }
    }

    fn unfold_range(&mut self, range: RowRange) {
        self.folds.retain(|unit| *unit != range);
    }
}

/// Handle to one [`StubGutter`] indicator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorId(usize);

#[derive(Debug)]
struct Slot {
    row: u32,
    glyph: Glyph,
    toggles_row: Option<u32>,
    alive: bool,
}

/// Recording indicator provider.
///
/// Every created indicator gets a slot that outlives its destruction, so
/// tests can assert on lifecycle accounting: [`StubGutter::destroyed_count`]
/// and [`StubGutter::double_destroys`] catch leaks and double releases.
#[derive(Debug, Default)]
pub struct StubGutter {
    slots: Vec<Slot>,
    destroyed: usize,
    double_destroys: usize,
}

impl StubGutter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.alive).count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// How many times a handle was destroyed after already being dead.
    /// Stays 0 when the controller honors the release-once contract.
    pub fn double_destroys(&self) -> usize {
        self.double_destroys
    }

    /// Current glyph of the live indicator on `row`, if one exists.
    pub fn glyph_at_row(&self, row: u32) -> Option<Glyph> {
        self.slots
            .iter()
            .find(|slot| slot.alive && slot.row == row)
            .map(|slot| slot.glyph)
    }

    /// The toggle row wired to the live indicator on `row`. This is what
    /// an input layer reads back when the user activates the indicator.
    pub fn activation_row(&self, row: u32) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| slot.alive && slot.row == row)
            .and_then(|slot| slot.toggles_row)
    }
}

impl IndicatorProvider for StubGutter {
    type Handle = IndicatorId;

    fn create_indicator(&mut self, row: u32) -> IndicatorId {
        self.slots.push(Slot {
            row,
            glyph: Glyph::Expanded,
            toggles_row: None,
            alive: true,
        });
        IndicatorId(self.slots.len() - 1)
    }

    fn set_glyph(&mut self, handle: &IndicatorId, glyph: Glyph) {
        self.slots[handle.0].glyph = glyph;
    }

    fn on_activate(&mut self, handle: &IndicatorId, row: u32) {
        self.slots[handle.0].toggles_row = Some(row);
    }

    fn destroy_indicator(&mut self, handle: IndicatorId) {
        let slot = &mut self.slots[handle.0];
        if slot.alive {
            slot.alive = false;
            self.destroyed += 1;
        } else {
            self.double_destroys += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_line_returns_consecutive_rows() {
        let mut buffer = ReportBuffer::new();
        assert_eq!(buffer.push_line("first"), 0);
        assert_eq!(buffer.push_line("second"), 1);
        assert_eq!(buffer.line(1), Some("second"));
        assert_eq!(buffer.last_row(), 1);
    }

    #[test]
    fn empty_buffer_reports_row_zero_as_last() {
        let buffer = ReportBuffer::new();
        assert_eq!(buffer.last_row(), 0);
        assert!(buffer.visible_rows().is_empty());
    }

    #[test]
    fn fold_unit_hides_everything_but_its_header() {
        let mut buffer = ReportBuffer::new();
        for i in 0..6 {
            buffer.push_line(format!("line {i}"));
        }
        buffer.fold_range(RowRange::new(1, 3));

        assert_eq!(buffer.visible_rows(), vec![0, 1, 4, 5]);
        assert!(buffer.is_row_folded(1));
        assert!(buffer.is_row_folded(3));
        assert!(!buffer.is_row_folded(4));
    }

    #[test]
    fn folding_the_same_header_twice_is_idempotent() {
        let mut buffer = ReportBuffer::new();
        for i in 0..6 {
            buffer.push_line(format!("line {i}"));
        }
        buffer.fold_range(RowRange::new(1, 3));
        buffer.fold_range(RowRange::new(1, 3));

        assert_eq!(buffer.folded_units().len(), 1);
    }

    #[test]
    fn unfold_range_removes_only_the_matching_unit() {
        let mut buffer = ReportBuffer::new();
        for i in 0..10 {
            buffer.push_line(format!("line {i}"));
        }
        buffer.fold_range(RowRange::new(5, 6));
        buffer.fold_range(RowRange::new(4, 9));

        buffer.unfold_range(RowRange::new(4, 9));
        // The nested unit survives, so its rows stay hidden.
        assert_eq!(buffer.folded_units(), &[RowRange::new(5, 6)]);
        assert_eq!(buffer.visible_rows(), vec![0, 1, 2, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn units_sharing_a_header_row_fold_and_unfold_independently() {
        let mut buffer = ReportBuffer::new();
        for i in 0..10 {
            buffer.push_line(format!("line {i}"));
        }
        buffer.fold_range(RowRange::new(4, 6));
        buffer.fold_range(RowRange::new(4, 9));
        assert!(buffer.is_range_folded(RowRange::new(4, 6)));
        assert!(buffer.is_range_folded(RowRange::new(4, 9)));

        buffer.unfold_range(RowRange::new(4, 9));
        assert_eq!(buffer.folded_units(), &[RowRange::new(4, 6)]);
        assert_eq!(buffer.visible_rows(), vec![0, 1, 2, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn gutter_records_glyphs_and_activation_wiring() {
        let mut gutter = StubGutter::new();
        let handle = gutter.create_indicator(4);
        gutter.on_activate(&handle, 4);
        gutter.set_glyph(&handle, Glyph::Collapsed);

        assert_eq!(gutter.glyph_at_row(4), Some(Glyph::Collapsed));
        assert_eq!(gutter.activation_row(4), Some(4));
        assert_eq!(gutter.live_count(), 1);
    }

    #[test]
    fn gutter_counts_double_destroys() {
        let mut gutter = StubGutter::new();
        let handle = gutter.create_indicator(0);
        gutter.destroy_indicator(handle);
        gutter.destroy_indicator(handle);

        assert_eq!(gutter.destroyed_count(), 1);
        assert_eq!(gutter.double_destroys(), 1);
        assert_eq!(gutter.live_count(), 0);
    }
}

//! Collaborator seams: the document that folds rows and the provider that
//! draws per-section indicators.
//!
//! Both traits describe the minimum surface the controller needs from a
//! host. They are assumed idempotent and to share the controller's
//! zero-indexed row numbering.

use pleat_tree::{FoldState, RowRange};
use std::fmt;

/// What a section's indicator shows.
///
/// A two-state tag rather than a raw character, so the controller stays
/// decoupled from presentation; hosts that want the conventional markers
/// can use [`Glyph::marker`] or the `Display` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Expanded,
    Collapsed,
}

impl Glyph {
    /// The conventional gutter characters: `▼` expanded, `▶` collapsed.
    pub fn marker(self) -> char {
        match self {
            Glyph::Expanded => '\u{25bc}',
            Glyph::Collapsed => '\u{25b6}',
        }
    }
}

impl From<FoldState> for Glyph {
    fn from(state: FoldState) -> Self {
        match state {
            FoldState::Expanded => Glyph::Expanded,
            FoldState::Collapsed => Glyph::Collapsed,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// The text surface holding the rendered report.
pub trait HostDocument {
    /// Last row of the document, zero-indexed. An empty document reports 0.
    fn last_row(&self) -> u32;

    /// Whether `range` is currently applied as a fold unit of its own.
    /// Units are identified by their full span, not just the header row,
    /// so a nested unit sharing its parent's header never answers for the
    /// parent.
    fn is_range_folded(&self, range: RowRange) -> bool;

    /// Fold `range` as one collapsed unit, showing only its header row.
    /// Folding an already-folded range is a no-op.
    fn fold_range(&mut self, range: RowRange);

    /// Remove exactly the fold unit spanning `range`, leaving units nested
    /// inside it folded. No-op when no such unit is applied.
    fn unfold_range(&mut self, range: RowRange);
}

/// Owner of the per-section indicator glyphs (a gutter, in a real host).
pub trait IndicatorProvider {
    /// Opaque handle to one indicator. Owned by the section's node; handed
    /// back to [`IndicatorProvider::destroy_indicator`] exactly once.
    type Handle;

    fn create_indicator(&mut self, row: u32) -> Self::Handle;

    fn set_glyph(&mut self, handle: &Self::Handle, glyph: Glyph);

    /// Wire user activation of this indicator to a toggle row: the input
    /// layer reads the registered row back and calls
    /// [`FoldManager::toggle`](crate::FoldManager::toggle) with it. The
    /// dispatch stays single-threaded and synchronous; the provider never
    /// calls back into the controller itself.
    fn on_activate(&mut self, handle: &Self::Handle, row: u32);

    fn destroy_indicator(&mut self, handle: Self::Handle);
}

//! The fold controller: resolves rows to sections and toggles them with
//! cascading indicator updates.
//!
//! # Stored state vs. visible glyph
//!
//! The subtlest behavior here is the divergence between a section's stored
//! [`FoldState`] and the glyph its indicator shows. Collapsing a parent
//! paints every descendant's glyph collapsed but leaves the descendants'
//! stored state alone; expanding the parent restores each glyph from the
//! stored state, so a child the user collapsed individually keeps its rows
//! hidden and its glyph collapsed while the parent opens around it. Only a
//! toggle that reaches a node directly ever changes that node's stored
//! state.

use crate::host::{Glyph, HostDocument, IndicatorProvider};
use pleat_tree::{FoldNode, FoldState, FoldTree, InsertError, RowRange};

/// One controller per host document.
///
/// Owns the containment forest, the document, and the indicator provider;
/// all operations are synchronous and run on the caller's thread.
pub struct FoldManager<D: HostDocument, P: IndicatorProvider> {
    document: D,
    indicators: P,
    tree: FoldTree<P::Handle>,
}

impl<D: HostDocument, P: IndicatorProvider> FoldManager<D, P> {
    /// Bind a controller to `document`, with an empty forest spanning the
    /// document's current extent.
    pub fn new(document: D, indicators: P) -> Self {
        let tree = FoldTree::new(RowRange::new(0, document.last_row()));
        Self {
            document,
            indicators,
            tree,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn indicators(&self) -> &P {
        &self.indicators
    }

    /// Number of registered sections.
    pub fn section_count(&self) -> usize {
        self.tree.len()
    }

    /// The innermost registered section containing `row`, if any.
    pub fn section_at(&self, row: u32) -> Option<RowRange> {
        self.tree.find_owner(row).map(|node| node.range())
    }

    /// Register a section spanning `range`, creating its indicator at the
    /// range's first row and wiring activation back to that row.
    ///
    /// Rejects ranges that duplicate or partially overlap a registered
    /// section; the freshly created indicator is destroyed before the
    /// error is returned, so a rejected call leaves no trace.
    pub fn add(&mut self, range: RowRange) -> Result<(), InsertError> {
        let handle = self.indicators.create_indicator(range.start);
        self.indicators.set_glyph(&handle, Glyph::Expanded);
        self.indicators.on_activate(&handle, range.start);

        match self.tree.insert(FoldNode::new(range, handle)) {
            Ok(()) => Ok(()),
            Err(rejected) => {
                tracing::debug!(range = %range, reason = %rejected.reason, "rejected fold section");
                if let Some(handle) = rejected.node.into_indicator() {
                    self.indicators.destroy_indicator(handle);
                }
                Err(rejected.reason)
            }
        }
    }

    /// Toggle the innermost section owning `row`.
    ///
    /// Returns `false` without side effects when the row belongs only to
    /// the synthetic root, which is how "nothing to fold here" is
    /// reported. Otherwise folds or unfolds the owning section and returns
    /// `true` regardless of direction.
    pub fn toggle(&mut self, row: u32) -> bool {
        let Some(node) = self.tree.find_owner_mut(row) else {
            tracing::trace!(row, "no fold section owns row");
            return false;
        };
        if self.document.is_range_folded(node.range()) {
            expand(node, &mut self.document, &mut self.indicators);
        } else {
            collapse(node, &mut self.document, &mut self.indicators);
        }
        true
    }

    /// Destroy the forest and rebuild it against the document's current
    /// extent, releasing every indicator exactly once.
    ///
    /// Must run before the document's text is wholly replaced; stale
    /// ranges would otherwise point at rows of unrelated content.
    pub fn reset(&mut self) {
        let extent = RowRange::new(0, self.document.last_row());
        tracing::debug!(extent = %extent, "resetting fold forest");
        let indicators = &mut self.indicators;
        self.tree
            .reset(extent, |handle| indicators.destroy_indicator(handle));
    }

    /// Tear the controller down, releasing every indicator, and hand the
    /// document and provider back.
    pub fn destroy(self) -> (D, P) {
        let Self {
            document,
            mut indicators,
            tree,
        } = self;
        tree.destroy(|handle| indicators.destroy_indicator(handle));
        (document, indicators)
    }
}

fn collapse<D: HostDocument, P: IndicatorProvider>(
    node: &mut FoldNode<P::Handle>,
    document: &mut D,
    indicators: &mut P,
) {
    // The glyph cascade must run before the parent fold lands, while the
    // document can still report which descendants are folded on their own.
    hide_descendants::<D, P>(node.children(), document, indicators);
    document.fold_range(node.range());
    node.set_fold_state(FoldState::Collapsed);
    if let Some(handle) = node.indicator() {
        indicators.set_glyph(handle, Glyph::Collapsed);
    }
    tracing::trace!(range = %node.range(), "collapsed section");
}

fn expand<D: HostDocument, P: IndicatorProvider>(
    node: &mut FoldNode<P::Handle>,
    document: &mut D,
    indicators: &mut P,
) {
    document.unfold_range(node.range());
    node.set_fold_state(FoldState::Expanded);
    if let Some(handle) = node.indicator() {
        indicators.set_glyph(handle, Glyph::Expanded);
    }
    show_descendants::<P>(node.children(), indicators);
    tracing::trace!(range = %node.range(), "expanded section");
}

fn hide_descendants<D: HostDocument, P: IndicatorProvider>(
    children: &[FoldNode<P::Handle>],
    document: &D,
    indicators: &mut P,
) {
    for child in children {
        // A child folded on its own keeps its subtree as-is: the glyph
        // already shows collapsed and the rows stay hidden.
        if document.is_range_folded(child.range()) {
            continue;
        }
        if let Some(handle) = child.indicator() {
            indicators.set_glyph(handle, Glyph::Collapsed);
        }
        hide_descendants::<D, P>(child.children(), document, indicators);
    }
}

fn show_descendants<P: IndicatorProvider>(children: &[FoldNode<P::Handle>], indicators: &mut P) {
    for child in children {
        if let Some(handle) = child.indicator() {
            indicators.set_glyph(handle, child.fold_state().into());
        }
        // A still-collapsed child is not forced open; its subtree keeps
        // whatever glyphs its own last toggle left behind.
        if child.fold_state() == FoldState::Expanded {
            show_descendants::<P>(child.children(), indicators);
        }
    }
}

use crate::range::RowRange;

/// Stored fold state of a section, independent of what its glyph shows.
///
/// During a cascade an ancestor may paint a descendant's glyph collapsed
/// while the descendant's own state stays `Expanded`; re-expanding the
/// ancestor restores the glyph from this stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldState {
    #[default]
    Expanded,
    Collapsed,
}

/// One foldable section in the containment forest.
///
/// A node owns its inclusive [`RowRange`], an opaque indicator handle `H`
/// (absent only on the synthetic root), its stored [`FoldState`], and its
/// children as an explicit ordered sequence. Children are pairwise
/// disjoint and strictly contained in the node's range;
/// [`FoldTree`](crate::FoldTree) enforces that on every insertion.
#[derive(Debug)]
pub struct FoldNode<H> {
    range: RowRange,
    indicator: Option<H>,
    fold_state: FoldState,
    children: Vec<FoldNode<H>>,
}

impl<H> FoldNode<H> {
    /// Create a section node. Starts expanded, with no children.
    pub fn new(range: RowRange, indicator: H) -> Self {
        Self {
            range,
            indicator: Some(indicator),
            fold_state: FoldState::Expanded,
            children: Vec::new(),
        }
    }

    /// The synthetic root: no indicator, never toggled.
    pub(crate) fn sentinel(range: RowRange) -> Self {
        Self {
            range,
            indicator: None,
            fold_state: FoldState::Expanded,
            children: Vec::new(),
        }
    }

    pub fn range(&self) -> RowRange {
        self.range
    }

    pub fn fold_state(&self) -> FoldState {
        self.fold_state
    }

    pub fn set_fold_state(&mut self, state: FoldState) {
        self.fold_state = state;
    }

    pub fn indicator(&self) -> Option<&H> {
        self.indicator.as_ref()
    }

    /// Reclaim the indicator handle, consuming the node.
    ///
    /// Used on the insertion error path, where the node was never attached
    /// and has no children.
    pub fn into_indicator(self) -> Option<H> {
        self.indicator
    }

    pub fn children(&self) -> &[FoldNode<H>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<FoldNode<H>> {
        &mut self.children
    }

    /// Post-order handle release: children first, then this node's own
    /// indicator. Each handle is handed to `release` exactly once.
    pub(crate) fn drain_indicators(self, release: &mut impl FnMut(H)) {
        for child in self.children {
            child.drain_indicators(release);
        }
        if let Some(handle) = self.indicator {
            release(handle);
        }
    }
}

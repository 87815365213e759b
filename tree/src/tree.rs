use crate::{
    error::{InsertError, InsertRejected},
    node::FoldNode,
    range::RowRange,
};

/// The containment forest, anchored at one synthetic root.
///
/// The root's range is the full document extent, `[0, last_row]`, and is
/// treated as the universal container: every registered range nests under
/// it, and lookups never return it. The root carries no indicator and its
/// fold state is meaningless.
#[derive(Debug)]
pub struct FoldTree<H> {
    root: FoldNode<H>,
}

impl<H> FoldTree<H> {
    /// An empty tree over the given document extent.
    pub fn new(extent: RowRange) -> Self {
        Self {
            root: FoldNode::sentinel(extent),
        }
    }

    /// The document extent the root was built against.
    pub fn extent(&self) -> RowRange {
        self.root.range()
    }

    /// The top-level sections, in insertion-adjusted order.
    pub fn sections(&self) -> &[FoldNode<H>] {
        self.root.children()
    }

    /// Number of registered sections, the root excluded.
    pub fn len(&self) -> usize {
        fn count<H>(children: &[FoldNode<H>]) -> usize {
            children.iter().map(|c| 1 + count(c.children())).sum()
        }
        count(self.root.children())
    }

    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// Insert a section node, preserving the containment invariants.
    ///
    /// Descends into the unique child that strictly contains the new range
    /// until no such child exists, then adopts every current child the new
    /// range subsumes (a single new range may take over multiple formerly
    /// sibling ranges) and attaches the node. O(depth × branching); report
    /// sections arrive roughly in document order, which keeps the forest
    /// shallow, but correctness does not depend on that.
    ///
    /// Rejects exact duplicates and partial overlaps before any mutation,
    /// handing the node back inside [`InsertRejected`].
    pub fn insert(&mut self, node: FoldNode<H>) -> Result<(), InsertRejected<H>> {
        let range = node.range();
        insert_under(&mut self.root, node)?;
        tracing::trace!(range = %range, "inserted fold range");
        Ok(())
    }

    /// The innermost node whose range contains `row`, or `None` when only
    /// the root does.
    pub fn find_owner(&self, row: u32) -> Option<&FoldNode<H>> {
        let child = self
            .root
            .children()
            .iter()
            .find(|c| c.range().contains(row))?;
        Some(innermost(child, row))
    }

    /// Mutable variant of [`FoldTree::find_owner`].
    pub fn find_owner_mut(&mut self, row: u32) -> Option<&mut FoldNode<H>> {
        let idx = self
            .root
            .children()
            .iter()
            .position(|c| c.range().contains(row))?;
        Some(innermost_mut(&mut self.root.children_mut()[idx], row))
    }

    /// Tear the forest down and rebuild the root over a new extent.
    ///
    /// Every indicator handle is handed to `release` exactly once,
    /// children before parents. Call this before the document's text is
    /// wholly replaced, or stale ranges would point at unrelated rows.
    pub fn reset(&mut self, extent: RowRange, mut release: impl FnMut(H)) {
        let old = std::mem::replace(&mut self.root, FoldNode::sentinel(extent));
        old.drain_indicators(&mut release);
    }

    /// Consume the tree, releasing every indicator handle post-order.
    pub fn destroy(self, mut release: impl FnMut(H)) {
        self.root.drain_indicators(&mut release);
    }
}

fn innermost<'a, H>(node: &'a FoldNode<H>, row: u32) -> &'a FoldNode<H> {
    match node.children().iter().find(|c| c.range().contains(row)) {
        Some(child) => innermost(child, row),
        None => node,
    }
}

fn innermost_mut<H>(node: &mut FoldNode<H>, row: u32) -> &mut FoldNode<H> {
    match node
        .children()
        .iter()
        .position(|c| c.range().contains(row))
    {
        Some(idx) => innermost_mut(&mut node.children_mut()[idx], row),
        None => node,
    }
}

fn insert_under<H>(parent: &mut FoldNode<H>, node: FoldNode<H>) -> Result<(), InsertRejected<H>> {
    // Find-parent case: exactly one child can strictly contain the new
    // range, because siblings are pairwise disjoint.
    if let Some(idx) = parent
        .children()
        .iter()
        .position(|c| c.range().strictly_contains(&node.range()))
    {
        return insert_under(&mut parent.children_mut()[idx], node);
    }

    for child in parent.children() {
        let existing = child.range();
        if existing == node.range() {
            return Err(InsertRejected {
                node,
                reason: InsertError::Duplicate { range: existing },
            });
        }
        if existing.partially_overlaps(&node.range()) {
            let inserted = node.range();
            return Err(InsertRejected {
                node,
                reason: InsertError::Overlap { existing, inserted },
            });
        }
    }

    // Reparent: one full scan over the current children, since the new
    // range may subsume several of them at once.
    let mut node = node;
    let (adopted, kept): (Vec<_>, Vec<_>) = parent
        .children_mut()
        .drain(..)
        .partition(|c| node.range().strictly_contains(&c.range()));
    node.children_mut().extend(adopted);
    *parent.children_mut() = kept;
    parent.children_mut().push(node);
    Ok(())
}

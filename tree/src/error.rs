use crate::{node::FoldNode, range::RowRange};
use snafu::Snafu;

pub type Result<T, E = InsertError> = std::result::Result<T, E>;

/// Why an insertion was rejected.
///
/// Both cases are caller contract violations, not recoverable runtime
/// conditions: a report generator must only register ranges that nest or
/// stay disjoint. They are surfaced as errors rather than silently
/// absorbed because a corrupted forest would desynchronize the displayed
/// fold affordances from the document structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum InsertError {
    #[snafu(display("fold range {range} is already registered"))]
    Duplicate { range: RowRange },

    #[snafu(display("fold range {inserted} partially overlaps registered range {existing}"))]
    Overlap {
        existing: RowRange,
        inserted: RowRange,
    },
}

/// A rejected insertion, handing the node back to the caller.
///
/// The node was never attached to the forest, so its indicator handle is
/// still inside it; the caller reclaims it with
/// [`FoldNode::into_indicator`] and releases it. Nothing leaks on the
/// error path.
#[derive(Debug)]
pub struct InsertRejected<H> {
    pub node: FoldNode<H>,
    pub reason: InsertError,
}

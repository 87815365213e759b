//! Containment forest of foldable row ranges.
//!
//! This crate is the data-structure layer under the pleat fold controller:
//! a forest of inclusive row intervals organized by strict containment,
//! anchored at one synthetic root that spans the whole document.
//!
//! # Structure
//!
//! ```text
//! root [0, last_row]            (synthetic, never toggled)
//!   [0, 2]                      "Untracked files"
//!   [4, 9]                      "Unstaged changes"
//!     [5, 6]                    one file's hunk
//!     [7, 9]                    another file's hunk
//! ```
//!
//! Ranges are either nested or disjoint; partial overlap is rejected with a
//! distinguishable error before any mutation. Insertion order is arbitrary:
//! a range that arrives after ranges it contains adopts them as children
//! (reparenting), so a report generator may register a parent section after
//! its sub-sections.
//!
//! # Queries
//!
//! [`FoldTree::find_owner`] resolves a row to the innermost node containing
//! it. The root is the universal container and is never returned; a row
//! owned only by the root is "not found".
//!
//! # Resources
//!
//! Each node carries one opaque indicator handle (the per-section gutter
//! glyph in a real host). [`FoldTree::reset`] and [`FoldTree::destroy`]
//! hand every handle back exactly once, children before parents.

mod error;
mod node;
mod range;
mod tree;

pub use error::{InsertError, InsertRejected, Result};
pub use node::{FoldNode, FoldState};
pub use range::RowRange;
pub use tree::FoldTree;

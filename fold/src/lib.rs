//! Fold controller for generated, read-only reports.
//!
//! A report generator streams a git-status-like document into a host
//! surface line by line and registers each logical section's row span as
//! it is written. This crate turns those registrations into collapsible
//! structure: the [`FoldManager`] owns a containment forest of sections
//! (from [`pleat_tree`]), resolves user activation rows to the innermost
//! owning section, and toggles that section with cascading indicator
//! updates.
//!
//! # Layers
//!
//! ```text
//! report generator --add(range)--> FoldManager --fold/unfold--> HostDocument
//! input layer ------toggle(row)-->     |
//!                                      +--glyphs--> IndicatorProvider
//! ```
//!
//! The host seams are traits ([`HostDocument`], [`IndicatorProvider`]) so
//! the controller runs against a real editor surface or against the
//! in-memory stubs in [`host_stubs`]. Everything is synchronous and
//! single-threaded; the manager is the single owner of its tree, its
//! document, and its indicators.
//!
//! # The cascade
//!
//! Collapsing a section paints every descendant's glyph collapsed without
//! touching the descendants' stored state; expanding it restores each
//! glyph from that stored state, so a section the user collapsed
//! individually stays collapsed while its parent opens and closes around
//! it. This split between stored state and visible glyph is the point of
//! the design; see [`manager`].

pub mod host;
pub mod host_stubs;
pub mod manager;
pub mod report;

pub use host::{Glyph, HostDocument, IndicatorProvider};
pub use host_stubs::{IndicatorId, ReportBuffer, StubGutter};
pub use manager::FoldManager;
pub use pleat_tree::{FoldState, InsertError, RowRange};
pub use report::{ReportDocument, ReportWriter};

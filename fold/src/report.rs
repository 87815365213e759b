//! Row bookkeeping for a streaming report generator.
//!
//! The generator that produces the report works line by line: write a
//! section header, await some external command, write the section's body,
//! then register the section's row span. [`ReportWriter`] does the span
//! arithmetic so the generator never tracks row numbers itself:
//!
//! ```text
//! writer.begin_section();
//! writer.line("Unstaged changes (2)");
//!     writer.begin_section();
//!     writer.line("modified   src/lib.rs");
//!     writer.line("@@ -1,4 +1,6 @@");
//!     writer.end_section();        // registers [5, 6]
//!     ...
//! writer.end_section();            // registers [4, 9], adopting the children
//! ```
//!
//! Sections close inner-first, so a parent is always registered after its
//! children; the forest's reparenting puts them back underneath it. The
//! writer decides nothing about content and parses nothing; it only turns
//! brackets into row ranges.

use crate::host::{HostDocument, IndicatorProvider};
use crate::manager::FoldManager;
use pleat_tree::{InsertError, RowRange};

/// A host document a report can be streamed into.
pub trait ReportDocument: HostDocument {
    /// Rows currently in the document.
    fn row_count(&self) -> u32;

    /// Append one line, returning the row it landed on.
    fn append_line(&mut self, text: &str) -> u32;
}

impl ReportDocument for crate::host_stubs::ReportBuffer {
    fn row_count(&self) -> u32 {
        self.line_count()
    }

    fn append_line(&mut self, text: &str) -> u32 {
        self.push_line(text)
    }
}

/// Streams lines into the managed document and registers a fold section
/// per `begin`/`end` bracket.
pub struct ReportWriter<'a, D: ReportDocument, P: IndicatorProvider> {
    manager: &'a mut FoldManager<D, P>,
    open: Vec<u32>,
}

impl<'a, D: ReportDocument, P: IndicatorProvider> ReportWriter<'a, D, P> {
    pub fn new(manager: &'a mut FoldManager<D, P>) -> Self {
        Self {
            manager,
            open: Vec::new(),
        }
    }

    /// Append one line to the document, returning its row.
    pub fn line(&mut self, text: &str) -> u32 {
        self.manager.document_mut().append_line(text)
    }

    /// Open a section starting at the next row to be written.
    pub fn begin_section(&mut self) {
        self.open.push(self.manager.document().row_count());
    }

    /// Close the innermost open section and register its span.
    ///
    /// A section that wrote no lines is skipped (there is nothing to
    /// fold), as is an `end` without a matching `begin`; both return
    /// `Ok(None)`.
    pub fn end_section(&mut self) -> Result<Option<RowRange>, InsertError> {
        let Some(start) = self.open.pop() else {
            tracing::trace!("end_section without an open section");
            return Ok(None);
        };
        let row_count = self.manager.document().row_count();
        if row_count <= start {
            return Ok(None);
        }
        let range = RowRange::new(start, row_count - 1);
        self.manager.add(range)?;
        Ok(Some(range))
    }
}

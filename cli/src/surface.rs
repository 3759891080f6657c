//! Terminal rendition of the list display.

use std::io::Write;

use list_sync_core::{ListElement, Surface};

/// Prints the whole list on every render. Notices go to the same writer,
/// prefixed with `!`.
pub struct TerminalSurface<W> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_list(&mut self, children: &[ListElement]) -> std::io::Result<()> {
        writeln!(self.out, "-- {} item(s) --", children.len())?;
        for child in children {
            writeln!(self.out, "  {}", child.text)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn replace_children(&mut self, children: Vec<ListElement>) {
        if let Err(e) = self.write_list(&children) {
            tracing::warn!(%e, "failed to write list");
        }
    }

    fn show_notice(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "! {message}").and_then(|()| self.out.flush()) {
            tracing::warn!(%e, "failed to write notice");
        }
    }
}

//! Projection of the list onto a display surface.
//!
//! # Design
//! Rendering is a full replace: every call builds one fresh `ListElement` per
//! item and hands the whole batch to `Surface::replace_children`, which swaps
//! it in atomically. No keys, no diffing. If that ever gets too slow the diff
//! belongs behind `ListRenderer::render` without touching its callers.

use crate::error::SyncError;
use crate::types::Item;

/// One displayed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListElement {
    pub text: String,
}

/// Where the list ends up: a DOM `<ul>`, a terminal, a test buffer.
pub trait Surface {
    /// Drop every current child and display `children` in order.
    fn replace_children(&mut self, children: Vec<ListElement>);

    /// Show a visible, non-fatal notice.
    fn show_notice(&mut self, message: &str);
}

/// Surface that keeps everything in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    pub children: Vec<ListElement>,
    pub notices: Vec<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.children.iter().map(|el| el.text.as_str()).collect()
    }
}

impl Surface for MemorySurface {
    fn replace_children(&mut self, children: Vec<ListElement>) {
        self.children = children;
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Renders item lists onto a `Surface`.
#[derive(Debug)]
pub struct ListRenderer<S> {
    surface: S,
    render_count: u64,
}

impl<S: Surface> ListRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            render_count: 0,
        }
    }

    pub fn render(&mut self, items: &[Item]) {
        let children = items
            .iter()
            .map(|item| ListElement {
                text: item.as_str().to_string(),
            })
            .collect();
        self.surface.replace_children(children);
        self.render_count += 1;
    }

    /// Surface a notice for `err` if it has a user-facing one.
    pub fn notify(&mut self, err: &SyncError) {
        if let Some(message) = err.notice() {
            self.surface.show_notice(&message);
        }
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

//! Rendering backends
//!
//! The console never draws anything itself. It asks a backend to create a
//! visual for each visible character, to place it at a cell, and to destroy
//! it again once the cell is gone. Handles are opaque to the console.

mod headless;

pub use headless::{BackendEvent, GlyphHandle, HeadlessBackend};

use crate::core::Rgba;

/// Host-side renderer the console drives
pub trait RenderBackend {
    /// Opaque visual handle, exclusively owned by the buffer once created
    type Handle;

    /// Create a visual for `c`, or `None` if there is no glyph for it
    fn try_create_visual(&mut self, c: char, color: Rgba) -> Option<Self::Handle>;

    /// Position `handle` at the given cell using the backend's own layout
    fn place_visual(&mut self, row: usize, col: usize, handle: &Self::Handle);

    /// Release a visual. Called exactly once per created handle.
    fn destroy_visual(&mut self, handle: Self::Handle);

    /// The console's dimensions changed
    fn notify_resized(&mut self, rows: usize, cols: usize);

    /// The cursor moved
    fn notify_cursor_moved(&mut self, row: usize, col: usize);

    /// Show or hide the cursor indicator
    fn set_cursor_visible(&mut self, visible: bool);
}

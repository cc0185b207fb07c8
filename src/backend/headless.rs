//! Headless rendering backend
//!
//! Resolves glyphs by name against a charset, hands out numbered handles and
//! records everything the console asks of it. Used for testing and by the
//! headless runner.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::RenderBackend;
use crate::core::{Charset, Rgba};

/// Numbered visual handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlyphHandle(pub u64);

/// A call the console made into the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendEvent {
    Created { handle: GlyphHandle, ch: char },
    Placed { handle: GlyphHandle, row: usize, col: usize },
    Destroyed { handle: GlyphHandle },
    Resized { rows: usize, cols: usize },
    CursorMoved { row: usize, col: usize },
    CursorVisible(bool),
}

/// Backend that renders nowhere
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    /// Code point -> glyph resource name, built from the charset's visible set
    glyphs: HashMap<char, String>,
    /// Code points whose glyph resource is deliberately missing
    missing: HashSet<char>,
    next_handle: u64,
    live: BTreeMap<GlyphHandle, char>,
    placements: HashMap<GlyphHandle, (usize, usize)>,
    events: Vec<BackendEvent>,
    cursor_visible: bool,
}

impl HeadlessBackend {
    /// Create a backend with a glyph for every visible code point of `charset`
    pub fn new(charset: &dyn Charset) -> Self {
        let glyphs = charset
            .visible_chars()
            .map(|c| (c, charset.glyph_name(c)))
            .collect();
        Self {
            glyphs,
            ..Default::default()
        }
    }

    /// Create a backend that has no glyph resource for the given characters
    pub fn without_glyphs(charset: &dyn Charset, missing: &[char]) -> Self {
        let mut backend = Self::new(charset);
        backend.missing = missing.iter().copied().collect();
        backend
    }

    /// Number of handles created and not yet destroyed
    pub fn live_visuals(&self) -> usize {
        self.live.len()
    }

    /// Where a live handle was last placed
    pub fn placement(&self, handle: GlyphHandle) -> Option<(usize, usize)> {
        self.placements.get(&handle).copied()
    }

    /// Code point a live handle was created for
    pub fn glyph_char(&self, handle: GlyphHandle) -> Option<char> {
        self.live.get(&handle).copied()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Every call recorded so far
    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    /// Drain the recorded calls
    pub fn take_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }

    /// Glyph resource name for `c`, if the backend has one
    pub fn glyph_name(&self, c: char) -> Option<&str> {
        if self.missing.contains(&c) {
            return None;
        }
        self.glyphs.get(&c).map(String::as_str)
    }
}

impl RenderBackend for HeadlessBackend {
    type Handle = GlyphHandle;

    fn try_create_visual(&mut self, c: char, _color: Rgba) -> Option<GlyphHandle> {
        self.glyph_name(c)?;
        let handle = GlyphHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, c);
        self.events.push(BackendEvent::Created { handle, ch: c });
        Some(handle)
    }

    fn place_visual(&mut self, row: usize, col: usize, handle: &GlyphHandle) {
        self.placements.insert(*handle, (row, col));
        self.events.push(BackendEvent::Placed {
            handle: *handle,
            row,
            col,
        });
    }

    fn destroy_visual(&mut self, handle: GlyphHandle) {
        if self.live.remove(&handle).is_none() {
            tracing::error!("Visual {:?} destroyed twice", handle);
        }
        self.placements.remove(&handle);
        self.events.push(BackendEvent::Destroyed { handle });
    }

    fn notify_resized(&mut self, rows: usize, cols: usize) {
        self.events.push(BackendEvent::Resized { rows, cols });
    }

    fn notify_cursor_moved(&mut self, row: usize, col: usize) {
        self.events.push(BackendEvent::CursorMoved { row, col });
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
        self.events.push(BackendEvent::CursorVisible(visible));
    }
}

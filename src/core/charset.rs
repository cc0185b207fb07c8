//! Character classification for the console
//!
//! A charset partitions code points into the classes the buffer cares about
//! and enumerates the visible code points a rendering backend must provide
//! glyphs for.

use serde::{Deserialize, Serialize};

/// How the console treats a code point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    /// Rendered with a glyph
    Visible,
    /// Occupies a cell, never rendered
    Space,
    /// Moves the cursor to the start of the next row
    Newline,
    /// Expands to a run of spaces
    Tab,
    /// Not supported by this charset
    Invalid,
}

/// Classification table for one kind of console
pub trait Charset {
    /// Classify a single code point
    fn classify(&self, c: char) -> CharClass;

    /// All visible code points, in ascending order. Each call starts a fresh
    /// iteration.
    fn visible_chars(&self) -> Box<dyn Iterator<Item = char> + '_>;

    /// Stable identifier used to look up the glyph resource for `c`
    fn glyph_name(&self, c: char) -> String {
        format!("U{:04X}", c as u32)
    }

    fn is_visible(&self, c: char) -> bool {
        self.classify(c) == CharClass::Visible
    }

    fn is_space(&self, c: char) -> bool {
        self.classify(c) == CharClass::Space
    }

    fn is_newline(&self, c: char) -> bool {
        self.classify(c) == CharClass::Newline
    }

    fn is_tab(&self, c: char) -> bool {
        self.classify(c) == CharClass::Tab
    }

    /// Visible or space: the characters that can occupy a cell
    fn is_writable(&self, c: char) -> bool {
        matches!(self.classify(c), CharClass::Visible | CharClass::Space)
    }
}

/// Printable ASCII
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiCharset;

impl AsciiCharset {
    const MIN_VISIBLE: char = '\u{21}';
    const MAX_VISIBLE: char = '\u{7e}';

    pub fn new() -> Self {
        Self
    }
}

impl Charset for AsciiCharset {
    fn classify(&self, c: char) -> CharClass {
        match c {
            ' ' => CharClass::Space,
            '\n' | '\r' => CharClass::Newline,
            '\t' => CharClass::Tab,
            Self::MIN_VISIBLE..=Self::MAX_VISIBLE => CharClass::Visible,
            _ => CharClass::Invalid,
        }
    }

    fn visible_chars(&self) -> Box<dyn Iterator<Item = char> + '_> {
        Box::new(Self::MIN_VISIBLE..=Self::MAX_VISIBLE)
    }
}

//! Deterministic console snapshots
//!
//! A snapshot captures what the console shows in a serializable form, for
//! tests and for the headless runner. Given the same writes and keystrokes,
//! the console must produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::buffer::ConsoleBuffer;
use super::cell::Rgba;
use crate::backend::RenderBackend;

/// A complete snapshot of the console state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub cursor: CursorSnapshot,
    /// One entry per row, unwritten cells rendered as spaces, trailing
    /// spaces trimmed
    pub lines: Vec<String>,
    /// Written cells whose color differs from the console default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colored: Vec<ColoredCell>,
}

/// Snapshot of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub row: usize,
    pub col: usize,
    pub visible: bool,
}

/// A cell written in a non-default color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredCell {
    pub row: usize,
    pub col: usize,
    pub ch: char,
    pub color: Rgba,
}

impl Snapshot {
    /// Capture the current state of `buffer`
    pub fn capture<B: RenderBackend>(buffer: &ConsoleBuffer<B>) -> Self {
        let rows = buffer.rows();
        let cols = buffer.cols();
        let default_color = buffer.default_color();
        let mut colored = Vec::new();

        let lines = (0..rows)
            .map(|row| {
                let mut line = vec![' '; cols];
                for (col, ch, color) in buffer.row_chars(row) {
                    line[col] = ch;
                    if color != default_color {
                        colored.push(ColoredCell {
                            row,
                            col,
                            ch,
                            color,
                        });
                    }
                }
                line.into_iter().collect::<String>().trim_end().to_string()
            })
            .collect();

        let cursor = buffer.cursor();
        Self {
            rows,
            cols,
            cursor: CursorSnapshot {
                row: cursor.row,
                col: cursor.col,
                visible: cursor.visible,
            },
            lines,
            colored,
        }
    }

    /// Render as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Text of one row, empty if out of range
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(String::as_str).unwrap_or("")
    }
}

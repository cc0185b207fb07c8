//! Console buffer
//!
//! The character grid together with its dimensions, cursor, and the write
//! and scroll algorithms. Every visual handle stored in the grid is owned by
//! the buffer and released through the backend exactly once: when its cell
//! is replaced, deleted, scrolled off the top, clipped by a resize, or when
//! the buffer itself is dropped.

use tracing::{debug, trace, warn};

use super::cell::{Cell, Rgba};
use super::charset::{CharClass, Charset};
use super::cursor::{Cursor, Dimensions};
use super::grid::Grid;
use crate::app::Config;
use crate::backend::RenderBackend;
use crate::error::Result;

pub const DEFAULT_SPACES_PER_TAB: usize = 4;

/// The console's character grid
pub struct ConsoleBuffer<B: RenderBackend> {
    backend: B,
    charset: Box<dyn Charset>,
    grid: Grid<B::Handle>,
    cursor: Cursor,
    spaces_per_tab: usize,
    scrollable: bool,
    default_color: Rgba,
}

impl<B: RenderBackend> ConsoleBuffer<B> {
    /// Create a buffer with default dimensions and settings
    pub fn new(backend: B, charset: Box<dyn Charset>) -> Self {
        Self::build(backend, charset, Dimensions::default(), &Config::default())
    }

    /// Create a buffer from a configuration. Invalid configurations are fatal.
    pub fn from_config(backend: B, charset: Box<dyn Charset>, config: &Config) -> Result<Self> {
        config.validate()?;
        let dims = Dimensions::new(config.rows, config.cols);
        Ok(Self::build(backend, charset, dims, config))
    }

    fn build(backend: B, charset: Box<dyn Charset>, dims: Dimensions, config: &Config) -> Self {
        let mut buffer = Self {
            backend,
            charset,
            grid: Grid::new(dims),
            cursor: Cursor::new(),
            spaces_per_tab: config.spaces_per_tab,
            scrollable: config.scrollable,
            default_color: config.default_color,
        };
        debug!("Console buffer created with {}x{} cells", dims.rows, dims.cols);
        buffer.backend.notify_resized(dims.rows, dims.cols);
        buffer.backend.notify_cursor_moved(0, 0);
        buffer.backend.set_cursor_visible(false);
        buffer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn charset(&self) -> &dyn Charset {
        self.charset.as_ref()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Set the number of rows. Out-of-range values are ignored.
    pub fn set_rows(&mut self, rows: usize) {
        let mut dims = self.grid.dimensions();
        if dims.set_rows(rows) {
            self.resize(dims);
        }
    }

    /// Set the number of columns. Out-of-range values are ignored.
    pub fn set_cols(&mut self, cols: usize) {
        let mut dims = self.grid.dimensions();
        if dims.set_cols(cols) {
            self.resize(dims);
        }
    }

    fn resize(&mut self, dims: Dimensions) {
        for cell in self.grid.resize(dims) {
            self.release(cell);
        }
        self.backend.notify_resized(dims.rows, dims.cols);
        if self.cursor.clamp_to(dims) {
            self.backend
                .notify_cursor_moved(self.cursor.row, self.cursor.col);
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor.row
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor.col
    }

    /// Move the cursor to `row`. Out-of-range values are ignored.
    pub fn set_cursor_row(&mut self, row: usize) {
        if self.cursor.set_row(row, self.grid.dimensions()) {
            self.backend
                .notify_cursor_moved(self.cursor.row, self.cursor.col);
        }
    }

    /// Move the cursor to `col`. Out-of-range values are ignored.
    pub fn set_cursor_col(&mut self, col: usize) {
        if self.cursor.set_col(col, self.grid.dimensions()) {
            self.backend
                .notify_cursor_moved(self.cursor.row, self.cursor.col);
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor.visible = visible;
        self.backend.set_cursor_visible(visible);
    }

    pub fn spaces_per_tab(&self) -> usize {
        self.spaces_per_tab
    }

    pub fn set_spaces_per_tab(&mut self, spaces: usize) {
        self.spaces_per_tab = spaces;
    }

    pub fn scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
    }

    pub fn default_color(&self) -> Rgba {
        self.default_color
    }

    /// Put `c` at (row, col) in the default color
    pub fn put_char(&mut self, row: usize, col: usize, c: char) {
        self.put_char_with_color(row, col, c, self.default_color);
    }

    /// Put `c` at (row, col). Only visible characters with a glyph and
    /// spaces are accepted; anything else is logged and dropped. The cursor
    /// is not moved.
    pub fn put_char_with_color(&mut self, row: usize, col: usize, c: char, color: Rgba) {
        if !self.grid.dimensions().contains(row, col) {
            return;
        }
        let cell = match self.charset.classify(c) {
            CharClass::Visible => match self.backend.try_create_visual(c, color) {
                Some(visual) => Cell::visible(c, color, visual),
                None => {
                    warn!(
                        "The character U+{:04X} has no glyph and is not supported by put_char",
                        c as u32
                    );
                    return;
                }
            },
            CharClass::Space => Cell::space(c, color),
            _ => {
                warn!("The character U+{:04X} is not supported by put_char", c as u32);
                return;
            }
        };
        self.install(row, col, cell);
    }

    /// Remove the cell at (row, col), releasing its visual
    pub fn delete_char(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.grid.take(row, col) {
            self.release(cell);
        }
    }

    /// Character and color at (row, col), if a cell was written there
    pub fn try_get_char(&self, row: usize, col: usize) -> Option<(char, Rgba)> {
        self.grid.get(row, col).map(|cell| (cell.ch, cell.color))
    }

    /// Write `text` at the cursor in the default color
    pub fn write(&mut self, text: &str) {
        self.write_with_color(text, self.default_color);
    }

    /// Write `text` at the cursor, advancing it after each character
    pub fn write_with_color(&mut self, text: &str, color: Rgba) {
        for c in text.chars() {
            self.write_char(c, color);
        }
    }

    pub fn write_line(&mut self, text: &str) {
        self.write_line_with_color(text, self.default_color);
    }

    pub fn write_line_with_color(&mut self, text: &str, color: Rgba) {
        self.write_with_color(text, color);
        self.write_char('\n', color);
    }

    /// Write a single character at the cursor and return how many lines the
    /// buffer scrolled as a result. Invalid characters are silently dropped.
    pub fn write_char(&mut self, c: char, color: Rgba) -> usize {
        match self.charset.classify(c) {
            CharClass::Visible | CharClass::Space => {
                self.put_char_with_color(self.cursor.row, self.cursor.col, c, color);
                self.advance_cursor()
            }
            CharClass::Newline => self.newline(),
            CharClass::Tab => {
                let mut scrolled = 0;
                for _ in 0..self.spaces_per_tab {
                    self.put_char_with_color(self.cursor.row, self.cursor.col, ' ', color);
                    scrolled += self.advance_cursor();
                }
                scrolled
            }
            CharClass::Invalid => 0,
        }
    }

    /// Number of cells `c` occupies once written
    pub fn footprint(&self, c: char) -> usize {
        match self.charset.classify(c) {
            CharClass::Visible | CharClass::Space => 1,
            CharClass::Tab => self.spaces_per_tab,
            CharClass::Newline | CharClass::Invalid => 0,
        }
    }

    /// Scroll the content up by `lines`, returning how many lines actually
    /// scrolled (zero if scrolling is disabled).
    pub fn scroll(&mut self, lines: usize) -> usize {
        if !self.scrollable {
            return 0;
        }
        for _ in 0..lines {
            for cell in self.grid.shift_up() {
                self.release(cell);
            }
            for ((row, col), cell) in self.grid.iter() {
                if let Some(visual) = &cell.visual {
                    self.backend.place_visual(row, col, visual);
                }
            }
        }
        trace!("Scrolled {} lines", lines);
        lines
    }

    /// Step the cursor back one cell, wrapping to the end of the previous
    /// row. Returns false at (0, 0).
    pub fn move_cursor_to_prev(&mut self) -> bool {
        let (row, col) = self.cursor.position();
        if col > 0 {
            self.set_cursor_col(col - 1);
        } else if row > 0 {
            self.set_cursor_col(self.cols() - 1);
            self.set_cursor_row(row - 1);
        } else {
            return false;
        }
        true
    }

    /// Whether the cursor sits on the bottom-right cell
    pub fn cursor_at_end(&self) -> bool {
        self.cursor.row + 1 == self.rows() && self.cursor.col + 1 == self.cols()
    }

    /// Iterate over written cells of one row as (col, char, color)
    pub fn row_chars(&self, row: usize) -> impl Iterator<Item = (usize, char, Rgba)> + '_ {
        self.grid
            .row_cells(row)
            .map(|(col, cell)| (col, cell.ch, cell.color))
    }

    /// Number of written cells
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    fn advance_cursor(&mut self) -> usize {
        let (row, col) = self.cursor.position();
        if col + 1 < self.cols() {
            self.set_cursor_col(col + 1);
            0
        } else if row + 1 < self.rows() {
            self.set_cursor_col(0);
            self.set_cursor_row(row + 1);
            0
        } else {
            let scrolled = self.scroll(1);
            self.set_cursor_col(0);
            scrolled
        }
    }

    fn newline(&mut self) -> usize {
        let row = self.cursor.row;
        if row + 1 < self.rows() {
            self.set_cursor_col(0);
            self.set_cursor_row(row + 1);
            0
        } else {
            let scrolled = self.scroll(1);
            self.set_cursor_col(0);
            scrolled
        }
    }

    fn install(&mut self, row: usize, col: usize, cell: Cell<B::Handle>) {
        if let Some(old) = self.grid.take(row, col) {
            self.release(old);
        }
        if let Some(visual) = &cell.visual {
            self.backend.place_visual(row, col, visual);
        }
        if let Err(cell) = self.grid.replace(row, col, cell) {
            self.release(cell);
        }
    }

    fn release(&mut self, cell: Cell<B::Handle>) {
        if let Some(visual) = cell.visual {
            self.backend.destroy_visual(visual);
        }
    }
}

impl<B: RenderBackend> Drop for ConsoleBuffer<B> {
    fn drop(&mut self) {
        for cell in self.grid.drain() {
            if let Some(visual) = cell.visual {
                self.backend.destroy_visual(visual);
            }
        }
    }
}

impl<B: RenderBackend + std::fmt::Debug> std::fmt::Debug for ConsoleBuffer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleBuffer")
            .field("dimensions", &self.grid.dimensions())
            .field("cursor", &self.cursor)
            .field("cells", &self.grid.len())
            .field("spaces_per_tab", &self.spaces_per_tab)
            .field("scrollable", &self.scrollable)
            .field("backend", &self.backend)
            .finish()
    }
}

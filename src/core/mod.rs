//! Console Core Module
//!
//! Platform-independent console state. This module contains:
//! - Character classification (charset)
//! - Cell representation with color and visual handle
//! - Cursor and dimension bounds
//! - The dense cell grid and the console buffer built on it
//! - Deterministic snapshot generation
//!
//! The core never renders anything; it drives a [`crate::backend::RenderBackend`].

mod buffer;
mod cell;
mod charset;
mod cursor;
mod grid;
mod snapshot;

pub use buffer::{ConsoleBuffer, DEFAULT_SPACES_PER_TAB};
pub use cell::{Cell, Rgba};
pub use charset::{AsciiCharset, CharClass, Charset};
pub use cursor::{Cursor, Dimensions, COLS_RANGE, DEFAULT_COLS, DEFAULT_ROWS, ROWS_RANGE};
pub use grid::Grid;
pub use snapshot::{ColoredCell, CursorSnapshot, Snapshot};

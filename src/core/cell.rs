//! Console Cell
//!
//! Represents a single slot in the console grid: one code point, the color
//! it was written with, and the visual handle the rendering backend created
//! for it (if any).

use serde::{Deserialize, Serialize};

/// RGBA color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const CYAN: Rgba = Rgba::rgb(0, 255, 255);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);

    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    /// Console text is yellow unless a caller asks otherwise
    fn default() -> Self {
        Rgba::YELLOW
    }
}

/// A single written cell in the console grid
///
/// `H` is the rendering backend's visual handle type. Space cells never
/// carry a handle.
#[derive(Debug, PartialEq, Eq)]
pub struct Cell<H> {
    /// The code point stored in this cell
    pub ch: char,
    /// Color the character was written with
    pub color: Rgba,
    /// Backend visual for this cell, owned by the buffer
    pub visual: Option<H>,
}

impl<H> Cell<H> {
    /// A visible character backed by a rendered visual
    pub fn visible(ch: char, color: Rgba, visual: H) -> Self {
        Self {
            ch,
            color,
            visual: Some(visual),
        }
    }

    /// A space cell; spaces are never rendered
    pub fn space(ch: char, color: Rgba) -> Self {
        Self {
            ch,
            color,
            visual: None,
        }
    }

    /// Whether the backend has a visual for this cell
    pub fn is_rendered(&self) -> bool {
        self.visual.is_some()
    }
}

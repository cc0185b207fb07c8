//! Input Module
//!
//! Turns host key events into console input:
//! - [`keymap`] maps physical keys and modifiers to characters or control keys
//! - [`line_editor`] runs the readline loop that echoes and collects a line

mod keymap;
mod line_editor;

pub use keymap::{
    ControlKey, EnUsKeyMap, Key, KeyEvent, KeyInput, KeyMap, KeyState, Modifiers,
};
pub use line_editor::{InputManager, LineCallback};

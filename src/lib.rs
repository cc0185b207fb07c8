//! Clay Console Library
//!
//! A scrollable character console driven by program output and keyboard
//! input. The host owns rendering and event delivery; this crate owns the
//! logical model:
//!
//! - `core`: charset, cells, cursor, the console buffer and snapshots
//! - `backend`: the rendering backend interface and a headless backend
//! - `input`: key mapping and the readline loop
//! - `console`: the assembled console with a single key event entry point
//! - `app`: configuration

pub mod app;
pub mod backend;
pub mod console;
pub mod core;
pub mod error;
pub mod input;

pub use app::{Config, ScreenType};
pub use backend::{HeadlessBackend, RenderBackend};
pub use console::MainConsole;
pub use self::core::{AsciiCharset, Charset, ConsoleBuffer, Rgba, Snapshot};
pub use error::{ConsoleError, Result};
pub use input::{EnUsKeyMap, InputManager, Key, KeyEvent, KeyMap, Modifiers};

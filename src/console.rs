//! Main console
//!
//! Wires a [`ConsoleBuffer`], an [`InputManager`] and a [`KeyMap`] together
//! behind one value the host constructs explicitly and feeds key events to.

use tracing::{debug, info};

use crate::app::Config;
use crate::backend::RenderBackend;
use crate::core::{Charset, ConsoleBuffer, Rgba, Snapshot};
use crate::error::Result;
use crate::input::{InputManager, KeyEvent, KeyMap, KeyState};

/// A console with keyboard input
pub struct MainConsole<B: RenderBackend, K: KeyMap> {
    buffer: ConsoleBuffer<B>,
    input: InputManager<B>,
    keymap: K,
}

impl<B: RenderBackend, K: KeyMap> MainConsole<B, K> {
    /// Build a console. Fails if the configuration names an unsupported
    /// screen or out-of-range dimensions.
    pub fn new(backend: B, charset: Box<dyn Charset>, keymap: K, config: &Config) -> Result<Self> {
        let buffer = ConsoleBuffer::from_config(backend, charset, config)?;
        info!(
            "Console ready: {} screen, {}x{}",
            config.screen, config.rows, config.cols
        );
        Ok(Self {
            buffer,
            input: InputManager::with_max_line_len(config.max_line_len),
            keymap,
        })
    }

    pub fn buffer(&self) -> &ConsoleBuffer<B> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ConsoleBuffer<B> {
        &mut self.buffer
    }

    pub fn input(&self) -> &InputManager<B> {
        &self.input
    }

    pub fn keymap(&self) -> &K {
        &self.keymap
    }

    /// Process one host key event. Only presses are acted on.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if event.state != KeyState::Pressed {
            return;
        }
        let Some(input) = self.keymap.convert(event.key, event.modifiers) else {
            return;
        };
        if self.input.is_active() {
            self.input
                .on_key_input(&mut self.buffer, input.character, input.control);
        } else if let Some(c) = input.character {
            let color = self.buffer.default_color();
            self.buffer.write_char(c, color);
        } else {
            debug!("Control key {:?} ignored outside read line loop", input.control);
        }
    }

    pub fn start_read_line_loop<F>(&mut self, on_line: F)
    where
        F: FnMut(&str, &mut ConsoleBuffer<B>) -> bool + 'static,
    {
        self.input.start_read_line_loop(&mut self.buffer, on_line);
    }

    pub fn stop_read_line_loop(&mut self) {
        self.input.stop_read_line_loop(&mut self.buffer);
    }

    pub fn clear_pending_line(&mut self) {
        self.input.clear_pending_line();
    }

    pub fn is_reading_line(&self) -> bool {
        self.input.is_active()
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.write(text);
    }

    pub fn write_with_color(&mut self, text: &str, color: Rgba) {
        self.buffer.write_with_color(text, color);
    }

    pub fn write_line(&mut self, text: &str) {
        self.buffer.write_line(text);
    }

    pub fn write_line_with_color(&mut self, text: &str, color: Rgba) {
        self.buffer.write_line_with_color(text, color);
    }

    /// Capture the visible state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.buffer)
    }
}

impl<B, K> std::fmt::Debug for MainConsole<B, K>
where
    B: RenderBackend + std::fmt::Debug,
    K: KeyMap + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainConsole")
            .field("buffer", &self.buffer)
            .field("input", &self.input)
            .field("keymap", &self.keymap)
            .finish()
    }
}

//! Line editing
//!
//! The readline loop is persistent state rather than a blocking call: each
//! key press is echoed into the console buffer and collected until a newline
//! hands the finished line to the registered callback.

use tracing::debug;

use super::keymap::ControlKey;
use crate::app::DEFAULT_MAX_LINE_LEN;
use crate::backend::RenderBackend;
use crate::core::{CharClass, ConsoleBuffer};

/// Called with each completed line. Returning `false` ends the loop.
pub type LineCallback<B> = Box<dyn FnMut(&str, &mut ConsoleBuffer<B>) -> bool>;

/// A typed character and the number of cells its echo occupied
#[derive(Debug, Clone, Copy)]
struct Typed {
    ch: char,
    cells: usize,
}

/// Readline state machine layered on a [`ConsoleBuffer`]
pub struct InputManager<B: RenderBackend> {
    active: bool,
    line_start: (usize, usize),
    line: Vec<Typed>,
    max_line_len: usize,
    on_line: Option<LineCallback<B>>,
}

impl<B: RenderBackend> InputManager<B> {
    pub fn new() -> Self {
        Self::with_max_line_len(DEFAULT_MAX_LINE_LEN)
    }

    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            active: false,
            line_start: (0, 0),
            line: Vec::new(),
            max_line_len,
            on_line: None,
        }
    }

    /// Whether a line is being read
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cursor position the current line started at
    pub fn line_start(&self) -> (usize, usize) {
        self.line_start
    }

    /// Text typed so far on the current line
    pub fn pending_line(&self) -> String {
        self.line.iter().map(|t| t.ch).collect()
    }

    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Start reading lines. Does nothing if a loop is already running.
    pub fn start_read_line_loop<F>(&mut self, console: &mut ConsoleBuffer<B>, on_line: F)
    where
        F: FnMut(&str, &mut ConsoleBuffer<B>) -> bool + 'static,
    {
        if self.active {
            return;
        }
        self.active = true;
        console.set_cursor_visible(true);
        self.line.clear();
        self.line_start = console.cursor().position();
        self.on_line = Some(Box::new(on_line));
        debug!("Read line loop started at {:?}", self.line_start);
    }

    /// Stop reading lines. Safe to call when already stopped.
    pub fn stop_read_line_loop(&mut self, console: &mut ConsoleBuffer<B>) {
        if self.active {
            debug!("Read line loop stopped");
        }
        self.active = false;
        console.set_cursor_visible(false);
        self.line.clear();
        self.on_line = None;
    }

    /// Forget the characters typed so far. What was echoed stays on screen.
    pub fn clear_pending_line(&mut self) {
        self.line.clear();
    }

    /// Feed one converted key press
    pub fn on_key_input(
        &mut self,
        console: &mut ConsoleBuffer<B>,
        character: Option<char>,
        control: Option<ControlKey>,
    ) {
        if !self.active {
            return;
        }
        match (character, control) {
            (Some(c), None) => self.on_char(console, c),
            (None, Some(ControlKey::Backspace)) => self.on_backspace(console),
            _ => {}
        }
    }

    fn on_char(&mut self, console: &mut ConsoleBuffer<B>, c: char) {
        let class = console.charset().classify(c);
        match class {
            CharClass::Newline => {}
            CharClass::Invalid => return,
            _ => {
                // Echoing here would scroll the start of the line off the top.
                if self.line_start.0 == 0 && console.cursor_at_end() {
                    return;
                }
                if self.line.len() >= self.max_line_len {
                    return;
                }
            }
        }

        let cells = console.footprint(c);
        let color = console.default_color();
        let scrolled = console.write_char(c, color);
        self.line_start.0 = self.line_start.0.saturating_sub(scrolled);

        if class == CharClass::Newline {
            self.submit(console);
        } else {
            self.line.push(Typed { ch: c, cells });
        }
    }

    fn submit(&mut self, console: &mut ConsoleBuffer<B>) {
        let text = self.pending_line();
        let Some(mut on_line) = self.on_line.take() else {
            self.stop_read_line_loop(console);
            return;
        };
        if on_line(&text, console) {
            self.line_start = console.cursor().position();
            self.line.clear();
            self.on_line = Some(on_line);
        } else {
            self.stop_read_line_loop(console);
        }
    }

    fn on_backspace(&mut self, console: &mut ConsoleBuffer<B>) {
        let Some(typed) = self.line.pop() else {
            return;
        };
        for _ in 0..typed.cells {
            if !console.move_cursor_to_prev() {
                break;
            }
            let (row, col) = console.cursor().position();
            console.delete_char(row, col);
        }
    }
}

impl<B: RenderBackend> Default for InputManager<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> std::fmt::Debug for InputManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputManager")
            .field("active", &self.active)
            .field("line_start", &self.line_start)
            .field("pending_line", &self.pending_line())
            .field("max_line_len", &self.max_line_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::core::AsciiCharset;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn console() -> ConsoleBuffer<HeadlessBackend> {
        let charset = AsciiCharset::new();
        let backend = HeadlessBackend::new(&charset);
        ConsoleBuffer::new(backend, Box::new(charset))
    }

    fn type_str(
        input: &mut InputManager<HeadlessBackend>,
        console: &mut ConsoleBuffer<HeadlessBackend>,
        text: &str,
    ) {
        for c in text.chars() {
            input.on_key_input(console, Some(c), None);
        }
    }

    fn backspace(
        input: &mut InputManager<HeadlessBackend>,
        console: &mut ConsoleBuffer<HeadlessBackend>,
    ) {
        input.on_key_input(console, None, Some(ControlKey::Backspace));
    }

    /// Start a loop that records every line and keeps going
    fn recording(
        input: &mut InputManager<HeadlessBackend>,
        console: &mut ConsoleBuffer<HeadlessBackend>,
    ) -> Rc<RefCell<Vec<String>>> {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = lines.clone();
        input.start_read_line_loop(console, move |line, _| {
            sink.borrow_mut().push(line.to_string());
            true
        });
        lines
    }

    #[test]
    fn test_start_shows_cursor_and_records_start() {
        let mut console = console();
        console.write("> ");
        let mut input = InputManager::new();
        let _lines = recording(&mut input, &mut console);
        assert!(input.is_active());
        assert!(console.cursor_visible());
        assert_eq!(input.line_start(), (0, 2));
    }

    #[test]
    fn test_start_twice_keeps_first_callback() {
        let mut console = console();
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);
        input.start_read_line_loop(&mut console, |_, _| panic!("replaced callback"));
        type_str(&mut input, &mut console, "x\n");
        assert_eq!(*lines.borrow(), vec!["x"]);
    }

    #[test]
    fn test_line_edit_round_trip() {
        let mut console = console();
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);

        type_str(&mut input, &mut console, "ab");
        backspace(&mut input, &mut console);
        type_str(&mut input, &mut console, "c\n");

        assert_eq!(*lines.borrow(), vec!["ac"]);
        assert_eq!(console.try_get_char(0, 0).map(|(c, _)| c), Some('a'));
        assert_eq!(console.try_get_char(0, 1).map(|(c, _)| c), Some('c'));
        assert_eq!(console.cursor().position(), (1, 0));
        assert_eq!(input.line_start(), (1, 0));
        assert_eq!(input.pending_line(), "");
    }

    #[test]
    fn test_backspace_on_empty_line() {
        let mut console = console();
        console.write("keep");
        let mut input = InputManager::new();
        let _lines = recording(&mut input, &mut console);
        backspace(&mut input, &mut console);
        assert_eq!(console.cursor().position(), (0, 4));
        assert_eq!(console.try_get_char(0, 3).map(|(c, _)| c), Some('p'));
    }

    #[test]
    fn test_backspace_wraps_to_previous_row() {
        let mut console = console();
        console.set_cursor_col(39);
        let mut input = InputManager::new();
        let _lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "z");
        assert_eq!(console.cursor().position(), (1, 0));
        backspace(&mut input, &mut console);
        assert_eq!(console.cursor().position(), (0, 39));
        assert_eq!(console.try_get_char(0, 39), None);
    }

    #[test]
    fn test_backspace_erases_whole_tab() {
        let mut console = console();
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "a\t");
        assert_eq!(console.cursor().position(), (0, 5));
        backspace(&mut input, &mut console);
        assert_eq!(console.cursor().position(), (0, 1));
        assert_eq!(console.cell_count(), 1);
        type_str(&mut input, &mut console, "\n");
        assert_eq!(*lines.borrow(), vec!["a"]);
    }

    #[test]
    fn test_callback_false_stops() {
        let mut console = console();
        let mut input = InputManager::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        input.start_read_line_loop(&mut console, move |_, _| {
            *seen.borrow_mut() += 1;
            false
        });
        type_str(&mut input, &mut console, "one\ntwo\n");
        assert_eq!(*count.borrow(), 1);
        assert!(!input.is_active());
        assert!(!console.cursor_visible());
        assert_eq!(console.try_get_char(1, 0), None);
    }

    #[test]
    fn test_callback_can_write_response() {
        let mut console = console();
        let mut input = InputManager::new();
        input.start_read_line_loop(&mut console, |line, console| {
            console.write_line(&line.to_uppercase());
            console.write("] ");
            true
        });
        type_str(&mut input, &mut console, "hi\n");
        assert_eq!(console.try_get_char(1, 0).map(|(c, _)| c), Some('H'));
        assert_eq!(input.line_start(), (2, 2));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut console = console();
        let mut input = InputManager::new();
        let _lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "abc");
        input.stop_read_line_loop(&mut console);
        input.stop_read_line_loop(&mut console);
        assert!(!input.is_active());
        assert_eq!(input.pending_line(), "");
        assert!(!console.cursor_visible());
    }

    #[test]
    fn test_input_ignored_while_inactive() {
        let mut console = console();
        let mut input: InputManager<HeadlessBackend> = InputManager::new();
        type_str(&mut input, &mut console, "abc");
        assert_eq!(console.cell_count(), 0);
        assert_eq!(input.pending_line(), "");
    }

    #[test]
    fn test_clear_pending_line() {
        let mut console = console();
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "abc");
        input.clear_pending_line();
        backspace(&mut input, &mut console);
        assert_eq!(console.cell_count(), 3);
        type_str(&mut input, &mut console, "d\n");
        assert_eq!(*lines.borrow(), vec!["d"]);
    }

    #[test]
    fn test_invalid_characters_not_collected() {
        let mut console = console();
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "a\u{1b}b\n");
        assert_eq!(*lines.borrow(), vec!["ab"]);
    }

    #[test]
    fn test_max_line_len_rejects_without_echo() {
        let mut console = console();
        let mut input = InputManager::with_max_line_len(3);
        let lines = recording(&mut input, &mut console);
        type_str(&mut input, &mut console, "abcdef");
        assert_eq!(console.cursor().position(), (0, 3));
        assert_eq!(console.cell_count(), 3);
        type_str(&mut input, &mut console, "\n");
        assert_eq!(*lines.borrow(), vec!["abc"]);
    }

    #[test]
    fn test_line_start_follows_scroll() {
        let mut console = console();
        console.set_rows(10);
        console.set_cursor_row(9);
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);
        assert_eq!(input.line_start(), (9, 0));

        type_str(&mut input, &mut console, &"x".repeat(45));
        assert_eq!(input.line_start(), (8, 0));
        assert_eq!(console.cursor().position(), (9, 5));
        type_str(&mut input, &mut console, "\n");
        assert_eq!(lines.borrow()[0].len(), 45);
        assert_eq!(input.line_start(), (9, 0));
    }

    #[test]
    fn test_guard_at_top_of_full_screen() {
        let mut console = console();
        console.set_rows(10);
        console.set_cols(10);
        let mut input = InputManager::new();
        let lines = recording(&mut input, &mut console);

        type_str(&mut input, &mut console, &"y".repeat(120));
        assert_eq!(console.cursor().position(), (9, 9));
        assert_eq!(input.line_start(), (0, 0));
        assert_eq!(input.pending_line().len(), 99);

        type_str(&mut input, &mut console, "\n");
        assert_eq!(lines.borrow()[0].len(), 99);
    }
}

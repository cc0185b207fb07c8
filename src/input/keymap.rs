//! Keyboard mapping
//!
//! Converts physical key presses into the logical input the console
//! understands: either a character, a named control key, or nothing at all
//! for keys the layout does not recognize.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Keyboard modifiers held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub caps_lock: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        caps_lock: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        caps_lock: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        caps_lock: false,
    };
    pub const CAPS_LOCK: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        caps_lock: true,
    };

    /// Letters come out uppercase when exactly one of shift and caps lock is on
    pub fn uppercase(&self) -> bool {
        self.shift ^ self.caps_lock
    }
}

/// Physical key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Main-row digit key (0-9)
    Digit(u8),
    /// Numeric-pad digit key (0-9)
    Keypad(u8),
    /// Letter key (a-z, case ignored)
    Letter(char),

    // Punctuation
    BackQuote,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Asterisk,
    Plus,

    // Keypad operators
    KeypadPeriod,
    KeypadDivide,
    KeypadMultiply,
    KeypadMinus,
    KeypadPlus,
    KeypadEquals,
    KeypadEnter,

    // Whitespace
    Return,
    Tab,
    Space,

    // Editing and navigation
    Escape,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    /// Function key F1-F24
    Function(u8),
    /// Anything the host could not identify
    Unknown,
}

/// Named non-character keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKey {
    Backspace,
    Delete,
    Insert,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    CtrlA,
    CtrlB,
    CtrlC,
    CtrlD,
    CtrlE,
    CtrlF,
    CtrlG,
    CtrlH,
    CtrlI,
    CtrlJ,
    CtrlK,
    CtrlL,
    CtrlM,
    CtrlN,
    CtrlO,
    CtrlP,
    CtrlQ,
    CtrlR,
    CtrlS,
    CtrlT,
    CtrlU,
    CtrlV,
    CtrlW,
    CtrlX,
    CtrlY,
    CtrlZ,
}

/// Ctrl chords indexed by letter offset from 'a'
const CTRL_LETTERS: [ControlKey; 26] = [
    ControlKey::CtrlA,
    ControlKey::CtrlB,
    ControlKey::CtrlC,
    ControlKey::CtrlD,
    ControlKey::CtrlE,
    ControlKey::CtrlF,
    ControlKey::CtrlG,
    ControlKey::CtrlH,
    ControlKey::CtrlI,
    ControlKey::CtrlJ,
    ControlKey::CtrlK,
    ControlKey::CtrlL,
    ControlKey::CtrlM,
    ControlKey::CtrlN,
    ControlKey::CtrlO,
    ControlKey::CtrlP,
    ControlKey::CtrlQ,
    ControlKey::CtrlR,
    ControlKey::CtrlS,
    ControlKey::CtrlT,
    ControlKey::CtrlU,
    ControlKey::CtrlV,
    ControlKey::CtrlW,
    ControlKey::CtrlX,
    ControlKey::CtrlY,
    ControlKey::CtrlZ,
];

impl ControlKey {
    /// The Ctrl chord for a letter, case ignored
    pub fn ctrl(letter: char) -> Option<ControlKey> {
        let letter = letter.to_ascii_lowercase();
        letter
            .is_ascii_lowercase()
            .then(|| CTRL_LETTERS[(letter as u8 - b'a') as usize])
    }

    /// The letter of a Ctrl chord, uppercase
    pub fn ctrl_letter(&self) -> Option<char> {
        CTRL_LETTERS
            .iter()
            .position(|k| k == self)
            .map(|i| (b'A' + i as u8) as char)
    }
}

/// What a recognized key press means to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub character: Option<char>,
    pub control: Option<ControlKey>,
}

impl KeyInput {
    pub fn character(c: char) -> Self {
        Self {
            character: Some(c),
            control: None,
        }
    }

    pub fn control(key: ControlKey) -> Self {
        Self {
            character: None,
            control: Some(key),
        }
    }
}

/// Transition a raw key event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Repeated,
    Released,
}

/// Raw key event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    /// A key press
    pub fn pressed(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Pressed,
        }
    }
}

/// A keyboard layout
pub trait KeyMap {
    /// Convert a key press. `None` means the key is not recognized and the
    /// caller must not act on it.
    fn convert(&self, key: Key, modifiers: Modifiers) -> Option<KeyInput>;
}

/// US English layout
#[derive(Debug, Clone, Copy, Default)]
pub struct EnUsKeyMap;

impl EnUsKeyMap {
    /// Shifted main-row digits, indexed by digit
    const SHIFTED_DIGITS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

    pub fn new() -> Self {
        Self
    }

    fn shifted(modifiers: Modifiers, normal: char, shifted: char) -> Option<KeyInput> {
        Some(KeyInput::character(if modifiers.shift { shifted } else { normal }))
    }
}

impl KeyMap for EnUsKeyMap {
    fn convert(&self, key: Key, modifiers: Modifiers) -> Option<KeyInput> {
        let input = match key {
            Key::Digit(n) if n <= 9 => {
                let c = if modifiers.shift {
                    Self::SHIFTED_DIGITS[n as usize]
                } else {
                    (b'0' + n) as char
                };
                KeyInput::character(c)
            }
            Key::Keypad(n) if n <= 9 => KeyInput::character((b'0' + n) as char),
            Key::Letter(l) if l.is_ascii_alphabetic() => {
                if modifiers.ctrl {
                    KeyInput::control(ControlKey::ctrl(l)?)
                } else if modifiers.uppercase() {
                    KeyInput::character(l.to_ascii_uppercase())
                } else {
                    KeyInput::character(l.to_ascii_lowercase())
                }
            }

            Key::BackQuote => return Self::shifted(modifiers, '`', '~'),
            Key::Minus => return Self::shifted(modifiers, '-', '_'),
            Key::Equals => return Self::shifted(modifiers, '=', '+'),
            Key::LeftBracket => return Self::shifted(modifiers, '[', '{'),
            Key::RightBracket => return Self::shifted(modifiers, ']', '}'),
            Key::Backslash => return Self::shifted(modifiers, '\\', '|'),
            Key::Semicolon => return Self::shifted(modifiers, ';', ':'),
            Key::Quote => return Self::shifted(modifiers, '\'', '"'),
            Key::Comma => return Self::shifted(modifiers, ',', '<'),
            Key::Period => return Self::shifted(modifiers, '.', '>'),
            Key::Slash => return Self::shifted(modifiers, '/', '?'),
            Key::Asterisk | Key::KeypadMultiply => KeyInput::character('*'),
            Key::Plus | Key::KeypadPlus => KeyInput::character('+'),

            Key::KeypadPeriod => KeyInput::character('.'),
            Key::KeypadDivide => KeyInput::character('/'),
            Key::KeypadMinus => KeyInput::character('-'),
            Key::KeypadEquals => KeyInput::character('='),
            Key::KeypadEnter | Key::Return => KeyInput::character('\n'),
            Key::Tab => KeyInput::character('\t'),
            Key::Space => KeyInput::character(' '),

            Key::Escape => KeyInput::control(ControlKey::Escape),
            Key::Backspace => KeyInput::control(ControlKey::Backspace),
            Key::Delete => KeyInput::control(ControlKey::Delete),
            Key::Insert => KeyInput::control(ControlKey::Insert),
            Key::Home => KeyInput::control(ControlKey::Home),
            Key::End => KeyInput::control(ControlKey::End),
            Key::PageUp => KeyInput::control(ControlKey::PageUp),
            Key::PageDown => KeyInput::control(ControlKey::PageDown),
            Key::Up => KeyInput::control(ControlKey::Up),
            Key::Down => KeyInput::control(ControlKey::Down),
            Key::Left => KeyInput::control(ControlKey::Left),
            Key::Right => KeyInput::control(ControlKey::Right),

            _ => {
                debug!("Unsupported key {:?}", key);
                return None;
            }
        };
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(key: Key, modifiers: Modifiers) -> Option<KeyInput> {
        EnUsKeyMap::new().convert(key, modifiers)
    }

    fn char_of(key: Key, modifiers: Modifiers) -> Option<char> {
        convert(key, modifiers).and_then(|input| input.character)
    }

    #[test]
    fn test_digits() {
        assert_eq!(char_of(Key::Digit(0), Modifiers::NONE), Some('0'));
        assert_eq!(char_of(Key::Digit(7), Modifiers::NONE), Some('7'));
        assert_eq!(
            convert(Key::Digit(1), Modifiers::SHIFT),
            Some(KeyInput::character('!'))
        );
        let shifted: String = (0..=9)
            .filter_map(|n| char_of(Key::Digit(n), Modifiers::SHIFT))
            .collect();
        assert_eq!(shifted, ")!@#$%^&*(");
    }

    #[test]
    fn test_keypad_digits_ignore_shift() {
        assert_eq!(char_of(Key::Keypad(5), Modifiers::NONE), Some('5'));
        assert_eq!(char_of(Key::Keypad(5), Modifiers::SHIFT), Some('5'));
    }

    #[test]
    fn test_out_of_range_digit() {
        assert_eq!(convert(Key::Digit(10), Modifiers::NONE), None);
        assert_eq!(convert(Key::Keypad(42), Modifiers::NONE), None);
    }

    #[test]
    fn test_letters_case() {
        assert_eq!(char_of(Key::Letter('a'), Modifiers::NONE), Some('a'));
        assert_eq!(char_of(Key::Letter('A'), Modifiers::NONE), Some('a'));
        assert_eq!(char_of(Key::Letter('q'), Modifiers::SHIFT), Some('Q'));
        assert_eq!(
            convert(Key::Letter('a'), Modifiers::CAPS_LOCK),
            Some(KeyInput::character('A'))
        );
        let both = Modifiers {
            shift: true,
            caps_lock: true,
            ..Modifiers::NONE
        };
        assert_eq!(char_of(Key::Letter('z'), both), Some('z'));
    }

    #[test]
    fn test_ctrl_letters() {
        assert_eq!(
            convert(Key::Letter('a'), Modifiers::CTRL),
            Some(KeyInput::control(ControlKey::CtrlA))
        );
        assert_eq!(
            convert(Key::Letter('t'), Modifiers::CTRL),
            Some(KeyInput::control(ControlKey::CtrlT))
        );
        let ctrl_shift = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        assert_eq!(
            convert(Key::Letter('z'), ctrl_shift),
            Some(KeyInput::control(ControlKey::CtrlZ))
        );
    }

    #[test]
    fn test_ctrl_letter_roundtrip() {
        for letter in 'A'..='Z' {
            let key = ControlKey::ctrl(letter).unwrap();
            assert_eq!(key.ctrl_letter(), Some(letter));
        }
        assert_eq!(ControlKey::ctrl('1'), None);
        assert_eq!(ControlKey::Home.ctrl_letter(), None);
    }

    #[test]
    fn test_punctuation() {
        let pairs = [
            (Key::BackQuote, '`', '~'),
            (Key::Minus, '-', '_'),
            (Key::LeftBracket, '[', '{'),
            (Key::RightBracket, ']', '}'),
            (Key::Backslash, '\\', '|'),
            (Key::Semicolon, ';', ':'),
            (Key::Quote, '\'', '"'),
            (Key::Equals, '=', '+'),
            (Key::Comma, ',', '<'),
            (Key::Period, '.', '>'),
            (Key::Slash, '/', '?'),
        ];
        for (key, normal, shifted) in pairs {
            assert_eq!(char_of(key, Modifiers::NONE), Some(normal), "{:?}", key);
            assert_eq!(char_of(key, Modifiers::SHIFT), Some(shifted), "{:?}", key);
        }
    }

    #[test]
    fn test_keypad_operators() {
        assert_eq!(char_of(Key::KeypadPeriod, Modifiers::NONE), Some('.'));
        assert_eq!(char_of(Key::KeypadDivide, Modifiers::NONE), Some('/'));
        assert_eq!(char_of(Key::KeypadMultiply, Modifiers::SHIFT), Some('*'));
        assert_eq!(char_of(Key::KeypadMinus, Modifiers::NONE), Some('-'));
        assert_eq!(char_of(Key::KeypadPlus, Modifiers::NONE), Some('+'));
        assert_eq!(char_of(Key::KeypadEquals, Modifiers::NONE), Some('='));
    }

    #[test]
    fn test_whitespace_keys() {
        assert_eq!(char_of(Key::Tab, Modifiers::NONE), Some('\t'));
        assert_eq!(char_of(Key::Space, Modifiers::NONE), Some(' '));
        assert_eq!(char_of(Key::Return, Modifiers::NONE), Some('\n'));
        assert_eq!(char_of(Key::KeypadEnter, Modifiers::NONE), Some('\n'));
    }

    #[test]
    fn test_control_keys() {
        let keys = [
            (Key::Escape, ControlKey::Escape),
            (Key::Backspace, ControlKey::Backspace),
            (Key::Delete, ControlKey::Delete),
            (Key::Insert, ControlKey::Insert),
            (Key::Home, ControlKey::Home),
            (Key::End, ControlKey::End),
            (Key::PageUp, ControlKey::PageUp),
            (Key::PageDown, ControlKey::PageDown),
            (Key::Up, ControlKey::Up),
            (Key::Down, ControlKey::Down),
            (Key::Left, ControlKey::Left),
            (Key::Right, ControlKey::Right),
        ];
        for (key, control) in keys {
            assert_eq!(
                convert(key, Modifiers::NONE),
                Some(KeyInput::control(control))
            );
        }
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(convert(Key::Function(1), Modifiers::NONE), None);
        assert_eq!(convert(Key::Unknown, Modifiers::NONE), None);
        assert_eq!(convert(Key::Letter('1'), Modifiers::NONE), None);
    }
}

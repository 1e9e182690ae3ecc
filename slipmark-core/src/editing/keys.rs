//! Key events and key scripts.
//!
//! A key script is a compact way to type into an editor from tests and the
//! command line: plain characters type themselves, a space is the space key,
//! a newline is Enter, and braces name special keys:
//!
//! ```text
//! # Title{enter}some **bold** text{backspace}
//! ```
//!
//! Recognized names are `{enter}`, `{backspace}` (or `{bs}`), `{space}` and
//! `{shift+X}` for a shifted character. `{{` and `}}` type literal braces.

use crate::error::KeyScriptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        KeyEvent { key, shift: false }
    }

    pub fn char(c: char) -> Self {
        KeyEvent::new(Key::Char(c))
    }

    /// The key carrying `c`, pressed with shift held.
    pub fn shifted(c: char) -> Self {
        KeyEvent {
            key: Key::Char(c),
            shift: true,
        }
    }

    pub fn space() -> Self {
        KeyEvent::new(Key::Space)
    }

    pub fn enter() -> Self {
        KeyEvent::new(Key::Enter)
    }

    pub fn backspace() -> Self {
        KeyEvent::new(Key::Backspace)
    }

    /// The character this event types, resolving shift on a US layout.
    pub fn typed_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if self.shift => Some(shift_us(c)),
            Key::Char(c) => Some(c),
            Key::Space | Key::Enter | Key::Backspace => None,
        }
    }
}

fn shift_us(c: char) -> char {
    match c {
        '`' => '~',
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        c => c.to_ascii_uppercase(),
    }
}

/// Parse a key script into events.
pub fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>, KeyScriptError> {
    let mut events = Vec::new();
    let mut chars = script.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        let event = match c {
            ' ' => KeyEvent::space(),
            '\n' => KeyEvent::enter(),
            '\r' => continue,
            '{' if chars.peek().map(|(_, next)| *next) == Some('{') => {
                chars.next();
                KeyEvent::char('{')
            }
            '}' if chars.peek().map(|(_, next)| *next) == Some('}') => {
                chars.next();
                KeyEvent::char('}')
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(KeyScriptError::Unterminated(position)),
                    }
                }
                named_key(&name)?
            }
            c => KeyEvent::char(c),
        };
        events.push(event);
    }
    Ok(events)
}

fn named_key(name: &str) -> Result<KeyEvent, KeyScriptError> {
    let lowered = name.to_ascii_lowercase();
    match lowered.as_str() {
        "enter" | "return" => Ok(KeyEvent::enter()),
        "backspace" | "bs" => Ok(KeyEvent::backspace()),
        "space" => Ok(KeyEvent::space()),
        _ => {
            let shifted = lowered.strip_prefix("shift+").and_then(|rest| {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyEvent::shifted(c)),
                    _ => None,
                }
            });
            shifted.ok_or_else(|| KeyScriptError::UnknownKey(name.to_string()))
        }
    }
}

use serde::{Deserialize, Serialize};

/// A keystroke as seen by a typing session.
///
/// Tab and Enter are logical signals, distinct from literal characters.
/// Modifier combinations are filtered out before a `Key` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Tab,
    Enter,
}

/// Result of comparing one keystroke with the expected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// How a session reacts to mistakes. Read fresh on every keystroke, so it
/// can change mid-session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingPolicy {
    /// Keep the cursor on a mistyped character until it is typed correctly.
    pub stop_on_error: bool,
}

impl TypingPolicy {
    pub fn new(stop_on_error: bool) -> Self {
        Self { stop_on_error }
    }

    /// Whether the cursor moves past a mistyped character.
    pub fn advances_on_error(&self) -> bool {
        !self.stop_on_error
    }
}

pub fn key_matches(key: Key, expected: char) -> bool {
    match key {
        Key::Char(c) => c == expected,
        Key::Tab => expected == '\t',
        Key::Enter => expected == '\n',
    }
}

pub fn outcome(key: Key, expected: char) -> Outcome {
    if key_matches(key, expected) {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    }
}

/// Characters skipped after a newline, as an editor's auto-indent would.
pub fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

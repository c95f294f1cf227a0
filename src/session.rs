use std::collections::HashSet;
use std::time::Instant;

use crate::stats::Statistics;
use crate::typing_policy::{is_indent, outcome, Outcome, TypingPolicy};

pub use crate::typing_policy::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Active,
    Completed,
}

/// Progress through one chunk. Plain data; all changes go through
/// [`transition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Index of the next character to type.
    pub cursor: usize,
    /// Positions that were mistyped at least once.
    pub error_positions: HashSet<usize>,
    pub correct: usize,
    pub errors: usize,
    pub started_at: Option<Instant>,
    pub ended_at: Option<Instant>,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match (self.started_at, self.ended_at) {
            (None, _) => Phase::NotStarted,
            (Some(_), None) => Phase::Active,
            (Some(_), Some(_)) => Phase::Completed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase() == Phase::Active
    }

    pub fn is_error(&self, index: usize) -> bool {
        self.error_positions.contains(&index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Begin { at: Instant },
    Key {
        key: Key,
        at: Instant,
        policy: TypingPolicy,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    /// Set exactly when this event moved the session into `Completed`.
    pub completed: bool,
}

impl Transition {
    fn unchanged(state: SessionState) -> Self {
        Self {
            state,
            completed: false,
        }
    }
}

/// Apply one event to a session over `content`.
///
/// Events that make no sense in the current phase (a key before `Begin`, a
/// second `Begin`, anything after completion except `Reset`) leave the state
/// untouched.
pub fn transition(mut state: SessionState, event: Event, content: &[char]) -> Transition {
    match event {
        Event::Reset => Transition::unchanged(SessionState::default()),
        Event::Begin { at } => {
            if state.phase() == Phase::NotStarted {
                state.started_at = Some(at);
            }
            Transition::unchanged(state)
        }
        Event::Key { key, at, policy } => {
            if state.phase() != Phase::Active {
                return Transition::unchanged(state);
            }
            let Some(&expected) = content.get(state.cursor) else {
                return complete(state, at);
            };

            match outcome(key, expected) {
                Outcome::Correct => {
                    state.cursor += 1;
                    state.correct += 1;
                    // only the Enter signal auto-indents
                    if key == Key::Enter {
                        while content.get(state.cursor).is_some_and(|&c| is_indent(c)) {
                            state.cursor += 1;
                            state.correct += 1;
                        }
                    }
                }
                Outcome::Incorrect => {
                    state.errors += 1;
                    state.error_positions.insert(state.cursor);
                    if policy.advances_on_error() {
                        state.cursor += 1;
                    }
                }
            }

            if state.cursor >= content.len() {
                complete(state, at)
            } else {
                Transition::unchanged(state)
            }
        }
    }
}

fn complete(mut state: SessionState, at: Instant) -> Transition {
    state.ended_at = Some(at);
    Transition {
        state,
        completed: true,
    }
}

/// A session bound to the text of one chunk, driven by the wall clock.
#[derive(Debug, Clone)]
pub struct TypingSession {
    content: Vec<char>,
    state: SessionState,
}

impl TypingSession {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.chars().collect(),
            state: SessionState::default(),
        }
    }

    pub fn content(&self) -> &[char] {
        &self.content
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Feed an event and report whether it completed the session.
    pub fn apply(&mut self, event: Event) -> bool {
        let state = std::mem::take(&mut self.state);
        let Transition { state, completed } = transition(state, event, &self.content);
        self.state = state;
        completed
    }

    pub fn begin(&mut self) {
        self.apply(Event::Begin { at: Instant::now() });
    }

    pub fn evaluate(&mut self, key: Key, policy: TypingPolicy) -> bool {
        self.apply(Event::Key {
            key,
            at: Instant::now(),
            policy,
        })
    }

    pub fn reset(&mut self) {
        self.apply(Event::Reset);
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics_at(Instant::now())
    }

    pub fn statistics_at(&self, now: Instant) -> Statistics {
        Statistics::compute(&self.state, self.content.len(), now)
    }
}

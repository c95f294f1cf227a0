use std::time::{Duration, Instant};

use crate::session::SessionState;

/// Standard word length used for words-per-minute.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Snapshot of a session's performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub wpm: u32,
    /// Percentage of keystrokes that were correct, 0..=100.
    pub accuracy: u32,
    /// Percentage of the chunk typed, 0..=100.
    pub progress: u32,
    pub total_chars: usize,
    pub typed_chars: usize,
    pub correct: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

impl Statistics {
    /// Derive statistics for `state` over a chunk of `total_chars`
    /// characters. A running session is measured up to `now`.
    pub fn compute(state: &SessionState, total_chars: usize, now: Instant) -> Self {
        let elapsed = match state.started_at {
            Some(start) => state.ended_at.unwrap_or(now).saturating_duration_since(start),
            None => Duration::ZERO,
        };

        Self {
            wpm: wpm(state.correct, elapsed.as_secs_f64()),
            accuracy: accuracy(state.correct, state.errors),
            progress: percent(state.cursor, total_chars),
            total_chars,
            typed_chars: state.cursor,
            correct: state.correct,
            errors: state.errors,
            elapsed,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs_f64().round() as u64
    }

    /// Elapsed time as `m:ss`.
    pub fn format_elapsed(&self) -> String {
        let secs = self.elapsed_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn accuracy_band(&self) -> AccuracyBand {
        AccuracyBand::from_accuracy(self.accuracy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Good,
    Fair,
    Poor,
}

impl AccuracyBand {
    pub fn from_accuracy(accuracy: u32) -> Self {
        match accuracy {
            95.. => AccuracyBand::Good,
            80..=94 => AccuracyBand::Fair,
            _ => AccuracyBand::Poor,
        }
    }
}

/// Words per minute from correct characters, 0 when no time has passed.
pub fn wpm(correct_chars: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }
    let minutes = elapsed_secs / 60.0;
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Correct share of all keystrokes, 100 before any keystroke.
pub fn accuracy(correct: usize, errors: usize) -> u32 {
    let attempts = correct + errors;
    if attempts == 0 {
        return 100;
    }
    percent(correct, attempts)
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cursor: usize, correct: usize, errors: usize) -> SessionState {
        SessionState {
            cursor,
            correct,
            errors,
            ..SessionState::default()
        }
    }

    #[test]
    fn fresh_state_has_safe_defaults() {
        let stats = Statistics::compute(&SessionState::default(), 0, Instant::now());
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.progress, 0);
        assert_eq!(stats.elapsed, Duration::ZERO);
        assert_eq!(stats.format_elapsed(), "0:00");
    }

    #[test]
    fn wpm_uses_five_chars_per_word() {
        assert_eq!(wpm(300, 60.0), 60);
        assert_eq!(wpm(150, 30.0), 60);
        assert_eq!(wpm(100, 0.0), 0);
        // 7 chars in 2s = 1.4 words / (1/30) min = 42
        assert_eq!(wpm(7, 2.0), 42);
    }

    #[test]
    fn accuracy_rounds_to_whole_percent() {
        assert_eq!(accuracy(1, 1), 50);
        assert_eq!(accuracy(2, 1), 67);
        assert_eq!(accuracy(0, 3), 0);
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn running_session_measures_to_now() {
        let start = Instant::now();
        let mut s = state(50, 50, 0);
        s.started_at = Some(start);

        let stats = Statistics::compute(&s, 200, start + Duration::from_secs(30));
        assert_eq!(stats.wpm, 20);
        assert_eq!(stats.progress, 25);
        assert_eq!(stats.typed_chars, 50);
        assert_eq!(stats.format_elapsed(), "0:30");
    }

    #[test]
    fn completed_session_ignores_now() {
        let start = Instant::now();
        let mut s = state(10, 10, 0);
        s.started_at = Some(start);
        s.ended_at = Some(start + Duration::from_secs(75));

        let stats = Statistics::compute(&s, 10, start + Duration::from_secs(500));
        assert_eq!(stats.elapsed_secs(), 75);
        assert_eq!(stats.format_elapsed(), "1:15");
        assert_eq!(stats.progress, 100);
    }

    #[test]
    fn accuracy_bands() {
        assert_eq!(AccuracyBand::from_accuracy(100), AccuracyBand::Good);
        assert_eq!(AccuracyBand::from_accuracy(95), AccuracyBand::Good);
        assert_eq!(AccuracyBand::from_accuracy(94), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(80), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(79), AccuracyBand::Poor);
    }
}

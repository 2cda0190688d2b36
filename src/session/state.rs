use std::collections::HashSet;
use std::time::Instant;

use crate::engine::{energy, scoring};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Completed,
}

/// One accepted keystroke at its cursor index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedChar {
    pub ch: char,
    pub correct: bool,
}

/// What a single accepted keystroke did, for presentation collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeystrokeOutcome {
    pub index: usize,
    pub correct: bool,
    /// Correctly typed space: the word-complete effects hook.
    pub word_boundary: bool,
}

/// State machine for one round of typing.
///
/// Three error ledgers with different policies:
/// - `total_errors`: currently-standing mistakes, decremented when an
///   incorrect char is backspaced. Drives the energy penalty.
/// - `raw_total_errors`: every mistake ever made, never decremented.
///   Drives raw accuracy.
/// - `ever_correct`: indices that have scored, so a backspaced-and-retyped
///   char is awarded at most once.
pub struct Session {
    phase: Phase,
    sample: Vec<char>,
    typed: Vec<TypedChar>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    total_errors: usize,
    raw_total_errors: usize,
    ever_correct: HashSet<usize>,
    streak: u32,
    score: f64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            sample: Vec::new(),
            typed: Vec::new(),
            started_at: None,
            finished_at: None,
            total_errors: 0,
            raw_total_errors: 0,
            ever_correct: HashSet::new(),
            streak: 0,
            score: 0.0,
        }
    }

    /// Begin a round on `text`. Empty text is a no-op: nothing loads and
    /// the current state is untouched.
    pub fn load_sample(&mut self, text: &str) {
        let sample: Vec<char> = text.chars().collect();
        if sample.is_empty() {
            return;
        }
        *self = Self::new();
        self.sample = sample;
        self.phase = Phase::Active;
    }

    /// Accept one keystroke. Returns `None` (with no state change) unless
    /// the round is active and the cursor is in range.
    ///
    /// `multiplier` is the current power tier; it only affects the score
    /// awarded the first time an index is typed correctly.
    pub fn type_char(&mut self, ch: char, multiplier: u32) -> Option<KeystrokeOutcome> {
        if self.phase != Phase::Active {
            return None;
        }
        let index = self.typed.len();
        let expected = *self.sample.get(index)?;

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        let correct = ch == expected;
        if correct {
            self.streak += 1;
            if self.ever_correct.insert(index) {
                self.score += scoring::char_score(
                    self.ever_correct.len(),
                    index + 1,
                    multiplier,
                    self.sample.len(),
                );
            }
        } else {
            self.total_errors += 1;
            self.raw_total_errors += 1;
            self.streak = 0;
        }
        self.typed.push(TypedChar { ch, correct });

        if self.typed.len() == self.sample.len() {
            self.phase = Phase::Completed;
            self.finished_at = Some(Instant::now());
        }

        Some(KeystrokeOutcome {
            index,
            correct,
            word_boundary: correct && ch == ' ',
        })
    }

    /// Remove typed characters from the end. Returns the removed indices,
    /// most recent first; empty when nothing could be removed.
    ///
    /// Word mode skips trailing spaces, then the word itself, stopping at
    /// (and keeping) the preceding space or the start of input. Only
    /// `total_errors` is rolled back; raw errors and ever-correct marks
    /// are history and stay.
    pub fn backspace(&mut self, whole_word: bool) -> Vec<usize> {
        if self.phase != Phase::Active || self.typed.is_empty() {
            return Vec::new();
        }

        let delete_to = if whole_word {
            let mut i = self.typed.len();
            while i > 0 && self.typed[i - 1].ch == ' ' {
                i -= 1;
            }
            while i > 0 && self.typed[i - 1].ch != ' ' {
                i -= 1;
            }
            i
        } else {
            self.typed.len() - 1
        };

        let mut removed = Vec::with_capacity(self.typed.len() - delete_to);
        while self.typed.len() > delete_to {
            let Some(tc) = self.typed.pop() else { break };
            if !tc.correct {
                self.total_errors = self.total_errors.saturating_sub(1);
            }
            removed.push(self.typed.len());
        }
        self.streak = 0;
        removed
    }

    /// Back to `Idle`, discarding the round. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sample(&self) -> &[char] {
        &self.sample
    }

    pub fn typed(&self) -> &[TypedChar] {
        &self.typed
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    pub fn raw_total_errors(&self) -> usize {
        self.raw_total_errors
    }

    /// 0–100 display value, derived from the standing error count.
    pub fn energy(&self) -> u8 {
        energy::energy(self.total_errors)
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn uncorrected_errors(&self) -> usize {
        self.typed.iter().filter(|tc| !tc.correct).count()
    }

    pub fn correct_chars(&self) -> usize {
        self.typed.iter().filter(|tc| tc.correct).count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(text: &str) -> Session {
        let mut session = Session::new();
        session.load_sample(text);
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.energy(), 100);
        assert_eq!(session.score(), 0.0);
    }

    #[test]
    fn test_load_empty_sample_is_noop() {
        let mut session = Session::new();
        session.load_sample("");
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.type_char('a', 1).is_none());
    }

    #[test]
    fn test_load_sample_resets_previous_round() {
        let mut session = active("abc");
        session.type_char('x', 1);
        assert_eq!(session.raw_total_errors(), 1);

        session.load_sample("hi");
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.raw_total_errors(), 0);
        assert_eq!(session.energy(), 100);
    }

    #[test]
    fn test_completion_iff_full_length() {
        let mut session = active("cat");
        session.type_char('c', 1);
        session.type_char('a', 1);
        assert_eq!(session.phase(), Phase::Active);
        session.type_char('t', 1);
        assert_eq!(session.phase(), Phase::Completed);
        assert_eq!(session.cursor(), session.sample().len());
    }

    #[test]
    fn test_typing_after_completion_is_noop() {
        let mut session = active("a");
        session.type_char('a', 1);
        assert_eq!(session.phase(), Phase::Completed);
        assert!(session.type_char('b', 1).is_none());
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_streak_increments_and_resets() {
        let mut session = active("aaaa");
        session.type_char('a', 1);
        session.type_char('a', 1);
        assert_eq!(session.streak(), 2);
        session.type_char('x', 1);
        assert_eq!(session.streak(), 0);
        session.type_char('a', 1);
        assert_eq!(session.streak(), 1);
    }

    #[test]
    fn test_backspace_resets_streak() {
        let mut session = active("abc");
        session.type_char('a', 1);
        assert_eq!(session.streak(), 1);
        assert_eq!(session.backspace(false), vec![0]);
        assert_eq!(session.streak(), 0);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut session = active("abc");
        assert!(session.backspace(false).is_empty());
        assert!(session.backspace(true).is_empty());
    }

    #[test]
    fn test_backspace_rolls_back_standing_error_only() {
        let mut session = active("cat");
        session.type_char('c', 1);
        session.type_char('x', 1);
        assert_eq!(session.total_errors(), 1);
        assert_eq!(session.raw_total_errors(), 1);

        session.backspace(false);
        assert_eq!(session.total_errors(), 0);
        assert_eq!(session.raw_total_errors(), 1);
    }

    #[test]
    fn test_word_backspace_skips_trailing_spaces_then_word() {
        let mut session = active("hi there");
        for ch in "hi t".chars() {
            session.type_char(ch, 1);
        }
        // The scan consumes "t" and stops at the space after "hi",
        // which stays in place.
        let removed = session.backspace(true);
        assert_eq!(removed, vec![3]);
        assert_eq!(session.cursor(), 3);
    }

    #[test]
    fn test_word_backspace_with_no_preceding_space_clears_all() {
        let mut session = active("storm");
        for ch in "sto".chars() {
            session.type_char(ch, 1);
        }
        let removed = session.backspace(true);
        assert_eq!(removed, vec![2, 1, 0]);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_word_backspace_rolls_back_each_removed_error() {
        let mut session = active("ab cd");
        session.type_char('a', 1);
        session.type_char('b', 1);
        session.type_char(' ', 1);
        session.type_char('x', 1); // wrong
        session.type_char('y', 1); // wrong
        assert_eq!(session.total_errors(), 2);

        let removed = session.backspace(true);
        assert_eq!(removed, vec![4, 3]);
        assert_eq!(session.total_errors(), 0);
        assert_eq!(session.raw_total_errors(), 2);
    }

    #[test]
    fn test_score_awarded_once_per_index() {
        let mut session = active("cat");
        session.type_char('c', 1);
        let first = session.score();
        assert!(first > 0.0);

        session.backspace(false);
        session.type_char('c', 1);
        assert_eq!(session.score(), first);
    }

    #[test]
    fn test_incorrect_keystroke_awards_nothing() {
        let mut session = active("cat");
        session.type_char('x', 1);
        assert_eq!(session.score(), 0.0);
    }

    #[test]
    fn test_score_monotonically_non_decreasing() {
        let mut session = active("cat dog");
        let mut prev = 0.0;
        for ch in "cxt dog".chars() {
            session.type_char(ch, 1);
            assert!(session.score() >= prev);
            prev = session.score();
        }
    }

    #[test]
    fn test_energy_untouched_by_correct_keystrokes() {
        let mut session = active("abcdef");
        session.type_char('x', 1);
        let after_error = session.energy();
        assert!(after_error < 100);

        session.type_char('b', 1);
        session.type_char('c', 1);
        assert_eq!(session.energy(), after_error);
    }

    #[test]
    fn test_energy_restored_by_correcting() {
        let mut session = active("abc");
        session.type_char('x', 1);
        assert!(session.energy() < 100);
        session.backspace(false);
        assert_eq!(session.energy(), 100);
    }

    #[test]
    fn test_raw_errors_monotonic() {
        let mut session = active("abcd");
        session.type_char('x', 1);
        session.type_char('y', 1);
        session.backspace(false);
        session.backspace(false);
        session.type_char('a', 1);
        assert_eq!(session.raw_total_errors(), 2);
        assert_eq!(session.total_errors(), 0);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = active("abc");
        session.type_char('a', 1);
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.score(), 0.0);
        // Idempotent
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_word_boundary_on_correct_space_only() {
        let mut session = active("a b");
        assert!(!session.type_char('a', 1).unwrap().word_boundary);
        assert!(session.type_char(' ', 1).unwrap().word_boundary);

        let mut session = active("a b");
        session.type_char('a', 1);
        // Wrong char where a space was expected: not a word boundary
        assert!(!session.type_char('x', 1).unwrap().word_boundary);
    }
}

use crate::language::Vocabulary;
use crate::stats::{recompute_stats, Counters, Stats};
use crate::typing_policy::{classify_change, classify_word, is_on_track, InputChange, Outcome};
use crate::word_generator::{generate_word_list, WORDS_PER_SESSION};
use log::{debug, info};
use std::time::{Duration, SystemTime};

/// Length of every test
pub const SESSION_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FinishReason {
    TimeExpired,
    WordsExhausted,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedWord {
    pub word: String,
    pub correct: bool,
}

/// Summary shown on the results panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResults {
    pub stats: Stats,
    pub correct_words: usize,
    pub wrong_words: usize,
    pub correct_keystrokes: usize,
    pub error_keystrokes: usize,
    pub total_keystrokes: usize,
    pub total_chars: usize,
    pub elapsed_secs: u64,
    pub reason: Option<FinishReason>,
}

/// One timed attempt, from the first keystroke until time runs out,
/// the words run out, or the user finishes early.
#[derive(Debug, Clone)]
pub struct Session {
    words: Vec<String>,
    current_index: usize,
    input: String,
    completed: Vec<CompletedWord>,
    correct_words: usize,
    wrong_words: usize,
    total_keystrokes: usize,
    counters: Counters,
    started_at: Option<SystemTime>,
    finished_at: Option<SystemTime>,
    time_left_secs: u64,
    stats: Stats,
    phase: Phase,
    finish_reason: Option<FinishReason>,
}

impl Session {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            current_index: 0,
            input: String::new(),
            completed: Vec::new(),
            correct_words: 0,
            wrong_words: 0,
            total_keystrokes: 0,
            counters: Counters::default(),
            started_at: None,
            finished_at: None,
            time_left_secs: SESSION_SECS,
            stats: Stats::default(),
            phase: Phase::Idle,
            finish_reason: None,
        }
    }

    /// A fresh idle session dealt from `vocabulary`
    pub fn generate(vocabulary: &Vocabulary) -> Self {
        Self::new(generate_word_list(vocabulary, WORDS_PER_SESSION))
    }

    /// "New Test": a brand-new idle session with a new word list. Nothing
    /// carries over from `self`.
    pub fn reset(&self, vocabulary: &Vocabulary) -> Self {
        debug!("new test requested from phase {}", self.phase);
        Self::generate(vocabulary)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_index).map(String::as_str)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn completed(&self) -> &[CompletedWord] {
        &self.completed
    }

    pub fn correct_words(&self) -> usize {
        self.correct_words
    }

    pub fn wrong_words(&self) -> usize {
        self.wrong_words
    }

    pub fn correct_keystrokes(&self) -> usize {
        self.counters.correct_keystrokes
    }

    pub fn error_keystrokes(&self) -> usize {
        self.counters.error_keystrokes
    }

    pub fn total_keystrokes(&self) -> usize {
        self.total_keystrokes
    }

    pub fn total_chars(&self) -> usize {
        self.counters.total_chars
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Whether the in-progress input is still a prefix of the current word
    pub fn is_current_input_correct(&self) -> bool {
        match self.current_word() {
            Some(word) => is_on_track(&self.input, word),
            None => true,
        }
    }

    /// Share of the word list already submitted, as a rounded percentage
    pub fn progress_percent(&self) -> u32 {
        if self.words.is_empty() {
            return 0;
        }
        (self.current_index as f64 / self.words.len() as f64 * 100.0).round() as u32
    }

    /// Time since the first keystroke (or until the finish), in whole
    /// seconds capped at the session length.
    pub fn elapsed_secs(&self, now: SystemTime) -> u64 {
        let end = self.finished_at.unwrap_or(now);
        (self.elapsed(end).as_millis() / 1000).min(SESSION_SECS as u128) as u64
    }

    fn elapsed(&self, now: SystemTime) -> Duration {
        self.started_at
            .and_then(|start| now.duration_since(start).ok())
            .unwrap_or_default()
    }

    fn start(&mut self, now: SystemTime) {
        self.started_at = Some(now);
        self.phase = Phase::Running;
        info!("session started with {} words", self.words.len());
    }

    /// Apply a character-level change to the in-progress input.
    pub fn set_input(&mut self, value: &str, now: SystemTime) {
        if self.has_finished() {
            return;
        }
        if self.current_word().is_none() {
            return;
        }
        if self.phase == Phase::Idle && !value.is_empty() {
            self.start(now);
        }

        let target = &self.words[self.current_index];
        let change = classify_change(&self.input, value, target);
        if change.is_keystroke() {
            self.total_keystrokes += 1;
        }
        match change {
            InputChange::Inserted(Outcome::Correct) => self.counters.correct_keystrokes += 1,
            InputChange::Inserted(Outcome::Incorrect) => self.counters.error_keystrokes += 1,
            InputChange::Deleted | InputChange::Unchanged => {}
        }

        self.input = value.to_string();
    }

    pub fn type_char(&mut self, c: char, now: SystemTime) {
        let mut next = self.input.clone();
        next.push(c);
        self.set_input(&next, now);
    }

    pub fn backspace(&mut self, now: SystemTime) {
        if self.input.is_empty() {
            return;
        }
        let mut next = self.input.clone();
        next.pop();
        self.set_input(&next, now);
    }

    /// Submit the current word (space or enter).
    pub fn submit(&mut self, now: SystemTime) {
        if self.has_finished() {
            return;
        }
        let Some(target) = self.words.get(self.current_index) else {
            return;
        };
        let Some(outcome) = classify_word(&self.input, target) else {
            return;
        };

        self.counters.total_chars += target.chars().count() + 1;
        let correct = outcome.is_correct();
        if correct {
            self.correct_words += 1;
        } else {
            self.wrong_words += 1;
        }
        debug!(
            "word {} '{}' submitted as {:?}",
            self.current_index, target, outcome
        );
        self.completed.push(CompletedWord {
            word: target.clone(),
            correct,
        });
        self.current_index += 1;
        self.input.clear();

        if self.current_index >= self.words.len() {
            self.finish_with(FinishReason::WordsExhausted, now);
        }
    }

    /// Countdown timer callback
    pub fn on_countdown_tick(&mut self, now: SystemTime) {
        if !self.is_running() {
            return;
        }
        let elapsed_secs = (self.elapsed(now).as_millis() / 1000) as u64;
        self.time_left_secs = SESSION_SECS.saturating_sub(elapsed_secs);

        if self.time_left_secs == 0 {
            self.finish_with(FinishReason::TimeExpired, now);
        }
    }

    /// Stats refresh timer callback
    pub fn on_stats_tick(&mut self, now: SystemTime) {
        if !self.is_running() {
            return;
        }
        self.recompute_stats(now, false);
    }

    /// Manual "Finish"; only meaningful while running.
    pub fn finish(&mut self, now: SystemTime) {
        if self.is_running() {
            self.finish_with(FinishReason::Manual, now);
        }
    }

    fn finish_with(&mut self, reason: FinishReason, now: SystemTime) {
        if self.has_finished() {
            return;
        }
        self.recompute_stats(now, true);
        self.phase = Phase::Finished;
        self.finish_reason = Some(reason);
        self.finished_at = Some(now);
        info!(
            "session finished ({}): {} wpm, {}% acc, {} net",
            reason, self.stats.wpm, self.stats.accuracy, self.stats.net_wpm
        );
    }

    fn recompute_stats(&mut self, now: SystemTime, at_end: bool) {
        if self.started_at.is_none() {
            return;
        }
        self.stats = recompute_stats(&self.counters, self.elapsed(now), self.stats, at_end);
    }

    pub fn results(&self, now: SystemTime) -> SessionResults {
        SessionResults {
            stats: self.stats,
            correct_words: self.correct_words,
            wrong_words: self.wrong_words,
            correct_keystrokes: self.counters.correct_keystrokes,
            error_keystrokes: self.counters.error_keystrokes,
            total_keystrokes: self.total_keystrokes,
            total_chars: self.counters.total_chars,
            elapsed_secs: self.elapsed_secs(now),
            reason: self.finish_reason,
        }
    }
}

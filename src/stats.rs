use std::time::Duration;

/// Elapsed time below this reports 0 wpm instead of dividing by almost nothing
pub const MIN_ELAPSED_MINUTES: f64 = 0.01;

/// Standard word length used to convert characters into words
pub const CHARS_PER_WORD: f64 = 5.0;

/// Live and final figures shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: u32,
    pub net_wpm: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            net_wpm: 0,
        }
    }
}

/// Counters the stats are derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_chars: usize,
    pub correct_keystrokes: usize,
    pub error_keystrokes: usize,
}

impl Counters {
    pub fn classified_keystrokes(&self) -> usize {
        self.correct_keystrokes + self.error_keystrokes
    }
}

/// Gross words per minute: characters / 5 / minutes, rounded.
pub fn calculate_wpm(total_chars: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes < MIN_ELAPSED_MINUTES {
        return 0;
    }
    (total_chars as f64 / CHARS_PER_WORD / minutes).round() as u32
}

/// Percentage of classified keystrokes that were correct, `None` before any keystroke.
pub fn calculate_accuracy(correct: usize, errors: usize) -> Option<u32> {
    let total = correct + errors;
    if total == 0 {
        return None;
    }
    Some((correct as f64 / total as f64 * 100.0).round() as u32)
}

pub fn calculate_net_wpm(wpm: u32, accuracy: u32) -> u32 {
    (wpm as f64 * (accuracy as f64 / 100.0)).round() as u32
}

/// Derive wpm, accuracy and net wpm from the counters.
///
/// Without classified keystrokes a running session keeps the `previous`
/// accuracy and net wpm (100 and 0 on a fresh session); at the end they
/// both report 0.
pub fn recompute_stats(
    counters: &Counters,
    elapsed: Duration,
    previous: Stats,
    at_end: bool,
) -> Stats {
    let wpm = calculate_wpm(counters.total_chars, elapsed);

    match calculate_accuracy(counters.correct_keystrokes, counters.error_keystrokes) {
        Some(accuracy) => Stats {
            wpm,
            accuracy,
            net_wpm: calculate_net_wpm(wpm, accuracy),
        },
        None if at_end => Stats {
            wpm,
            accuracy: 0,
            net_wpm: 0,
        },
        None => Stats {
            wpm,
            accuracy: previous.accuracy,
            net_wpm: previous.net_wpm,
        },
    }
}

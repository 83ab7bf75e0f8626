use crate::session::Session;
use crate::typing_policy::is_on_track;

pub const WORDS_PER_LINE: usize = 5;
pub const LINES_VISIBLE: usize = 3;

/// How a word in the visible window should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    CompletedCorrect,
    CompletedIncorrect,
    Active,
    Untouched,
}

/// Highlight of one slice of the active word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    TypedCorrect,
    TypedIncorrect,
    Untouched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView<'a> {
    pub index: usize,
    pub word: &'a str,
    pub state: WordState,
}

/// First line of the window; the window scrolls one line at a time as the
/// current word moves down.
pub fn current_line(session: &Session) -> usize {
    session.current_index() / WORDS_PER_LINE
}

/// The words currently on screen, `LINES_VISIBLE` lines of `WORDS_PER_LINE`
pub fn visible_words(session: &Session) -> Vec<WordView<'_>> {
    let start = current_line(session) * WORDS_PER_LINE;
    let completed = session.completed();

    session
        .words()
        .iter()
        .enumerate()
        .skip(start)
        .take(WORDS_PER_LINE * LINES_VISIBLE)
        .map(|(index, word)| {
            let state = match completed.get(index) {
                Some(done) if done.correct => WordState::CompletedCorrect,
                Some(_) => WordState::CompletedIncorrect,
                None if index == session.current_index() => WordState::Active,
                None => WordState::Untouched,
            };
            WordView {
                index,
                word: word.as_str(),
                state,
            }
        })
        .collect()
}

/// Split the active word into the part covered by the input and the rest.
/// The typed part is measured in characters and coloured as a whole, green
/// while the input is still a prefix of the word and red otherwise.
pub fn active_segments<'a>(word: &'a str, input: &str) -> Vec<(&'a str, SegmentState)> {
    let typed_chars = input.chars().count();
    let split = word
        .char_indices()
        .nth(typed_chars)
        .map(|(byte, _)| byte)
        .unwrap_or(word.len());
    let (typed, rest) = word.split_at(split);

    let typed_state = if is_on_track(input, word) {
        SegmentState::TypedCorrect
    } else {
        SegmentState::TypedIncorrect
    };

    [(typed, typed_state), (rest, SegmentState::Untouched)]
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
        .collect()
}

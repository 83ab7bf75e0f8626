//! Keystroke and word classification against the target word.

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_match(matched: bool) -> Self {
        if matched {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// What a change to the in-progress input amounts to
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// The input grew; the last character was classified
    Inserted(Outcome),
    /// The input shrank; counted as a keystroke but never classified
    Deleted,
    /// Same length as before, not a keystroke
    Unchanged,
}

impl InputChange {
    pub fn is_keystroke(&self) -> bool {
        !matches!(self, InputChange::Unchanged)
    }
}

/// Compare the newest character of `next` with `target` at the same position.
/// Characters past the end of the target are always incorrect.
pub fn classify_change(previous: &str, next: &str, target: &str) -> InputChange {
    let previous_len = previous.chars().count();
    let next_len = next.chars().count();

    if next_len == previous_len {
        return InputChange::Unchanged;
    }
    if next_len < previous_len {
        return InputChange::Deleted;
    }

    let idx = next_len - 1;
    let typed = next.chars().last();
    let expected = target.chars().nth(idx);
    let matched = matches!((typed, expected), (Some(t), Some(e)) if t == e);

    InputChange::Inserted(Outcome::from_match(matched))
}

/// Classify a submitted word. Returns `None` when the trimmed input is
/// empty, which is not a submission at all.
pub fn classify_word(input: &str, target: &str) -> Option<Outcome> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(Outcome::from_match(trimmed == target))
}

/// True while the input is still a prefix of the target word
pub fn is_on_track(input: &str, target: &str) -> bool {
    target.starts_with(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_equality() {
        assert_eq!(Outcome::Correct, Outcome::Correct);
        assert_eq!(Outcome::Incorrect, Outcome::Incorrect);
        assert_ne!(Outcome::Correct, Outcome::Incorrect);
    }

    #[test]
    fn test_insert_correct_char() {
        assert_eq!(
            classify_change("", "t", "the"),
            InputChange::Inserted(Outcome::Correct)
        );
        assert_eq!(
            classify_change("th", "the", "the"),
            InputChange::Inserted(Outcome::Correct)
        );
    }

    #[test]
    fn test_insert_incorrect_char() {
        assert_eq!(
            classify_change("t", "tx", "the"),
            InputChange::Inserted(Outcome::Incorrect)
        );
    }

    #[test]
    fn test_insert_past_end_of_word() {
        assert_eq!(
            classify_change("the", "thee", "the"),
            InputChange::Inserted(Outcome::Incorrect)
        );
    }

    #[test]
    fn test_deletion_not_classified() {
        assert_eq!(classify_change("tx", "t", "the"), InputChange::Deleted);
        assert!(InputChange::Deleted.is_keystroke());
    }

    #[test]
    fn test_same_length_is_not_a_keystroke() {
        let change = classify_change("ab", "ab", "abc");
        assert_eq!(change, InputChange::Unchanged);
        assert!(!change.is_keystroke());
    }

    #[test]
    fn test_multibyte_positions_use_chars() {
        assert_eq!(
            classify_change("na", "naï", "naïve"),
            InputChange::Inserted(Outcome::Correct)
        );
    }

    #[test]
    fn test_classify_word() {
        assert_eq!(classify_word("the", "the"), Some(Outcome::Correct));
        assert_eq!(classify_word(" the ", "the"), Some(Outcome::Correct));
        assert_eq!(classify_word("teh", "the"), Some(Outcome::Incorrect));
        assert_eq!(classify_word("th", "the"), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_blank_word_is_not_a_submission() {
        assert_eq!(classify_word("", "the"), None);
        assert_eq!(classify_word("   ", "the"), None);
    }

    #[test]
    fn test_is_on_track() {
        assert!(is_on_track("", "code"));
        assert!(is_on_track("co", "code"));
        assert!(!is_on_track("cx", "code"));
        assert!(!is_on_track("codes", "code"));
    }
}

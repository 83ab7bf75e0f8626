use crate::language::Vocabulary;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of words dealt to every session
pub const WORDS_PER_SESSION: usize = 100;

/// Build a word list of exactly `word_count` words using the thread rng.
pub fn generate_word_list(vocabulary: &Vocabulary, word_count: usize) -> Vec<String> {
    generate_word_list_with(&mut rand::thread_rng(), vocabulary, word_count)
}

/// Shuffle the vocabulary once, then concatenate prefixes of that single
/// shuffle until `word_count` words are collected. Every word appears once
/// before anything repeats, and repeat rounds reuse the same order.
pub fn generate_word_list_with<R: Rng + ?Sized>(
    rng: &mut R,
    vocabulary: &Vocabulary,
    word_count: usize,
) -> Vec<String> {
    if vocabulary.is_empty() {
        return Vec::new();
    }

    let mut shuffled = vocabulary.words.clone();
    shuffled.shuffle(rng);

    let mut result = Vec::with_capacity(word_count);
    while result.len() < word_count {
        let remaining = word_count - result.len();
        let batch = remaining.min(shuffled.len());
        result.extend_from_slice(&shuffled[..batch]);
    }

    result
}

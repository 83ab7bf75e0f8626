use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use thiserror::Error;

static LANG_DIR: Dir = include_dir!("src/lang");

/// Errors raised while loading a bundled word list
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("word list '{0}' not found")]
    NotFound(String),

    #[error("word list '{0}' is not valid UTF-8")]
    Encoding(String),

    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("word list '{0}' has no words")]
    Empty(String),

    #[error("word list '{name}' declares {declared} words but contains {actual}")]
    SizeMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },
}

/// The fixed set of words a test draws from
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Vocabulary {
    pub name: String,
    pub size: usize,
    pub words: Vec<String>,
}

impl Vocabulary {
    /// The bundled english list used by every session
    pub fn english() -> Result<Self, VocabularyError> {
        read_vocabulary_from_file("english.json")
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = from_str(json)?;
        vocabulary.validate()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn validate(self) -> Result<Self, VocabularyError> {
        if self.words.is_empty() {
            return Err(VocabularyError::Empty(self.name));
        }
        if self.size != self.words.len() {
            return Err(VocabularyError::SizeMismatch {
                declared: self.size,
                actual: self.words.len(),
                name: self.name,
            });
        }
        Ok(self)
    }
}

fn read_vocabulary_from_file(file_name: &str) -> Result<Vocabulary, VocabularyError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| VocabularyError::NotFound(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| VocabularyError::Encoding(file_name.to_string()))?;

    Vocabulary::from_json(file_as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_english_vocabulary() {
        let vocab = Vocabulary::english().unwrap();

        assert_eq!(vocab.name, "english");
        assert_eq!(vocab.size, vocab.words.len());
        assert!(vocab.contains("the"));
        assert!(vocab.contains("application"));
        assert!(!vocab.contains("zebra"));
    }

    #[test]
    fn test_english_vocabulary_has_no_blank_words() {
        let vocab = Vocabulary::english().unwrap();

        assert!(vocab
            .words
            .iter()
            .all(|w| !w.is_empty() && !w.contains(char::is_whitespace)));
    }

    #[test]
    fn test_vocabulary_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let vocab = Vocabulary::from_json(json_data).unwrap();

        assert_eq!(vocab.name, "test");
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("world"));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let json_data = r#"{ "name": "none", "size": 0, "words": [] }"#;

        assert_matches!(
            Vocabulary::from_json(json_data),
            Err(VocabularyError::Empty(name)) if name == "none"
        );
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let json_data = r#"{ "name": "short", "size": 5, "words": ["a", "b"] }"#;

        assert_matches!(
            Vocabulary::from_json(json_data),
            Err(VocabularyError::SizeMismatch {
                declared: 5,
                actual: 2,
                ..
            })
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert_matches!(
            Vocabulary::from_json("{ not json"),
            Err(VocabularyError::Parse(_))
        );
    }

    #[test]
    fn test_read_nonexistent_vocabulary_file() {
        assert_matches!(
            read_vocabulary_from_file("nonexistent.json"),
            Err(VocabularyError::NotFound(_))
        );
    }
}

pub mod core;

// Re-export the main types for convenience
pub use core::{Vocabulary, VocabularyError};

//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of indexing, responsible for splitting a
//! line of input text into terms.
//!
//! # Examples
//!
//! ```
//! use wordindex::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let terms = tokenizer.tokenize("Hello  world");
//! assert_eq!(terms, vec!["Hello", "world"]);
//! ```

pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;

/// Trait for tokenizers that convert text into terms.
///
/// The trait requires `Send + Sync` so a single tokenizer can be shared by
/// every index worker.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into terms. Empty tokens are never returned.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Split a line into whitespace-delimited terms.
///
/// Shorthand for [`WhitespaceTokenizer::tokenize`].
pub fn tokenize(line: &str) -> Vec<String> {
    WhitespaceTokenizer.tokenize(line)
}

//! Whitespace tokenizer implementation.

use super::Tokenizer;

/// A tokenizer that splits text on whitespace.
///
/// Tokens are returned verbatim: `"Cat"`, `"cat"` and `"cat,"` are three
/// different terms.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Iterate over the tokens of `text` without allocating.
    pub fn tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        text.split_whitespace()
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokens(text).map(str::to_string).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

//! Text analysis for wordindex.
//!
//! Analysis is deliberately minimal: text is split on whitespace and every
//! token is kept exactly as written. There is no case folding, punctuation
//! stripping, stemming or stop-word removal.

pub mod tokenizer;

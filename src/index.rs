//! The inverted index and its per-document records.
//!
//! - [`stat::DocumentStat`] - one (file, occurrence count) record for a term
//! - [`inverted::InvertedIndex`] - thread-safe term → records mapping

pub mod inverted;
pub mod stat;

pub use inverted::InvertedIndex;
pub use stat::DocumentStat;

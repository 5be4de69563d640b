//! # wordindex
//!
//! Builds an in-memory inverted index over a directory of text files: for
//! every word, which files contain it and how many times.
//!
//! ## Features
//!
//! - Bounded producer/consumer pipeline with backpressure
//! - Parallel workers merging into a sharded, lock-protected index
//! - Per-file failures reported without aborting the build
//! - Cooperative shutdown between files
//!
//! ## Example
//!
//! ```no_run
//! let report = wordindex::pipeline::build("./docs", 3)?;
//!
//! for stat in report.index.lookup("cat") {
//!     println!("{stat}");
//! }
//! # Ok::<(), wordindex::error::IndexError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod index;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer, tokenize};
    pub use crate::error::{IndexError, Result};
    pub use crate::index::{DocumentStat, InvertedIndex};
    pub use crate::pipeline::{BuildConfig, BuildReport, ShutdownHandle, WorkerPool, build};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

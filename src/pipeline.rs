//! Concurrent index construction.
//!
//! ```text
//! DirectoryScanner ──enqueue──▶ FileQueue (bounded) ──dequeue──▶ IndexWorker × N
//!   (1 thread)                                                     │
//!                                                                  ▼ merge
//!                                                            InvertedIndex
//! ```
//!
//! The [`WorkerPool`] starts the workers and the scanner together. The
//! scanner blocks when the queue is full, workers block when it is empty, and
//! the build is complete once every worker has seen the queue closed and
//! drained.
//!
//! # Examples
//!
//! ```no_run
//! use wordindex::pipeline::{BuildConfig, WorkerPool};
//!
//! let pool = WorkerPool::new(BuildConfig::new().with_worker_count(4))?;
//! let report = pool.build("./docs")?;
//!
//! for failure in &report.failures {
//!     eprintln!("{failure}");
//! }
//! if let Some(best) = report.index.most_relevant("rust") {
//!     println!("{best}");
//! }
//! # Ok::<(), wordindex::error::IndexError>(())
//! ```

pub mod config;
pub mod pool;
pub mod queue;
pub mod scanner;
pub mod shutdown;
pub mod worker;

pub use config::BuildConfig;
pub use pool::{BuildReport, WorkerPool, build};
pub use queue::FileQueue;
pub use scanner::DirectoryScanner;
pub use shutdown::ShutdownHandle;
pub use worker::IndexWorker;

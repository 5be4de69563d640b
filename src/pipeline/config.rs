//! Configuration for index builds.

use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};
use crate::index::inverted::DEFAULT_SHARD_COUNT;

/// Default number of index workers.
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Default capacity of the file queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2;

/// Configuration for a [`WorkerPool`](crate::pipeline::pool::WorkerPool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Number of worker threads reading and tokenizing files.
    pub worker_count: usize,

    /// Capacity of the bounded file queue between scanner and workers.
    /// Bounds memory and applies backpressure, not the number of files.
    pub queue_capacity: usize,

    /// Number of lock shards in the inverted index.
    pub shard_count: usize,

    /// Only index files with this extension (without the dot).
    /// If None, every regular file is indexed.
    pub extension: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            shard_count: DEFAULT_SHARD_COUNT,
            extension: None,
        }
    }
}

impl BuildConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of workers.
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the file queue capacity.
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Set the number of index shards.
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Restrict indexing to files with the given extension.
    /// A leading dot is ignored, so `"txt"` and `".txt"` are equivalent.
    pub fn with_extension<S: Into<String>>(mut self, extension: S) -> Self {
        let extension = extension.into();
        self.extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    /// Check that every scalar is in range.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(IndexError::invalid_config("worker_count must be at least 1"));
        }
        if self.queue_capacity == 0 {
            return Err(IndexError::invalid_config(
                "queue_capacity must be at least 1",
            ));
        }
        if self.shard_count == 0 {
            return Err(IndexError::invalid_config("shard_count must be at least 1"));
        }
        if let Some(extension) = &self.extension
            && extension.is_empty()
        {
            return Err(IndexError::invalid_config("extension must not be empty"));
        }
        Ok(())
    }
}
